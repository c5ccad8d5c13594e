//! Route access decisions.
//!
//! Every screen is either protected (needs a signed-in session) or guest-only
//! (the sign-in / sign-up entry screens). Given the current
//! [`SessionState`], [`RouteKind::access`] says whether to wait, redirect or
//! render. The UI layer only has to act on the answer.

use crate::session::SessionState;

/// Where a redirect should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// The sign-in entry point (`/login`)
    SignIn,
    /// The authenticated home route (`/`)
    Home,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Destination::SignIn => "/login",
            Destination::Home => "/",
        }
    }
}

/// What a route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session not loaded yet: render nothing, do not redirect
    Pending,
    Redirect(Destination),
    Render,
}

/// Access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Requires a signed-in session
    Protected,
    /// Only for signed-out users (login, register, forgot password)
    GuestOnly,
}

const GUEST_ONLY_PATHS: &[&str] = &["/login", "/register", "/forgot-password"];

impl RouteKind {
    pub fn access(self, state: SessionState) -> RouteAccess {
        if !state.ready {
            return RouteAccess::Pending;
        }

        match (self, state.signed_in) {
            (RouteKind::Protected, false) => RouteAccess::Redirect(Destination::SignIn),
            (RouteKind::GuestOnly, true) => RouteAccess::Redirect(Destination::Home),
            _ => RouteAccess::Render,
        }
    }

    /// Classify a path. Unknown paths are protected, like the not-found
    /// screen that renders them.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');

        if GUEST_ONLY_PATHS.contains(&trimmed) {
            RouteKind::GuestOnly
        } else {
            RouteKind::Protected
        }
    }
}
