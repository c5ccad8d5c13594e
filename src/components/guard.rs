//! Route guard layouts.
//!
//! Both layouts render nothing while the session is loading, redirect with
//! `replace` once the session says the user does not belong here, and render
//! the nested route otherwise.

use dioxus::prelude::*;
use trapihaus_core::{RouteAccess, RouteKind};

use crate::app::Route;
use crate::context::use_session;

/// Current access decision for a route of `kind`; redirects as a side effect.
fn use_route_access(kind: RouteKind) -> RouteAccess {
    let session = use_session();
    let navigator = use_navigator();
    let state = session.state;

    use_effect(move || {
        if let RouteAccess::Redirect(to) = kind.access(state()) {
            tracing::debug!(?kind, to = to.path(), "Route guard redirect");
            navigator.replace(Route::from(to));
        }
    });

    kind.access(state())
}

/// Layout for screens that need a signed-in session.
#[component]
pub fn RequireSession() -> Element {
    match use_route_access(RouteKind::Protected) {
        RouteAccess::Render => rsx! { Outlet::<Route> {} },
        RouteAccess::Pending | RouteAccess::Redirect(_) => rsx! {},
    }
}

/// Layout for the sign-in and sign-up entry screens.
#[component]
pub fn GuestOnly() -> Element {
    match use_route_access(RouteKind::GuestOnly) {
        RouteAccess::Render => rsx! { Outlet::<Route> {} },
        RouteAccess::Pending | RouteAccess::Redirect(_) => rsx! {},
    }
}
