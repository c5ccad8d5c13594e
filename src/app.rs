use dioxus::prelude::*;
use trapihaus_core::{Destination, SessionConfig};

use crate::components::{GuestOnly, RequireSession, TabBar};
use crate::context::SessionProvider;
use crate::pages::{
    Bookings, ForgotPassword, Home, ListingDetail, Login, NotFound, Profile, Register, Reviews,
    Saved, Search,
};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/login`, `/register`, `/forgot-password` - guest only
/// - `/`, `/search`, `/bookings`, `/saved`, `/profile` - tabs, signed in only
/// - `/listing/:id`, `/listing/:id/reviews` - signed in only
/// - anything else - not found, signed in only
#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(GuestOnly)]
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/forgot-password")]
        ForgotPassword {},
    #[end_layout]
    #[layout(RequireSession)]
        #[layout(TabBar)]
            #[route("/")]
            Home {},
            #[route("/search")]
            Search {},
            #[route("/bookings")]
            Bookings {},
            #[route("/saved")]
            Saved {},
            #[route("/profile")]
            Profile {},
        #[end_layout]
        #[route("/listing/:id")]
        ListingDetail { id: String },
        #[route("/listing/:id/reviews")]
        Reviews { id: String },
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
    // RequireSession layout is closed implicitly at the end of the enum.
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::SignIn => Route::Login {},
            Destination::Home => Route::Home {},
        }
    }
}

/// Root application component.
///
/// The session is created here, at the composition root, and handed down
/// through `SessionProvider`.
#[component]
pub fn App() -> Element {
    let config = try_use_context::<SessionConfig>().unwrap_or_else(SessionConfig::from_env);

    rsx! {
        style { {GLOBAL_STYLES} }
        SessionProvider { config,
            Router::<Route> {}
        }
    }
}
