//! Tab screens of the signed-in area.

use dioxus::prelude::*;
use trapihaus_core::Persistence;

use crate::app::Route;
use crate::context::use_session;

#[component]
pub fn Home() -> Element {
    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Find your next stay" }
            Link {
                to: Route::ListingDetail { id: "1".to_string() },
                class: "listing-card",
                "Loakan Heights Residences"
            }
        }
    }
}

#[component]
pub fn Search() -> Element {
    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Search" }
        }
    }
}

#[component]
pub fn Bookings() -> Element {
    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Bookings" }
            p { class: "muted", "No upcoming stays." }
        }
    }
}

#[component]
pub fn Saved() -> Element {
    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Saved" }
            p { class: "muted", "Listings you save show up here." }
        }
    }
}

/// Profile tab with the log out button.
///
/// Signing out flips the session immediately; the protected layout then
/// redirects to the login screen.
#[component]
pub fn Profile() -> Element {
    let session = use_session();

    let sign_out = move |_| {
        let gate = session.gate.clone();
        spawn(async move {
            if let Persistence::Failed(err) = gate.sign_out().await {
                tracing::warn!("Signed out, but the stored session was not removed: {}", err);
            }
        });
    };

    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Profile" }
            button { class: "btn-primary", onclick: sign_out, "Log out" }
        }
    }
}
