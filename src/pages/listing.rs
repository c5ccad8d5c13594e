//! Listing detail and reviews. Listing content is not modelled yet.

use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn ListingDetail(id: String) -> Element {
    rsx! {
        main { class: "screen",
            Link { to: Route::Home {}, class: "link", "Back" }
            h1 { class: "screen-title", "Listing {id}" }
            Link {
                to: Route::Reviews { id: id.clone() },
                class: "link",
                "See reviews"
            }
        }
    }
}

#[component]
pub fn Reviews(id: String) -> Element {
    rsx! {
        main { class: "screen",
            Link { to: Route::ListingDetail { id: id.clone() }, class: "link", "Back" }
            h1 { class: "screen-title", "Reviews" }
            p { class: "muted", "No reviews for listing {id} yet." }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        main { class: "screen",
            h1 { class: "screen-title", "Page not found" }
            p { class: "muted", "/{path}" }
            Link { to: Route::Home {}, class: "link", "Go home" }
        }
    }
}
