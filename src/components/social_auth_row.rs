//! Social sign-in buttons. Not wired to any identity provider.

use dioxus::prelude::*;

const PROVIDERS: [&str; 3] = ["Facebook", "Google", "Apple"];

#[component]
pub fn SocialAuthRow() -> Element {
    rsx! {
        div { class: "social-row",
            p { class: "muted", "or continue with" }
            for provider in PROVIDERS {
                button {
                    class: "social-button",
                    disabled: true,
                    title: "{provider} sign-in is not available yet",
                    "{provider}"
                }
            }
        }
    }
}
