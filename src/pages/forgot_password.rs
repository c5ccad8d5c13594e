use dioxus::prelude::*;

use crate::app::Route;

/// Password reset placeholder; no reset flow exists.
#[component]
pub fn ForgotPassword() -> Element {
    rsx! {
        main { class: "auth-screen",
            h1 { class: "auth-title", "Forgot Password" }
            p { class: "muted", "Password reset is not available yet." }
            Link { to: Route::Login {}, class: "link", "Back to sign in" }
        }
    }
}
