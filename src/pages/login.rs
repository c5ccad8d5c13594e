//! Sign-in screen.

use dioxus::prelude::*;
use trapihaus_core::{Persistence, SessionGate, SignInOutcome};

use crate::app::Route;
use crate::components::SocialAuthRow;
use crate::context::use_session;

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials. Use admin / admin.";

/// Both fields filled in; the identifier may not be only whitespace.
pub(crate) fn login_is_valid(identifier: &str, secret: &str) -> bool {
    !identifier.trim().is_empty() && !secret.is_empty()
}

/// Run a sign-in and report problems into `error`.
///
/// Navigation is left to the guest-only layout, which redirects home as soon
/// as the session flips to signed in.
pub(crate) async fn attempt_sign_in(
    gate: SessionGate,
    identifier: String,
    secret: String,
    mut error: Signal<Option<String>>,
) {
    error.set(None);
    match gate.sign_in(&identifier, &secret).await {
        SignInOutcome::Rejected => error.set(Some(INVALID_CREDENTIALS.to_string())),
        SignInOutcome::Accepted(Persistence::Failed(err)) => {
            tracing::warn!("Signed in, but the session was not saved: {}", err);
        }
        SignInOutcome::Accepted(Persistence::Saved) => {}
    }
}

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<String>);

    let is_valid = login_is_valid(&email.read(), &password.read());

    let submit = move |_| {
        let gate = session.gate.clone();
        spawn(attempt_sign_in(gate, email(), password(), error));
    };

    rsx! {
        main { class: "auth-screen",
            h1 { class: "auth-title", "Login to your" br {} "Account" }

            form { class: "auth-form", onsubmit: move |evt| evt.prevent_default(),
                input {
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }

                Link { to: Route::ForgotPassword {}, class: "link", "Forgot the password?" }

                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: !is_valid,
                    onclick: submit,
                    "Sign in"
                }

                if let Some(message) = error() {
                    p { class: "error-text", "{message}" }
                }
            }

            SocialAuthRow {}

            p { class: "muted",
                "Don't have an account? "
                Link { to: Route::Register {}, class: "link", "Sign up" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validity() {
        assert!(login_is_valid("admin", "admin"));
        assert!(login_is_valid(" admin ", " "));
        assert!(!login_is_valid("   ", "admin"));
        assert!(!login_is_valid("admin", ""));
    }
}
