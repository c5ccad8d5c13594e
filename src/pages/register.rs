//! Sign-up screen. There is no account creation; it signs in with the same
//! credential policy as the login screen.

use dioxus::prelude::*;

use crate::app::Route;
use crate::components::SocialAuthRow;
use crate::context::use_session;
use crate::pages::login::attempt_sign_in;

/// All fields filled in and both passwords equal.
fn registration_is_valid(full_name: &str, email: &str, password: &str, confirm: &str) -> bool {
    let has_all = !full_name.trim().is_empty()
        && !email.trim().is_empty()
        && !password.is_empty()
        && !confirm.is_empty();
    has_all && password == confirm
}

#[component]
pub fn Register() -> Element {
    let session = use_session();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let error = use_signal(|| None::<String>);

    let is_valid = registration_is_valid(
        &full_name.read(),
        &email.read(),
        &password.read(),
        &confirm.read(),
    );

    let submit = move |_| {
        let gate = session.gate.clone();
        spawn(attempt_sign_in(gate, email(), password(), error));
    };

    rsx! {
        main { class: "auth-screen",
            h1 { class: "auth-title", "Create your" br {} "Account" }

            form { class: "auth-form", onsubmit: move |evt| evt.prevent_default(),
                input {
                    placeholder: "Full Name",
                    value: "{full_name}",
                    oninput: move |evt| full_name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm Password",
                    value: "{confirm}",
                    oninput: move |evt| confirm.set(evt.value()),
                }

                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: !is_valid,
                    onclick: submit,
                    "Sign up"
                }

                if let Some(message) = error() {
                    p { class: "error-text", "{message}" }
                }
            }

            SocialAuthRow {}

            p { class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, class: "link", "Sign in" }
            }
        }
    }
}
