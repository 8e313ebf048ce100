//! Sign-in page, built like the registration page on a two-field form.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use forms::{LoginField, LoginSchema, LoginValues, SubmitOutcome};
use store::{AuthAction, UserInfo};

use super::controller::{use_form_controller, FormController};
use crate::auth::use_auth;
use crate::components::{AuthForm, AuthMode, ErrorMessage, InputType, SubmitButton, TextInput};

#[component]
pub fn LoginView(#[props(default)] on_logged_in: EventHandler<UserInfo>) -> Element {
    let store = use_auth().store;
    let controller = use_form_controller(|| LoginSchema);
    let mounted = use_hook(|| Rc::new(Cell::new(true)));

    use_drop({
        let store = store.clone();
        let mounted = mounted.clone();
        move || {
            mounted.set(false);
            store.clear_error(AuthAction::Login);
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let SubmitOutcome::Valid(payload) = controller.submit() else {
            return;
        };
        let store = store.clone();
        let mounted = mounted.clone();
        spawn_forever(async move {
            if let Some(user) = store.user_login(payload).await {
                if mounted.get() {
                    on_logged_in.call(user);
                }
            }
        });
    };

    rsx! {
        LoginFields { controller, onsubmit }
    }
}

#[component]
pub fn LoginFields(
    controller: FormController<LoginValues, LoginSchema>,
    onsubmit: EventHandler<FormEvent>,
) -> Element {
    let auth = use_auth();
    let (loading, server_error) = {
        let state = auth.state.read();
        (state.loading.login, state.error.login)
    };
    let form = controller.form();
    let current = form.read();
    let email_error = current.error(LoginField::Email).map(str::to_string);
    let password_error = current.error(LoginField::Password).map(str::to_string);

    rsx! {
        AuthForm {
            mode: AuthMode::Login,
            form {
                class: "auth-form",
                novalidate: true,
                onsubmit: move |evt| onsubmit.call(evt),

                if server_error {
                    p { class: "auth-banner", role: "alert", "Invalid email or password." }
                }

                TextInput {
                    name: LoginField::Email.name(),
                    label: LoginField::Email.label(),
                    input_type: InputType::Email,
                    autocomplete: "email",
                    value: current.value(LoginField::Email).to_string(),
                    invalid: email_error.is_some() || server_error,
                    oninput: move |v: String| controller.set_value(LoginField::Email, v),
                    onmounted: move |node| controller.register(LoginField::Email, node),
                }
                if let Some(msg) = email_error {
                    ErrorMessage { message: msg }
                }

                TextInput {
                    name: LoginField::Password.name(),
                    label: LoginField::Password.label(),
                    input_type: InputType::Password,
                    autocomplete: "current-password",
                    value: current.value(LoginField::Password).to_string(),
                    invalid: password_error.is_some() || server_error,
                    oninput: move |v: String| controller.set_value(LoginField::Password, v),
                    onmounted: move |node| controller.register(LoginField::Password, node),
                }
                if let Some(msg) = password_error {
                    ErrorMessage { message: msg }
                }

                SubmitButton { label: "Sign In", loading }
            }

            p {
                class: "auth-switch",
                "Don't have an account? "
                a { href: "/signup", "Create one" }
            }
        }
    }
}
