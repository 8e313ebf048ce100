//! Registration page.
//!
//! Values live in a [`FormController`] and are checked by
//! [`RegisterUserSchema`] on submit. A valid submit hands the payload to the
//! auth store; an invalid one raises a toast and focuses the first invalid
//! input. Server-side failure only shows up as `error.signup`, which marks the
//! email and username inputs without a message.
//!
//! The store action is spawned outside the view's scope so it keeps running if
//! the page is left mid-request.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use forms::{
    confirm_password_feedback, confirm_password_invalid, Gender, RegisterUserSchema, SignupField,
    SignupValues, SubmitOutcome,
};
use store::{AuthAction, UserInfo};

use super::controller::{use_form_controller, FormController};
use crate::auth::use_auth;
use crate::components::{
    AuthForm, AuthMode, ErrorMessage, InputType, RadioGroup, RadioOption, SubmitButton, TextInput,
};

#[component]
pub fn SignupView(
    /// Called once the account is created, if the page is still shown.
    #[props(default)]
    on_signed_up: EventHandler<UserInfo>,
) -> Element {
    let store = use_auth().store;
    let controller = use_form_controller(RegisterUserSchema::default);
    let mounted = use_hook(|| Rc::new(Cell::new(true)));

    // A failed signup must not still be flagged when the page is opened again.
    use_drop({
        let store = store.clone();
        let mounted = mounted.clone();
        move || {
            mounted.set(false);
            store.clear_error(AuthAction::Signup);
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
            let Some(user) = store.user_signup(payload).await else {
                return;
            };
            if mounted.get() {
                on_signed_up.call(user);
            } else {
                tracing::debug!("Signup finished after the page was left");
            }
        });
    };

    rsx! {
        SignupFields { controller, onsubmit }
    }
}

/// The signup form markup, driven by `controller`.
#[component]
pub fn SignupFields(
    controller: FormController<SignupValues, RegisterUserSchema>,
    onsubmit: EventHandler<FormEvent>,
) -> Element {
    let auth = use_auth();
    let (loading, server_error) = {
        let state = auth.state.read();
        (state.loading.signup, state.error.signup)
    };

    let form = controller.form();
    let current = form.read();
    let value = |field: SignupField| current.value(field).to_string();
    let message = |field: SignupField| current.error(field).map(str::to_string);
    let confirm_message = confirm_password_feedback(&*current).map(str::to_string);
    let confirm_invalid = confirm_password_invalid(&*current);
    let gender_invalid = current.has_error(SignupField::Gender);
    let gender_options: Vec<RadioOption> = Gender::ALL
        .into_iter()
        .map(|gender| RadioOption {
            label: gender.label(),
            value: gender.as_str(),
            style_class: if gender_invalid { "radio-error" } else { "radio-primary" },
        })
        .collect();

    rsx! {
        AuthForm {
            mode: AuthMode::Signup,
            form {
                class: "auth-form",
                novalidate: true,
                onsubmit: move |evt| onsubmit.call(evt),

                TextInput {
                    name: SignupField::Email.name(),
                    label: SignupField::Email.label(),
                    input_type: InputType::Email,
                    autocomplete: "email",
                    value: value(SignupField::Email),
                    invalid: current.has_error(SignupField::Email) || server_error,
                    oninput: move |v: String| controller.set_value(SignupField::Email, v),
                    onmounted: move |node| controller.register(SignupField::Email, node),
                }
                if let Some(msg) = message(SignupField::Email) {
                    ErrorMessage { message: msg }
                }

                TextInput {
                    name: SignupField::Username.name(),
                    label: SignupField::Username.label(),
                    autocomplete: "username",
                    value: value(SignupField::Username),
                    invalid: current.has_error(SignupField::Username) || server_error,
                    oninput: move |v: String| controller.set_value(SignupField::Username, v),
                    onmounted: move |node| controller.register(SignupField::Username, node),
                }
                if let Some(msg) = message(SignupField::Username) {
                    ErrorMessage { message: msg }
                }

                TextInput {
                    name: SignupField::Password.name(),
                    label: SignupField::Password.label(),
                    input_type: InputType::Password,
                    autocomplete: "new-password",
                    value: value(SignupField::Password),
                    invalid: current.has_error(SignupField::Password),
                    oninput: move |v: String| controller.set_value(SignupField::Password, v),
                    onmounted: move |node| controller.register(SignupField::Password, node),
                }
                if let Some(msg) = message(SignupField::Password) {
                    ErrorMessage { message: msg }
                }

                TextInput {
                    name: SignupField::ConfirmPassword.name(),
                    label: SignupField::ConfirmPassword.label(),
                    input_type: InputType::Password,
                    autocomplete: "new-password",
                    value: value(SignupField::ConfirmPassword),
                    invalid: confirm_invalid,
                    oninput: move |v: String| controller.set_value(SignupField::ConfirmPassword, v),
                    onmounted: move |node| controller.register(SignupField::ConfirmPassword, node),
                }
                if let Some(msg) = confirm_message {
                    ErrorMessage { message: msg }
                }

                RadioGroup {
                    name: SignupField::Gender.name(),
                    label: SignupField::Gender.label(),
                    options: gender_options,
                    value: value(SignupField::Gender),
                    invalid: gender_invalid,
                    onchange: move |v: String| controller.set_value(SignupField::Gender, v),
                    onmounted: move |node| controller.register(SignupField::Gender, node),
                }
                if let Some(msg) = message(SignupField::Gender) {
                    ErrorMessage { message: msg }
                }

                SubmitButton { label: "Create Account", loading }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                a { href: "/login", "Sign in" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use dioxus::dioxus_core::{NoOpMutations, VirtualDom};
    use store::MemoryAuthApi;

    use super::*;
    use crate::auth::{memory_auth_store, AuthProvider, SharedAuthStore};
    use crate::toast::ToastProvider;
    use crate::views::SUBMISSION_FAILED;

    type FocusSlot = Rc<RefCell<Option<SignupField>>>;

    /// Submits the empty form on first render and records the focus target.
    #[component]
    fn SubmittedSignup(focus: FocusSlot) -> Element {
        let controller = use_form_controller(RegisterUserSchema::default);
        use_hook(|| {
            if let SubmitOutcome::Invalid { first_invalid } = controller.submit() {
                *focus.borrow_mut() = first_invalid;
            }
        });
        rsx! {
            SignupFields { controller, onsubmit: move |_| {} }
        }
    }

    #[component]
    fn EmptySubmitApp(store: SharedAuthStore, focus: FocusSlot) -> Element {
        rsx! {
            AuthProvider { store,
                ToastProvider { duration_ms: 0,
                    SubmittedSignup { focus }
                }
            }
        }
    }

    /// Shows the signup page until the exported signal is cleared.
    #[component]
    fn SignupPage(store: SharedAuthStore, shown: Rc<RefCell<Option<Signal<bool>>>>) -> Element {
        let visible = use_signal(|| true);
        shown.replace(Some(visible));
        rsx! {
            AuthProvider { store,
                ToastProvider { duration_ms: 0,
                    if visible() {
                        SignupView {}
                    }
                }
            }
        }
    }

    fn render_page(store: &SharedAuthStore) -> (VirtualDom, Rc<RefCell<Option<Signal<bool>>>>) {
        let shown = Rc::new(RefCell::new(None));
        let mut dom = VirtualDom::new_with_props(
            SignupPage,
            SignupPageProps {
                store: store.clone(),
                shown: shown.clone(),
            },
        );
        dom.rebuild_in_place();
        (dom, shown)
    }

    #[test]
    fn test_empty_submit_shows_every_error_once() {
        let focus: FocusSlot = Rc::new(RefCell::new(None));
        let mut dom = VirtualDom::new_with_props(
            EmptySubmitApp,
            EmptySubmitAppProps {
                store: memory_auth_store(MemoryAuthApi::new()),
                focus: focus.clone(),
            },
        );
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert_eq!(html.matches("toast-error").count(), 1);
        assert!(html.contains(SUBMISSION_FAILED));
        assert_eq!(html.matches("auth-error-message").count(), 5);
        assert!(html.contains("Email is required."));
        assert!(html.contains("Username is required."));
        assert!(html.contains("Please select a gender."));
        // password and the confirmation override
        assert_eq!(html.matches("Password is required.").count(), 2);
        assert!(!html.contains("Please confirm your password."));
        assert_eq!(*focus.borrow(), Some(SignupField::Email));
    }

    #[test]
    fn test_button_disabled_with_spinner_while_loading() {
        let store = memory_auth_store(MemoryAuthApi::new());
        store.set_state(|state| state.loading.signup = true);
        let (dom, _) = render_page(&store);
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("Loading..."));
        assert!(html.contains("spinner"));
        assert!(html.contains("disabled"));
        // only the page title is left
        assert_eq!(html.matches("Create Account").count(), 1);
    }

    #[test]
    fn test_idle_button_reads_create_account() {
        let store = memory_auth_store(MemoryAuthApi::new());
        let (dom, _) = render_page(&store);
        let html = dioxus_ssr::render(&dom);

        assert!(!html.contains("Loading..."));
        assert_eq!(html.matches("Create Account").count(), 2);
    }

    #[test]
    fn test_leaving_the_page_clears_signup_error() {
        let store = memory_auth_store(MemoryAuthApi::new());
        store.set_state(|state| state.error.signup = true);
        let (mut dom, shown) = render_page(&store);

        // the server error marks email and username
        assert_eq!(dioxus_ssr::render(&dom).matches("input-error").count(), 2);

        let visible = shown.borrow().expect("page rendered");
        dom.in_runtime(|| {
            let mut visible = visible;
            visible.set(false);
        });
        dom.render_immediate(&mut NoOpMutations);

        assert!(!store.state().error.signup);
        assert!(!dioxus_ssr::render(&dom).contains("auth-form"));
    }
}
