//! Landing page: greets the signed-in user or points to the auth pages.

use dioxus::prelude::*;
use ui::{toast, use_auth, use_toasts, ToastLevel};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let mut toasts = use_toasts();
    let user = auth.state.read().user.clone();
    let greeting = user
        .as_ref()
        .map(|user| format!("Hello, {}", user.display_name()));

    rsx! {
        div {
            class: "home",
            match user {
                Some(user) => rsx! {
                    h1 { class: "home-title", {greeting} }
                    p { class: "home-subtitle", "Signed in as {user.email}" }
                    button {
                        class: "home-button",
                        onclick: move |_| {
                            auth.store.logout();
                            toast(&mut toasts, ToastLevel::Info, "You have been signed out.");
                        },
                        "Sign out"
                    }
                },
                None => rsx! {
                    h1 { class: "home-title", "Welcome" }
                    p { class: "home-subtitle", "Create an account or sign in to continue." }
                    div {
                        class: "home-links",
                        Link { class: "home-button", to: Route::Signup {}, "Create Account" }
                        Link { class: "home-link", to: Route::Login {}, "Sign in" }
                    }
                },
            }
        }
    }
}
