use dioxus::prelude::*;

const AUTH_CSS: Asset = asset!("/assets/styling/auth.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Signup => "Create Account",
            AuthMode::Login => "Welcome Back",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            AuthMode::Signup => "Get started with your free account",
            AuthMode::Login => "Sign in to your account",
        }
    }
}

/// Card frame shared by the signup and login pages.
#[component]
pub fn AuthForm(mode: AuthMode, children: Element) -> Element {
    let title = mode.title();
    let subtitle = mode.subtitle();

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "{title}" }
                p { class: "auth-subtitle", "{subtitle}" }
                {children}
            }
        }
    }
}
