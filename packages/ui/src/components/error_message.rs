use dioxus::prelude::*;

/// Inline validation message under a field.
#[component]
pub fn ErrorMessage(#[props(into)] message: String) -> Element {
    rsx! {
        p { class: "auth-error-message", role: "alert", "{message}" }
    }
}
