use std::rc::Rc;

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Password,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
        }
    }
}

/// Labelled input. The mounted node is handed to `onmounted` so the form can
/// move focus to it.
#[component]
pub fn TextInput(
    name: &'static str,
    label: &'static str,
    value: String,
    #[props(default = InputType::Text)] input_type: InputType,
    #[props(default)] invalid: bool,
    #[props(default)] autocomplete: Option<&'static str>,
    oninput: EventHandler<String>,
    #[props(default)] onmounted: EventHandler<Rc<MountedData>>,
) -> Element {
    let show_password = use_signal(|| false);
    let rendered_type = if input_type == InputType::Password && show_password() {
        InputType::Text
    } else {
        input_type
    };

    rsx! {
        label {
            class: "auth-field",
            span { class: "auth-label", "{label}" }
            div {
                class: "auth-input-row",
                input {
                    class: input_class(invalid),
                    id: name,
                    name: name,
                    r#type: rendered_type.as_str(),
                    placeholder: label,
                    value: value,
                    autocomplete: autocomplete,
                    "aria-invalid": if invalid { "true" } else { "false" },
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                    onmounted: move |evt: MountedEvent| onmounted.call(evt.data()),
                }
                if input_type == InputType::Password {
                    PasswordToggle { visible: show_password }
                }
            }
        }
    }
}

#[component]
fn PasswordToggle(visible: Signal<bool>) -> Element {
    let mut visible = visible;
    rsx! {
        button {
            r#type: "button",
            class: "auth-input-toggle",
            tabindex: "-1",
            onclick: move |_| visible.toggle(),
            if visible() { "Hide" } else { "Show" }
        }
    }
}

pub(crate) fn input_class(invalid: bool) -> &'static str {
    if invalid {
        "auth-input input-error"
    } else {
        "auth-input"
    }
}
