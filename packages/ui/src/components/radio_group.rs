use std::rc::Rc;

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct RadioOption {
    pub label: &'static str,
    pub value: &'static str,
    pub style_class: &'static str,
}

/// Group of radio buttons bound to one string value. Nothing is checked until
/// the user picks an option. `onmounted` receives the first option's node.
#[component]
pub fn RadioGroup(
    name: &'static str,
    label: &'static str,
    options: Vec<RadioOption>,
    value: String,
    #[props(default)] invalid: bool,
    onchange: EventHandler<String>,
    #[props(default)] onmounted: EventHandler<Rc<MountedData>>,
) -> Element {
    rsx! {
        fieldset {
            class: if invalid { "auth-radio-group input-error" } else { "auth-radio-group" },
            role: "radiogroup",
            legend { class: "auth-label", "{label}" }
            for (index, option) in options.into_iter().enumerate() {
                label {
                    key: "{option.value}",
                    class: "auth-radio",
                    input {
                        r#type: "radio",
                        class: "radio {option.style_class}",
                        name: name,
                        value: option.value,
                        checked: value == option.value,
                        onchange: move |_| onchange.call(option.value.to_string()),
                        onmounted: move |evt: MountedEvent| {
                            if index == 0 {
                                onmounted.call(evt.data());
                            }
                        },
                    }
                    span { "{option.label}" }
                }
            }
        }
    }
}
