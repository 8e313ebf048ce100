use dioxus::prelude::*;

/// Submit button that turns into a disabled spinner while `loading`.
#[component]
pub fn SubmitButton(label: &'static str, loading: bool) -> Element {
    rsx! {
        button {
            r#type: "submit",
            class: "auth-submit",
            disabled: loading,
            "aria-busy": if loading { "true" } else { "false" },
            if loading {
                span { class: "spinner", "aria-hidden": "true" }
            }
            {caption(label, loading)}
        }
    }
}

pub(crate) const LOADING_CAPTION: &str = "Loading...";

pub(crate) fn caption(label: &'static str, loading: bool) -> &'static str {
    if loading {
        LOADING_CAPTION
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_swaps_while_loading() {
        assert_eq!(caption("Create Account", false), "Create Account");
        assert_eq!(caption("Create Account", true), "Loading...");
    }
}
