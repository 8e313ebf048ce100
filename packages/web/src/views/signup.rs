use dioxus::prelude::*;
use ui::SignupView;

use crate::Route;

/// Signup page; goes home once the account exists.
#[component]
pub fn Signup() -> Element {
    let nav = use_navigator();

    rsx! {
        SignupView {
            on_signed_up: move |_| {
                nav.push(Route::Home {});
            },
        }
    }
}
