use dioxus::prelude::*;
use ui::LoginView;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_logged_in: move |_| {
                nav.push(Route::Home {});
            },
        }
    }
}
