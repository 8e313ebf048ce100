use dioxus::prelude::*;

use store::ClientConfig;
use ui::{http_auth_store, AuthProvider, ToastProvider};
use views::{Home, Login, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/signup")]
    Signup {},
    #[route("/login")]
    Login {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CLIENT_TOML: &str = include_str!("../client.toml");

fn main() {
    let parsed = ClientConfig::from_toml(CLIENT_TOML);
    let config = parsed.as_ref().cloned().unwrap_or_default();
    let level = config
        .log
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    dioxus::logger::init(level).expect("failed to init logger");

    if let Err(e) = &parsed {
        tracing::warn!("Ignoring invalid {}: {}", ClientConfig::filename(), e);
    }
    tracing::info!(api = %config.api.base_url, "Starting web client");

    LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<ClientConfig>();
    let store = use_hook(|| http_auth_store(&config.api.base_url));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            store,
            ToastProvider {
                duration_ms: config.toast.duration_ms,
                Router::<Route> {}
            }
        }
    }
}
