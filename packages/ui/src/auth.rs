//! Auth store context for the UI.
//!
//! [`AuthProvider`] takes the [`SharedAuthStore`] it is given, mirrors its
//! state into a signal through an explicit subscription, and drops the
//! subscription when it unmounts. Components read the signal for rendering and
//! call the store for actions.

use api::ApiClient;
use dioxus::prelude::*;
use forms::{LoginPayload, SignupPayload};
use store::{AuthApi, AuthError, AuthState, AuthStore, MemoryAuthApi, UserInfo};

/// Backend behind the app's auth store.
#[derive(Clone, Debug)]
pub enum AuthBackend {
    Http(ApiClient),
    Memory(MemoryAuthApi),
}

impl AuthApi for AuthBackend {
    async fn signup(&self, payload: SignupPayload) -> Result<UserInfo, AuthError> {
        match self {
            AuthBackend::Http(client) => client.signup(payload).await,
            AuthBackend::Memory(memory) => memory.signup(payload).await,
        }
    }

    async fn login(&self, payload: LoginPayload) -> Result<UserInfo, AuthError> {
        match self {
            AuthBackend::Http(client) => client.login(payload).await,
            AuthBackend::Memory(memory) => memory.login(payload).await,
        }
    }
}

pub type SharedAuthStore = AuthStore<AuthBackend>;

/// Store talking to the backend at `base_url`.
pub fn http_auth_store(base_url: &str) -> SharedAuthStore {
    AuthStore::new(AuthBackend::Http(ApiClient::new(base_url)))
}

/// Store keeping accounts in memory.
pub fn memory_auth_store(api: MemoryAuthApi) -> SharedAuthStore {
    AuthStore::new(AuthBackend::Memory(api))
}

#[derive(Clone)]
pub struct AuthContext {
    pub store: SharedAuthStore,
    /// Latest store state. Reading it subscribes the component.
    pub state: Signal<AuthState>,
}

/// Get the auth store and its mirrored state.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that shares the auth store.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(store: SharedAuthStore, children: Element) -> Element {
    let state = use_signal(|| store.state());

    let subscription = use_hook(|| {
        store.subscribe(move |next| {
            let mut state = state;
            state.set(next.clone());
        })
    });

    use_drop({
        let store = store.clone();
        move || {
            store.unsubscribe(subscription);
        }
    });

    use_context_provider(|| AuthContext {
        store: store.clone(),
        state,
    });

    rsx! {
        {children}
    }
}
