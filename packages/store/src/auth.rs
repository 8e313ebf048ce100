//! # Auth store
//!
//! [`AuthStore`] is the shared state container the auth views observe. It is
//! deliberately UI-agnostic: a view bridges it into its own reactivity by
//! subscribing on mount and unsubscribing on unmount.
//!
//! ## State
//!
//! [`AuthState`] carries the signed-in user and two [`ActionFlags`] sets,
//! `loading` and `error`, keyed by [`AuthAction`]. Every action follows the
//! same transitions:
//!
//! | Step | `loading[a]` | `error[a]` | `user` |
//! |------|--------------|------------|--------|
//! | start | `true` | `false` | unchanged |
//! | API ok | `false` | `false` | `Some(user)` |
//! | API err | `false` | `true` | unchanged |
//! | cancelled | `false` | unchanged | unchanged |
//!
//! A second call for an action that is still loading is ignored and returns
//! `None`. Dropping an action's future mid-request counts as cancelled, so the
//! action can be retried.
//!
//! ## Threading
//!
//! The store lives on the UI thread: it is `Rc`-shared and listeners are
//! called synchronously on every state change.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use forms::{LoginPayload, SignupPayload};

use crate::models::UserInfo;

/// Failure reported by an [`AuthApi`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Backend operations the store delegates to.
pub trait AuthApi {
    fn signup(
        &self,
        payload: SignupPayload,
    ) -> impl Future<Output = Result<UserInfo, AuthError>>;

    fn login(
        &self,
        payload: LoginPayload,
    ) -> impl Future<Output = Result<UserInfo, AuthError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthAction {
    Signup,
    Login,
}

/// One boolean per [`AuthAction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionFlags {
    pub signup: bool,
    pub login: bool,
}

impl ActionFlags {
    pub fn get(&self, action: AuthAction) -> bool {
        match action {
            AuthAction::Signup => self.signup,
            AuthAction::Login => self.login,
        }
    }

    pub fn set(&mut self, action: AuthAction, value: bool) {
        match action {
            AuthAction::Signup => self.signup = value,
            AuthAction::Login => self.login = value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: ActionFlags,
    pub error: ActionFlags,
}

/// Handle returned by [`AuthStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&AuthState)>;

struct Inner<A> {
    api: A,
    state: RefCell<AuthState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

/// Shared, observable auth state plus the actions that drive it.
pub struct AuthStore<A> {
    inner: Rc<Inner<A>>,
}

impl<A> Clone for AuthStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Two handles are equal when they share the same store.
impl<A> PartialEq for AuthStore<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A> AuthStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                state: RefCell::new(AuthState::default()),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Replace part of the state and notify every listener.
    pub fn set_state(&self, update: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            update(&mut state);
            state.clone()
        };
        self.notify(&snapshot);
    }

    /// Reset the error flag of `action`, whatever its current value.
    pub fn clear_error(&self, action: AuthAction) {
        self.set_state(|state| state.error.set(action, false));
    }

    pub fn logout(&self) {
        tracing::info!("Signing out");
        self.set_state(|state| state.user = None);
    }

    fn notify(&self, state: &AuthState) {
        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    fn begin(&self, action: AuthAction) -> Option<InFlight<'_, A>> {
        if self.inner.state.borrow().loading.get(action) {
            tracing::debug!(?action, "Action already in flight, ignoring");
            return None;
        }
        self.set_state(|state| {
            state.loading.set(action, true);
            state.error.set(action, false);
        });
        Some(InFlight {
            store: self,
            action,
            settled: false,
        })
    }
}

/// Marks an action as loading until it is settled or dropped.
///
/// Dropping it unsettled (the caller's future was cancelled) clears the
/// loading flag and leaves the error flag alone.
struct InFlight<'a, A> {
    store: &'a AuthStore<A>,
    action: AuthAction,
    settled: bool,
}

impl<A> InFlight<'_, A> {
    fn settle(mut self, result: Result<UserInfo, AuthError>) -> Option<UserInfo> {
        self.settled = true;
        let action = self.action;
        match result {
            Ok(user) => {
                tracing::info!(?action, user = %user.username, "Auth action succeeded");
                self.store.set_state(|state| {
                    state.loading.set(action, false);
                    state.user = Some(user.clone());
                });
                Some(user)
            }
            Err(e) => {
                tracing::warn!(?action, "Auth action failed: {}", e);
                self.store.set_state(|state| {
                    state.loading.set(action, false);
                    state.error.set(action, true);
                });
                None
            }
        }
    }
}

impl<A> Drop for InFlight<'_, A> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let action = self.action;
        tracing::debug!(?action, "Auth action cancelled");
        self.store.set_state(|state| state.loading.set(action, false));
    }
}

impl<A: AuthApi> AuthStore<A> {
    /// Register a new account.
    ///
    /// Returns the user only when this call created it; an ignored duplicate
    /// or a failure returns `None` and is reported through the state flags.
    pub async fn user_signup(&self, payload: SignupPayload) -> Option<UserInfo> {
        let in_flight = self.begin(AuthAction::Signup)?;
        let result = self.inner.api.signup(payload).await;
        in_flight.settle(result)
    }

    /// Sign in. Same contract as [`AuthStore::user_signup`].
    pub async fn user_login(&self, payload: LoginPayload) -> Option<UserInfo> {
        let in_flight = self.begin(AuthAction::Login)?;
        let result = self.inner.api.login(payload).await;
        in_flight.settle(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryAuthApi;
    use forms::Gender;

    fn payload(email: &str, username: &str) -> SignupPayload {
        SignupPayload {
            email: email.to_string(),
            username: username.to_string(),
            password: "Abc123!".to_string(),
            confirm_password: "Abc123!".to_string(),
            gender: Gender::Male,
        }
    }

    fn record_signup_flags(store: &AuthStore<MemoryAuthApi>) -> Rc<RefCell<Vec<(bool, bool)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            sink.borrow_mut()
                .push((state.loading.signup, state.error.signup));
        });
        seen
    }

    #[tokio::test]
    async fn test_signup_success_sets_user() {
        let store = AuthStore::new(MemoryAuthApi::new());
        let seen = record_signup_flags(&store);

        store.user_signup(payload("jane@example.com", "jane")).await;

        let state = store.state();
        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("jane"));
        assert!(!state.loading.signup);
        assert!(!state.error.signup);
        assert_eq!(*seen.borrow(), vec![(true, false), (false, false)]);
    }

    #[tokio::test]
    async fn test_signup_failure_raises_error_flag() {
        let api = MemoryAuthApi::new();
        let store = AuthStore::new(api.clone());
        store.user_signup(payload("jane@example.com", "jane")).await;
        store.logout();

        let seen = record_signup_flags(&store);
        store.user_signup(payload("jane@example.com", "jane2")).await;

        let state = store.state();
        assert!(state.user.is_none());
        assert!(state.error.signup);
        assert!(!state.loading.signup);
        assert_eq!(*seen.borrow(), vec![(true, false), (false, true)]);
        assert_eq!(api.account_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_clears_previous_error() {
        let store = AuthStore::new(MemoryAuthApi::new());
        store.set_state(|state| state.error.signup = true);

        let seen = record_signup_flags(&store);
        store.user_signup(payload("jane@example.com", "jane")).await;

        assert_eq!(seen.borrow()[0], (true, false));
        assert!(!store.state().error.signup);
    }

    #[tokio::test]
    async fn test_signup_ignored_while_loading() {
        let api = MemoryAuthApi::new();
        let store = AuthStore::new(api.clone());
        store.set_state(|state| state.loading.signup = true);

        store.user_signup(payload("jane@example.com", "jane")).await;

        assert_eq!(api.account_count(), 0);
        assert!(store.state().loading.signup);
    }

    #[tokio::test]
    async fn test_login_uses_its_own_flags() {
        let store = AuthStore::new(MemoryAuthApi::new());
        store
            .user_login(LoginPayload {
                email: "nobody@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await;

        let state = store.state();
        assert!(state.error.login);
        assert!(!state.error.signup);
        assert!(!state.loading.login);
    }

    /// Never answers the first signup, then defers to the in-memory backend.
    struct StallFirstSignup {
        calls: Cell<u32>,
        inner: MemoryAuthApi,
    }

    impl AuthApi for StallFirstSignup {
        async fn signup(&self, payload: SignupPayload) -> Result<UserInfo, AuthError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if call == 0 {
                std::future::pending::<()>().await;
            }
            self.inner.signup(payload).await
        }

        async fn login(&self, payload: LoginPayload) -> Result<UserInfo, AuthError> {
            self.inner.login(payload).await
        }
    }

    #[tokio::test]
    async fn test_cancelled_signup_can_be_retried() {
        let store = AuthStore::new(StallFirstSignup {
            calls: Cell::new(0),
            inner: MemoryAuthApi::new(),
        });
        store.set_state(|state| state.error.signup = true);

        tokio::select! {
            biased;
            _ = store.user_signup(payload("jane@example.com", "jane")) => {
                panic!("first signup should still be pending");
            }
            _ = async {} => {}
        }
        let state = store.state();
        assert!(!state.loading.signup);
        // begin already cleared it, cancelling does not raise it again
        assert!(!state.error.signup);

        let user = store.user_signup(payload("jane@example.com", "jane")).await;
        assert_eq!(user.map(|u| u.username), Some("jane".to_string()));
        assert!(!store.state().loading.signup);
        assert_eq!(store.api().calls.get(), 2);
    }

    #[tokio::test]
    async fn test_ignored_signup_returns_none_despite_existing_user() {
        let store = AuthStore::new(MemoryAuthApi::new());
        let first = store.user_signup(payload("jane@example.com", "jane")).await;
        assert!(first.is_some());

        store.set_state(|state| state.loading.signup = true);
        let second = store.user_signup(payload("john@example.com", "john")).await;

        assert_eq!(second, None);
        // the earlier session is still there, but this call did not produce it
        assert!(store.state().user.is_some());
    }

    #[tokio::test]
    async fn test_failed_signup_returns_none() {
        let store = AuthStore::new(MemoryAuthApi::new());
        store.user_signup(payload("jane@example.com", "jane")).await;
        let again = store.user_signup(payload("jane@example.com", "jane")).await;
        assert_eq!(again, None);
        assert!(store.state().error.signup);
    }

    #[test]
    fn test_clear_error_resets_regardless_of_prior_value() {
        let store = AuthStore::new(MemoryAuthApi::new());

        store.clear_error(AuthAction::Signup);
        assert!(!store.state().error.signup);

        store.set_state(|state| {
            state.error.signup = true;
            state.error.login = true;
        });
        store.clear_error(AuthAction::Signup);

        let state = store.state();
        assert!(!state.error.signup);
        // only the named action is touched
        assert!(state.error.login);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = AuthStore::new(MemoryAuthApi::new());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.set_state(|state| state.loading.login = true);
        assert_eq!(calls.get(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_state(|state| state.loading.login = false);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let store = AuthStore::new(MemoryAuthApi::new());
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let handle = store.clone();
        let own_id = Rc::clone(&slot);
        let id = store.subscribe(move |_| {
            if let Some(id) = own_id.get() {
                handle.unsubscribe(id);
            }
        });
        slot.set(Some(id));

        store.set_state(|state| state.error.login = true);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_handles_compare_by_identity() {
        let store = AuthStore::new(MemoryAuthApi::new());
        assert!(store == store.clone());
        assert!(store != AuthStore::new(MemoryAuthApi::new()));
    }

    #[test]
    fn test_action_flags_by_key() {
        let mut flags = ActionFlags::default();
        flags.set(AuthAction::Login, true);
        assert!(flags.get(AuthAction::Login));
        assert!(!flags.get(AuthAction::Signup));
        assert!(flags.login);
    }
}
