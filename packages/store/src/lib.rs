//! # Store — client-side auth state
//!
//! Holds everything the auth views read but do not own:
//!
//! - [`AuthStore`]: an observable container for [`AuthState`] with explicit
//!   [`AuthStore::subscribe`] / [`AuthStore::unsubscribe`], a generic
//!   [`AuthStore::set_state`], and the `user_signup` / `user_login` actions.
//! - [`AuthApi`]: the seam to the backend. [`MemoryAuthApi`] keeps accounts in
//!   memory; the `api` crate provides the HTTP implementation.
//! - [`ClientConfig`]: `client.toml` settings for the front-end.

pub mod auth;
pub mod config;
pub mod models;

mod memory;
pub use memory::MemoryAuthApi;

pub use auth::{ActionFlags, AuthAction, AuthApi, AuthError, AuthState, AuthStore, SubscriptionId};
pub use config::ClientConfig;
pub use models::UserInfo;
