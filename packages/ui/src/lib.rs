//! This crate contains all shared UI for the workspace.

pub mod components;
pub mod views;

mod auth;
pub use auth::{
    http_auth_store, memory_auth_store, use_auth, AuthBackend, AuthContext, AuthProvider,
    SharedAuthStore,
};

pub mod toast;
pub use toast::{toast, toast_error, use_toasts, ToastLevel, ToastProvider, ToastQueue};

pub use views::{LoginView, SignupView, SUBMISSION_FAILED};
