//! # Forms — schema-driven form state shared by the auth views
//!
//! The crate has no UI dependency. It owns the pieces of a form that can be
//! reasoned about without a renderer:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`form`] | [`FormModel`] trait and the [`FormState`] controller (values, submit count, errors, first invalid field). |
//! | [`schema`] | [`Schema`] trait and the ordered [`FieldErrors`] mapping it produces. |
//! | [`signup`] | Signup fields, values, typed payload and [`RegisterUserSchema`]. |
//! | [`login`] | Login fields, values, typed payload and [`LoginSchema`]. |
//!
//! Schemas are pure functions from the raw form values to either a typed payload
//! or a field error mapping, so the same rules can be run by a server.

pub mod form;
pub mod login;
pub mod schema;
pub mod signup;

pub use form::{FormModel, FormState, ReValidateMode, SubmitOutcome};
pub use login::{LoginField, LoginPayload, LoginSchema, LoginValues};
pub use schema::{FieldErrors, Schema};
pub use signup::{
    confirm_password_feedback, confirm_password_invalid, Gender, RegisterUserSchema,
    SignupField, SignupPayload, SignupValues, CONFIRM_PASSWORD_REQUIRED,
};
