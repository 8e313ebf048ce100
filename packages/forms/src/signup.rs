//! # Signup form model and registration schema
//!
//! [`SignupValues`] is what the inputs hold, [`SignupPayload`] is what the auth
//! store receives once [`RegisterUserSchema`] accepts the values. The payload
//! keeps `confirmPassword` so the server can run the same rules.
//!
//! Field order matters: [`SignupField`] declares email, username, password,
//! confirmPassword, gender, and that is the order in which the view looks for
//! the field to focus after a rejected submit.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::form::{FormModel, FormState};
use crate::schema::{FieldErrors, Schema};

/// Shown under an empty confirm-password input after a submit attempt,
/// whatever the schema says about it.
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Password is required.";

static USERNAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupField {
    Email,
    Username,
    Password,
    ConfirmPassword,
    Gender,
}

impl SignupField {
    /// Input `name` attribute, matching the payload's wire name.
    pub const fn name(self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Username => "username",
            SignupField::Password => "password",
            SignupField::ConfirmPassword => "confirmPassword",
            SignupField::Gender => "gender",
        }
    }

    /// Name of the matching [`SignupValues`] field in validation reports.
    const fn rule_key(self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Username => "username",
            SignupField::Password => "password",
            SignupField::ConfirmPassword => "confirm_password",
            SignupField::Gender => "gender",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SignupField::Email => "Email",
            SignupField::Username => "Username",
            SignupField::Password => "Password",
            SignupField::ConfirmPassword => "Confirm Password",
            SignupField::Gender => "Gender",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

/// Raw input values. All empty on mount.
///
/// The derived rules only run on non-empty input; [`RegisterUserSchema`]
/// reports missing values itself so each field gets its "required" wording.
#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct SignupValues {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters."))]
    #[validate(regex(
        path = "*USERNAME_CHARSET",
        message = "Username may only contain letters, numbers and underscores."
    ))]
    pub username: String,

    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters."))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
            "Password must contain an uppercase letter, a lowercase letter and a number.",
        )))
    }
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    match Gender::parse(gender) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("gender")
            .with_message(Cow::Borrowed("Please select a gender."))),
    }
}

impl FormModel for SignupValues {
    type Field = SignupField;

    const FIELDS: &'static [SignupField] = &[
        SignupField::Email,
        SignupField::Username,
        SignupField::Password,
        SignupField::ConfirmPassword,
        SignupField::Gender,
    ];

    fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Email => &self.email,
            SignupField::Username => &self.username,
            SignupField::Password => &self.password,
            SignupField::ConfirmPassword => &self.confirm_password,
            SignupField::Gender => &self.gender,
        }
    }

    fn set_value(&mut self, field: SignupField, value: String) {
        match field {
            SignupField::Email => self.email = value,
            SignupField::Username => self.username = value,
            SignupField::Password => self.password = value,
            SignupField::ConfirmPassword => self.confirm_password = value,
            SignupField::Gender => self.gender = value,
        }
    }
}

/// Validated registration data handed to the auth store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: Gender,
}

/// Registration rules shared by the signup view and the server.
///
/// Empty fields get a "required" message; everything else comes from the
/// rules declared on [`SignupValues`]. Only the first message per field is
/// kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegisterUserSchema;

impl RegisterUserSchema {
    fn required_message(field: SignupField) -> &'static str {
        match field {
            SignupField::Email => "Email is required.",
            SignupField::Username => "Username is required.",
            SignupField::Password => "Password is required.",
            SignupField::ConfirmPassword => "Please confirm your password.",
            SignupField::Gender => "Please select a gender.",
        }
    }
}

impl Schema<SignupValues> for RegisterUserSchema {
    type Output = SignupPayload;

    fn validate(&self, values: &SignupValues) -> Result<SignupPayload, FieldErrors<SignupField>> {
        let mut errors = FieldErrors::new();

        for &field in SignupValues::FIELDS {
            if values.value(field).is_empty() {
                errors.insert(field, Self::required_message(field));
            }
        }

        if let Err(report) = values.validate() {
            let by_field = report.field_errors();
            for &field in SignupValues::FIELDS {
                let first = by_field.iter().find_map(|(key, list)| {
                    let key: &str = key.as_ref();
                    (key == field.rule_key()).then(|| list.first()).flatten()
                });
                let Some(first) = first else {
                    continue;
                };
                let message = first
                    .message
                    .as_deref()
                    .unwrap_or_else(|| first.code.as_ref());
                errors.insert(field, message);
            }
        }

        match Gender::parse(&values.gender) {
            Some(gender) if errors.is_empty() => Ok(SignupPayload {
                email: values.email.clone(),
                username: values.username.clone(),
                password: values.password.clone(),
                confirm_password: values.confirm_password.clone(),
                gender,
            }),
            _ => Err(errors),
        }
    }
}

/// Message to render under the confirm-password input.
///
/// An empty field after a submit always reads [`CONFIRM_PASSWORD_REQUIRED`];
/// otherwise the schema's message, if any.
pub fn confirm_password_feedback<S>(form: &FormState<SignupValues, S>) -> Option<&str> {
    if form.is_submitted() && form.values().confirm_password.is_empty() {
        Some(CONFIRM_PASSWORD_REQUIRED)
    } else {
        form.error(SignupField::ConfirmPassword)
    }
}

/// Whether the confirm-password input is drawn as invalid.
pub fn confirm_password_invalid<S>(form: &FormState<SignupValues, S>) -> bool {
    form.has_error(SignupField::ConfirmPassword)
        || (form.is_submitted() && form.values().confirm_password.is_empty())
}
