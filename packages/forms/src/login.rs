//! Login form model and schema.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::form::FormModel;
use crate::schema::{FieldErrors, Schema};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub const fn name(self) -> &'static str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginValues {
    type Field = LoginField;

    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn set_value(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Presence checks only; credentials are judged by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoginSchema;

impl Schema<LoginValues> for LoginSchema {
    type Output = LoginPayload;

    fn validate(&self, values: &LoginValues) -> Result<LoginPayload, FieldErrors<LoginField>> {
        let mut errors = FieldErrors::new();

        if values.email.is_empty() {
            errors.insert(LoginField::Email, "Email is required.");
        } else if !values.email.validate_email() {
            errors.insert(LoginField::Email, "Please enter a valid email address.");
        }
        if values.password.is_empty() {
            errors.insert(LoginField::Password, "Password is required.");
        }

        if errors.is_empty() {
            Ok(LoginPayload {
                email: values.email.clone(),
                password: values.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}
