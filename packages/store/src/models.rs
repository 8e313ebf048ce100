//! User model shared between the auth store and the API client.

use serde::{Deserialize, Serialize};

/// Account information returned by the backend after signup or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl UserInfo {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}
