use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use forms::{LoginPayload, SignupPayload};

use crate::auth::{AuthApi, AuthError};
use crate::models::UserInfo;

#[derive(Clone, Debug)]
struct Account {
    user: UserInfo,
    password: String,
}

/// In-memory AuthApi for testing and offline use.
///
/// Accounts are keyed by email. Clones share the same accounts.
#[derive(Clone, Debug, Default)]
pub struct MemoryAuthApi {
    accounts: Rc<RefCell<HashMap<String, Account>>>,
}

impl MemoryAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.borrow().len()
    }
}

impl AuthApi for MemoryAuthApi {
    async fn signup(&self, payload: SignupPayload) -> Result<UserInfo, AuthError> {
        let mut accounts = self.accounts.borrow_mut();
        if accounts.contains_key(&payload.email) {
            return Err(AuthError::Rejected {
                status: 409,
                message: "An account with this email already exists".to_string(),
            });
        }
        if accounts
            .values()
            .any(|account| account.user.username == payload.username)
        {
            return Err(AuthError::Rejected {
                status: 409,
                message: "Username is already taken".to_string(),
            });
        }

        let user = UserInfo {
            id: format!("user-{}", accounts.len() + 1),
            email: payload.email.clone(),
            username: payload.username,
        };
        accounts.insert(
            payload.email,
            Account {
                user: user.clone(),
                password: payload.password,
            },
        );
        Ok(user)
    }

    async fn login(&self, payload: LoginPayload) -> Result<UserInfo, AuthError> {
        let accounts = self.accounts.borrow();
        match accounts.get(&payload.email) {
            Some(account) if account.password == payload.password => Ok(account.user.clone()),
            _ => Err(AuthError::Rejected {
                status: 401,
                message: "Invalid email or password".to_string(),
            }),
        }
    }
}
