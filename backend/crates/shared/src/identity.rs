//! Authenticated identity
//!
//! The session gate resolves the caller against the auth service and stores a
//! [`CurrentUser`] in the request extensions. Feature handlers read it from
//! there without knowing anything about tokens or cookies.

use serde::Serialize;

use crate::id::UserId;

/// The user behind the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub email_confirmed: bool,
}

impl CurrentUser {
    pub fn new(user_id: UserId, email: Option<String>, email_confirmed: bool) -> Self {
        Self {
            user_id,
            email,
            email_confirmed,
        }
    }
}
