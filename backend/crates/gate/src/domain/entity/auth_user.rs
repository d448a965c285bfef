//! Auth User Entity
//!
//! The user record as reported by the external auth service. The gate only
//! reads it; the service owns every field.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::identity::CurrentUser;

use crate::domain::value_object::email::Email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<Email>,
    /// Set once the user followed the confirmation link
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn new(id: UserId, email: Option<Email>, email_confirmed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            email,
            email_confirmed_at,
        }
    }

    pub fn is_email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    /// Identity handed to downstream handlers
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser::new(
            self.id,
            self.email.as_ref().map(|email| email.as_str().to_string()),
            self.is_email_confirmed(),
        )
    }
}
