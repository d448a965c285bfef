//! Shared Kernel
//!
//! Vocabulary shared by every bounded context of the producer portal:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers for users, productions and coffee lots
//! - The authenticated identity handed from the session gate to feature handlers
//!
//! Only things with the same meaning in every context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod identity;
