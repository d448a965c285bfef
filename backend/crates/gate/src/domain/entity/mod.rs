//! Domain Entities

pub mod auth_user;
pub mod session;
