//! Value Objects

pub mod email;
pub mod nav_path;
pub mod password;
