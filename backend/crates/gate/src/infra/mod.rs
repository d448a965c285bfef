//! Infrastructure Layer
//!
//! Auth service client and database lookups.

pub mod identity_http;
pub mod postgres;

pub use identity_http::HttpIdentityService;
pub use postgres::PgProfileDirectory;
