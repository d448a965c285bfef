//! Session Gate Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Gate decision table, entities, service traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Auth service client, profile lookup
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Page navigation gate: verify email, complete profile, login, dashboard
//! - Session resolution with transparent token refresh
//! - Sign up (PKCE confirmation link), sign in, sign out, session status
//! - Auth callback that redeems the confirmation link
//!
//! ## Security Model
//! - Tokens are issued and validated by the external auth service only
//! - Session and verifier cookies are HttpOnly, SameSite=Lax, Secure outside development
//! - Auth service outages never lock users out of pages; JSON routes answer 5xx

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{GateConfig, IdentityServiceConfig};
pub use error::{GateError, GateResult};
pub use infra::{HttpIdentityService, PgProfileDirectory};
pub use presentation::router::{auth_router, callback_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
