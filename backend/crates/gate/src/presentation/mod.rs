//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::GateAppState;
pub use middleware::{
    GateMiddlewareState, require_user, session_gate, with_required_user, with_session_gate,
};
pub use router::{auth_router, auth_router_generic, callback_router};
