//! Domain Layer
//!
//! Contains entities, value objects, the gate decision table and the
//! service traits the gate depends on.

pub mod decision;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use decision::{Destination, GateDecision, GateRoutes, ProfileFact, SessionFact, decide};
pub use entity::{auth_user::AuthUser, session::Session, session::SignUpOutcome};
pub use repository::{IdentityService, ProfileDirectory};
