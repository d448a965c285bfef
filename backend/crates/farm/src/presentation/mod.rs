//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::FarmAppState;
pub use router::{farm_router, farm_router_generic};
