//! Infrastructure Layer
//!
//! Database implementations of the farm repositories.

pub mod postgres;

pub use postgres::PgFarmRepository;
