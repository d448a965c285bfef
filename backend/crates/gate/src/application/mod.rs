//! Application Layer
//!
//! Use cases and application services.

pub mod auth_callback;
pub mod config;
pub mod evaluate_gate;
pub mod resolve_session;
pub mod session_cookies;
pub mod session_status;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use auth_callback::{AuthCallbackUseCase, CallbackOutput};
pub use config::{GateConfig, IdentityServiceConfig};
pub use evaluate_gate::{EvaluateGateUseCase, GateOutcome};
pub use resolve_session::{ResolveSessionUseCase, SessionResolution};
pub use session_status::{SessionStatusOutput, SessionStatusUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
