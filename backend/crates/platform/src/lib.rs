//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the bounded contexts:
//! - Cookie parsing and accumulated `Set-Cookie` mutations
//! - Crypto helpers (SHA-256, base64url, PKCE verifier/challenge pairs)
//! - Outbound HTTP client construction

pub mod cookie;
pub mod crypto;
pub mod http_client;
