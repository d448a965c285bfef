//! Application Configuration
//!
//! Configuration for the gate and for the auth service client.

use std::time::Duration;

use platform::cookie::{CookieAttributes, PendingCookies};

use crate::domain::decision::GateRoutes;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub routes: GateRoutes,
    /// Public origin of the site, used to build the confirmation link target
    pub site_url: String,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// PKCE verifier kept between sign-up and the confirmation callback
    pub verifier_cookie_name: String,
    pub cookie: CookieAttributes,
    /// Access cookie lifetime when the auth service does not report one
    pub access_cookie_ttl: Duration,
    pub refresh_cookie_ttl: Duration,
    pub verifier_cookie_ttl: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            routes: GateRoutes::default(),
            site_url: "http://localhost:3000".to_string(),
            access_cookie_name: "sb-access-token".to_string(),
            refresh_cookie_name: "sb-refresh-token".to_string(),
            verifier_cookie_name: "sb-code-verifier".to_string(),
            cookie: CookieAttributes::default(),
            access_cookie_ttl: Duration::from_secs(3600), // 1 hour
            refresh_cookie_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            // the confirmation email may sit in the inbox for a while
            verifier_cookie_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl GateConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie: CookieAttributes::development(),
            ..Default::default()
        }
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Empty mutation batch carrying this config's cookie attributes
    pub fn pending_cookies(&self) -> PendingCookies {
        PendingCookies::new(self.cookie.clone())
    }

    /// Absolute URL of the auth callback page
    pub fn callback_url(&self) -> String {
        format!(
            "{}{}",
            self.site_url.trim_end_matches('/'),
            self.routes.callback
        )
    }

    /// Login page with the callback failure marker
    pub fn login_error_path(&self) -> String {
        format!("{}?error=callback", self.routes.login)
    }
}

/// Auth service connection settings
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    /// Project URL; endpoints live under `/auth/v1`
    pub base_url: String,
    /// Public API key sent as the `apikey` header
    pub anon_key: String,
}

impl IdentityServiceConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
