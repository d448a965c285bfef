//! Gate Decision Table
//!
//! Pure routing rules for page navigations. Given the normalized path and
//! the facts gathered about the caller, decide whether the navigation passes
//! through or is redirected to one of the on-boarding funnel steps.
//!
//! Rules, first match wins:
//! 1. Callback and exempt prefixes pass through untouched.
//! 2. Session with unconfirmed email, off the verification page: verify email.
//! 3. Confirmed session without a profile, off the completion page: complete profile.
//! 4. No session inside the protected area: login.
//! 5. Session on login or register: dashboard.
//! 6. Anything else passes through.

use derive_more::Display;

use crate::domain::value_object::nav_path::NavPath;

/// Redirect targets of the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Destination {
    #[display("verify-email")]
    VerifyEmail,
    #[display("complete-profile")]
    CompleteProfile,
    #[display("login")]
    Login,
    #[display("dashboard")]
    Dashboard,
}

/// What is known about the caller's profile record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFact {
    Exists,
    Missing,
    /// Lookup failed; never treated as missing
    Unknown,
}

/// What is known about the caller's session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFact {
    Absent,
    /// Email confirmation is checked before the profile, so no profile
    /// fact exists for an unconfirmed session.
    Unconfirmed,
    Confirmed(ProfileFact),
}

impl SessionFact {
    pub fn is_present(&self) -> bool {
        !matches!(self, SessionFact::Absent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    Redirect(Destination),
}

/// Page routes the gate knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRoutes {
    pub callback: String,
    pub verify_email: String,
    pub complete_profile: String,
    pub login: String,
    pub register: String,
    pub dashboard: String,
    /// Root of the area that requires a session
    pub protected_prefix: String,
    /// Prefixes the gate never evaluates (API, static assets)
    pub exempt_prefixes: Vec<String>,
}

impl Default for GateRoutes {
    fn default() -> Self {
        Self {
            callback: "/auth/callback".to_string(),
            verify_email: "/verify-email".to_string(),
            complete_profile: "/complete-profile".to_string(),
            login: "/login".to_string(),
            register: "/register".to_string(),
            dashboard: "/dashboard".to_string(),
            protected_prefix: "/dashboard".to_string(),
            exempt_prefixes: vec![
                "/api".to_string(),
                "/assets".to_string(),
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/favicon.ico".to_string(),
            ],
        }
    }
}

impl GateRoutes {
    pub fn path(&self, destination: Destination) -> &str {
        match destination {
            Destination::VerifyEmail => &self.verify_email,
            Destination::CompleteProfile => &self.complete_profile,
            Destination::Login => &self.login,
            Destination::Dashboard => &self.dashboard,
        }
    }

    /// Rule 1: paths that are never evaluated and cost no service calls
    pub fn is_bypassed(&self, path: &NavPath) -> bool {
        path.is(&self.callback)
            || self
                .exempt_prefixes
                .iter()
                .any(|prefix| path.is_within(prefix))
    }

    /// Whether the profile fact can change the outcome for this path.
    ///
    /// Lets the caller skip the profile lookup on the completion page.
    pub fn needs_profile(&self, path: &NavPath) -> bool {
        !path.is(&self.complete_profile)
    }
}

/// Apply the routing rules
pub fn decide(path: &NavPath, session: SessionFact, routes: &GateRoutes) -> GateDecision {
    if routes.is_bypassed(path) {
        return GateDecision::PassThrough;
    }

    match session {
        SessionFact::Unconfirmed if !path.is(&routes.verify_email) => {
            return GateDecision::Redirect(Destination::VerifyEmail);
        }
        SessionFact::Confirmed(ProfileFact::Missing) if !path.is(&routes.complete_profile) => {
            return GateDecision::Redirect(Destination::CompleteProfile);
        }
        SessionFact::Absent if path.is_within(&routes.protected_prefix) => {
            return GateDecision::Redirect(Destination::Login);
        }
        _ => {}
    }

    if session.is_present() && (path.is(&routes.login) || path.is(&routes.register)) {
        return GateDecision::Redirect(Destination::Dashboard);
    }

    GateDecision::PassThrough
}
