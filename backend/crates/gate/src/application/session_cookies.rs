//! Session cookie writes shared by the use cases

use platform::cookie::PendingCookies;

use crate::application::config::GateConfig;
use crate::domain::entity::session::Session;

/// Queue both token cookies for a freshly issued session
pub fn store_session(config: &GateConfig, session: &Session, cookies: &mut PendingCookies) {
    let access_ttl = session.expires_in.unwrap_or(config.access_cookie_ttl);
    cookies.set(
        &config.access_cookie_name,
        &session.access_token,
        Some(access_ttl.as_secs() as i64),
    );
    cookies.set(
        &config.refresh_cookie_name,
        &session.refresh_token,
        Some(config.refresh_cookie_ttl.as_secs() as i64),
    );
}

/// Queue removal of both token cookies
pub fn clear_session(config: &GateConfig, cookies: &mut PendingCookies) {
    cookies.remove(&config.access_cookie_name);
    cookies.remove(&config.refresh_cookie_name);
}
