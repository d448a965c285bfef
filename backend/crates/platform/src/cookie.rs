//! Cookie Management Infrastructure
//!
//! Reading request cookies and accumulating cookie mutations.
//!
//! Mutations produced while a request is evaluated (token refresh, sign-out,
//! PKCE verifier handling) are collected in [`PendingCookies`] and applied once
//! to the single outgoing response, and optionally to the forwarded request so
//! that downstream handlers see the refreshed values.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every cookie this service writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieAttributes {
    /// Plain-HTTP development setup
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Self::default()
        }
    }

    fn write_suffix(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie.push_str("; Path=");
        cookie.push_str(&self.path);
    }
}

/// A single change to the client's cookie jar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieMutation {
    Set {
        name: String,
        value: String,
        max_age_secs: Option<i64>,
    },
    Remove {
        name: String,
    },
}

impl CookieMutation {
    pub fn name(&self) -> &str {
        match self {
            CookieMutation::Set { name, .. } | CookieMutation::Remove { name } => name,
        }
    }

    /// Render as a `Set-Cookie` header value
    pub fn to_set_cookie(&self, attributes: &CookieAttributes) -> String {
        match self {
            CookieMutation::Set {
                name,
                value,
                max_age_secs,
            } => {
                let mut cookie = format!("{}={}", name, value);
                attributes.write_suffix(&mut cookie);
                if let Some(max_age) = max_age_secs {
                    cookie.push_str(&format!("; Max-Age={}", max_age));
                }
                cookie
            }
            CookieMutation::Remove { name } => {
                let mut cookie = format!("{}=", name);
                attributes.write_suffix(&mut cookie);
                cookie.push_str("; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
                cookie
            }
        }
    }
}

/// Cookie mutations collected during request evaluation
#[derive(Debug, Clone, Default)]
pub struct PendingCookies {
    attributes: CookieAttributes,
    mutations: Vec<CookieMutation>,
}

impl PendingCookies {
    pub fn new(attributes: CookieAttributes) -> Self {
        Self {
            attributes,
            mutations: Vec::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>, max_age_secs: Option<i64>) {
        self.mutations.push(CookieMutation::Set {
            name: name.into(),
            value: value.into(),
            max_age_secs,
        });
    }

    pub fn remove(&mut self, name: impl Into<String>) {
        self.mutations.push(CookieMutation::Remove { name: name.into() });
    }

    /// Append another batch; later mutations win when names collide.
    pub fn extend(&mut self, other: PendingCookies) {
        self.mutations.extend(other.mutations);
    }

    /// Append one `Set-Cookie` header per mutation.
    ///
    /// Values that cannot be encoded as a header are skipped.
    pub fn apply_to_response(&self, headers: &mut HeaderMap) {
        for mutation in &self.mutations {
            if let Ok(value) = HeaderValue::from_str(&mutation.to_set_cookie(&self.attributes)) {
                headers.append(header::SET_COOKIE, value);
            }
        }
    }

    /// Rewrite the request `Cookie` header as if the mutations had already
    /// reached the browser.
    pub fn apply_to_request(&self, headers: &mut HeaderMap) {
        if self.mutations.is_empty() {
            return;
        }

        let mut pairs = parse_cookies(headers);
        for mutation in &self.mutations {
            pairs.retain(|(name, _)| name != mutation.name());
            if let CookieMutation::Set { name, value, .. } = mutation {
                pairs.push((name.clone(), value.clone()));
            }
        }

        headers.remove(header::COOKIE);
        if pairs.is_empty() {
            return;
        }

        let joined = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        if let Ok(value) = HeaderValue::from_str(&joined) {
            headers.insert(header::COOKIE, value);
        }
    }
}

/// All `name=value` pairs of the request, in header order
pub fn parse_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Extract a non-empty cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    parse_cookies(headers)
        .into_iter()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_headers(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn test_extract_cookie() {
        let headers = request_headers("theme=dark; sb-access-token=abc123; empty=");

        assert_eq!(
            extract_cookie(&headers, "sb-access-token"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_set_cookie_rendering() {
        let attributes = CookieAttributes::default();
        let set = CookieMutation::Set {
            name: "sb-access-token".to_string(),
            value: "tok".to_string(),
            max_age_secs: Some(3600),
        };
        assert_eq!(
            set.to_set_cookie(&attributes),
            "sb-access-token=tok; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=3600"
        );

        let remove = CookieMutation::Remove {
            name: "sb-access-token".to_string(),
        };
        let rendered = remove.to_set_cookie(&CookieAttributes::development());
        assert!(rendered.starts_with("sb-access-token=; HttpOnly; SameSite=Lax"));
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn test_apply_to_response_appends_every_mutation() {
        let mut pending = PendingCookies::new(CookieAttributes::default());
        pending.set("a", "1", None);
        pending.remove("b");

        let mut headers = HeaderMap::new();
        headers.insert(header::SET_COOKIE, HeaderValue::from_static("existing=1"));
        pending.apply_to_response(&mut headers);

        let values: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], "existing=1");
    }

    #[test]
    fn test_apply_to_request_replaces_and_removes() {
        let mut headers = request_headers("keep=1; access=old; refresh=r1");

        let mut pending = PendingCookies::new(CookieAttributes::default());
        pending.set("access", "new", Some(60));
        pending.remove("refresh");
        pending.apply_to_request(&mut headers);

        assert_eq!(extract_cookie(&headers, "access"), Some("new".to_string()));
        assert_eq!(extract_cookie(&headers, "keep"), Some("1".to_string()));
        assert_eq!(extract_cookie(&headers, "refresh"), None);
    }

    #[test]
    fn test_later_mutation_wins() {
        let mut headers = HeaderMap::new();
        let mut first = PendingCookies::new(CookieAttributes::default());
        first.set("access", "one", None);
        let mut second = PendingCookies::new(CookieAttributes::default());
        second.set("access", "two", None);
        first.extend(second);

        first.apply_to_request(&mut headers);
        assert_eq!(extract_cookie(&headers, "access"), Some("two".to_string()));
    }
}
