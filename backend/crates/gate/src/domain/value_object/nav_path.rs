//! Navigation Path Value Object
//!
//! The path part of a navigation target in a canonical form, so route
//! comparisons are not fooled by a query string, a trailing slash, percent
//! escapes or doubled slashes. The canonical form names the same resource a
//! static file service would resolve for the raw path.

use std::fmt;

use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavPath(String);

impl NavPath {
    /// Normalize a raw path or path-and-query.
    ///
    /// Drops the query and fragment, percent-decodes the rest, then rebuilds
    /// it from its non-empty segments: `.` is skipped and `..` pops the
    /// previous segment. The result always starts with `/` and has no
    /// trailing slash except for the root.
    pub fn new(raw: &str) -> Self {
        let end = raw.find(['?', '#']).unwrap_or(raw.len());
        let decoded = percent_decode_str(&raw[..end]).decode_utf8_lossy();

        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                segment => segments.push(segment),
            }
        }

        Self(format!("/{}", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact match against a route, after normalizing the route too
    pub fn is(&self, route: &str) -> bool {
        self.0 == NavPath::new(route).0
    }

    /// Segment-aware prefix match: `/dashboard` contains `/dashboard` and
    /// `/dashboard/lots`, but not `/dashboards`.
    pub fn is_within(&self, prefix: &str) -> bool {
        let prefix = NavPath::new(prefix);
        if prefix.0 == "/" {
            return true;
        }
        match self.0.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
