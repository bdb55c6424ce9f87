//! Cross-origin allow-list.
//!
//! Entries are either exact origins (`https://admin.example.com`) or wildcard
//! host patterns (`https://*.example.com`, or `*.example.com` for any
//! scheme). A wildcard matches any origin whose host ends with the part after
//! the `*`, dot included, so `https://*.example.com` allows
//! `https://app.example.com` but not `https://example.com` or
//! `https://badexample.com`.

use std::collections::HashSet;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "https://admin.aibuildhubs.com",
    "https://api.aibuildhubs.com",
    "https://mail-order-helper-enterprise.web.app",
    "https://*.cloudshell.dev",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct WildcardOrigin {
    /// `Some("https://")` when the entry pins a scheme
    scheme: Option<String>,
    /// Host suffix including the leading dot, e.g. `.cloudshell.dev`
    host_suffix: String,
}

impl WildcardOrigin {
    fn parse(entry: &str) -> Option<Self> {
        let (scheme, host) = match entry.split_once("://") {
            Some((scheme, host)) => (Some(format!("{scheme}://")), host),
            None => (None, entry),
        };
        let suffix = host.strip_prefix('*')?;
        if !suffix.starts_with('.') || suffix.len() < 2 || suffix.contains('*') {
            return None;
        }
        Some(Self {
            scheme,
            host_suffix: suffix.to_string(),
        })
    }

    fn matches(&self, origin: &str) -> bool {
        let host = match (&self.scheme, origin.split_once("://")) {
            (Some(scheme), _) => match origin.strip_prefix(scheme.as_str()) {
                Some(host) => host,
                None => return false,
            },
            (None, Some((_, host))) => host,
            (None, None) => origin,
        };
        host.len() > self.host_suffix.len() && host.ends_with(&self.host_suffix)
    }
}

/// Immutable set of allowed caller origins, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct OriginAllowlist {
    exact: HashSet<String>,
    wildcards: Vec<WildcardOrigin>,
}

impl OriginAllowlist {
    /// Build from entries. Entries are trimmed and lowercased, trailing `/`
    /// is dropped, and empty, `null`, or unparseable wildcard entries are
    /// ignored.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for entry in entries {
            let entry = Self::normalize(entry.as_ref());
            if entry.is_empty() || entry == "null" {
                continue;
            }
            if entry.contains('*') {
                if let Some(wildcard) = WildcardOrigin::parse(&entry) {
                    list.wildcards.push(wildcard);
                }
            } else {
                list.exact.insert(entry);
            }
        }
        list
    }

    /// Parse a comma-separated list; `None` if it holds no usable entry.
    pub fn from_csv(raw: &str) -> Option<Self> {
        let list = Self::new(raw.split(','));
        if list.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS.iter())
    }

    /// Whether `origin` may receive `Access-Control-Allow-Origin`.
    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = Self::normalize(origin);
        if origin.is_empty() || origin == "null" {
            return false;
        }
        self.exact.contains(&origin) || self.wildcards.iter().any(|w| w.matches(&origin))
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn normalize(origin: &str) -> String {
        origin.trim().trim_end_matches('/').to_ascii_lowercase()
    }
}
