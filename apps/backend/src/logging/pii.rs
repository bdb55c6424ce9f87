//! Redaction of caller data in log fields.
//!
//! Emails keep their first character and domain (`b***@example.com`).
//! JWT-shaped strings and long opaque tokens become `[REDACTED_TOKEN]`.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b").unwrap()
});

static JWT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

static OPAQUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9+/_-]{32,}={0,2}").unwrap()
});

pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &Captures| format!("{}***{}", &caps[1], &caps[2]));
    let masked = JWT.replace_all(&masked, "[REDACTED_TOKEN]");
    OPAQUE_TOKEN
        .replace_all(&masked, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Formats the wrapped string through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
