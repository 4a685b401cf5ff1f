//! Redaction of credentials and personal data before they reach the logs.

use std::fmt;

use lazy_regex::regex;
use regex::Captures;

/// Masks emails, compact JWTs, and other long opaque tokens.
///
/// Emails keep the first character of the local part and the full domain.
/// JWTs are matched before generic tokens so the dots don't split them.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]+\b").replace_all(
        input,
        |caps: &Captures| {
            let m = &caps[0];
            match m.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    format!("{}***@{domain}", &local[..1])
                }
                _ => m.to_string(),
            }
        },
    );

    let jwts = regex!(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b")
        .replace_all(&emails, "[REDACTED_JWT]");

    regex!(r"\b[A-Za-z0-9+/_-]{24,}={0,2}")
        .replace_all(&jwts, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
