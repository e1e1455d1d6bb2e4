//! Credential redaction for logged URLs and error messages.
//!
//! Directory requests carry the API token as a query parameter, and
//! `reqwest` errors echo the full request URL. Anything that may reach a log
//! line or the terminal goes through [`redact_token`] first.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Placeholder written in place of a token value.
pub const REDACTION_PLACEHOLDER: &str = "[REDACTED]";

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\b(token=)[^&\s"']+"#).expect("token pattern is valid")
    })
}

/// Replace every `token=<value>` occurrence in `text` with a placeholder.
#[must_use]
pub fn redact_token(text: &str) -> Cow<'_, str> {
    token_pattern().replace_all(text, format!("${{1}}{REDACTION_PLACEHOLDER}"))
}
