// Helper functions for safe logging and serialization

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// use neurodetect_api::common::safe_email_log;
/// assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            let first = parts[0].chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```
/// use neurodetect_api::common::helpers::safe_token_log;
/// assert_eq!(safe_token_log("eyJhbGciOiJIUzI1NiJ9"), "eyJh...NiJ9");
/// ```
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Deserializes a JSON field that should be a string.
/// Anything that is not a string (null, numbers, objects...) becomes `None`,
/// so it fails the same "required" check as a missing field.
pub fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Lowercases the domain part of an email address.
/// The local part is left alone; addresses without `@` are returned as-is.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// NFKC form of a username, so visually identical names collide
///
/// # Example
/// ```
/// use neurodetect_api::common::helpers::normalize_username;
/// assert_eq!(normalize_username("\u{FB01}le"), "file");
/// ```
pub fn normalize_username(username: &str) -> String {
    username.nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
        assert_eq!(safe_email_log("a@b"), "***@***.***");
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
    }

    #[test]
    fn test_safe_token_log() {
        assert_eq!(safe_token_log("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(safe_token_log("short"), "***");
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("John.Doe@Example.COM"), "John.Doe@example.com");
        assert_eq!(normalize_email("weird@name@HOST.org"), "weird@name@host.org");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn test_normalize_email_keeps_values_without_at_sign() {
        assert_eq!(normalize_email("   "), "   ");
        assert_eq!(normalize_email(" no-at-sign "), " no-at-sign ");
        assert_eq!(normalize_email(" a@B.io "), "a@b.io");
    }

    #[test]
    fn test_normalize_username_uses_nfkc() {
        assert_eq!(normalize_username("jane"), "jane");
        // Fullwidth letters and the "fi" ligature fold to ASCII
        assert_eq!(normalize_username("\u{FF4A}ane"), "jane");
        assert_eq!(normalize_username("\u{FB01}le"), "file");
        // Combining acute accent composes
        assert_eq!(normalize_username("e\u{301}"), "\u{e9}");
    }
}
