//! Short-ID generation and validation.
//!
//! Generated IDs are drawn uniformly from the 62-character alphabet
//! A-Z a-z 0-9. Generation makes no uniqueness promise; the mapping
//! service checks candidates against the store and the reserved set.

use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;

use crate::config::ShortIdConfig;
use crate::error::AppError;

/// Character class every short ID must match.
static SHORT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Generates a random candidate short ID of the given length.
///
/// Uniform draw with replacement from the 62-character alphanumeric
/// alphabet. Not guaranteed unique on a single call.
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Returns true if `short` equals or starts with any reserved prefix.
pub fn is_reserved(short: &str, reserved_prefixes: &[String]) -> bool {
    reserved_prefixes.iter().any(|p| short.starts_with(p.as_str()))
}

/// Validates a user-provided custom short ID.
///
/// Length is checked first (strictly inside the configured exclusive
/// bounds), then the character class. Uniqueness and reservation are the
/// mapping service's concern.
///
/// # Errors
///
/// Returns [`AppError::InvalidShortFormat`] when either check fails.
pub fn validate_custom_short(short: &str, cfg: &ShortIdConfig) -> Result<(), AppError> {
    let len = short.chars().count();

    if len <= cfg.min_len || len >= cfg.max_len {
        return Err(AppError::invalid_short_format(
            format!(
                "Short ID length must be greater than {} and less than {} characters",
                cfg.min_len, cfg.max_len
            ),
            json!({ "provided_length": len }),
        ));
    }

    if !SHORT_ID_REGEX.is_match(short) {
        return Err(AppError::invalid_short_format(
            "Short ID may only contain latin letters and digits",
            json!({ "short": short }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn policy() -> ShortIdConfig {
        ShortIdConfig::default()
    }

    #[test]
    fn test_generate_has_requested_length() {
        assert_eq!(generate(6).len(), 6);
        assert_eq!(generate(1).len(), 1);
        assert_eq!(generate(15).len(), 15);
    }

    #[test]
    fn test_generate_stays_in_alphabet() {
        for _ in 0..100 {
            let id = generate(6);
            assert!(SHORT_ID_REGEX.is_match(&id), "bad candidate: {id}");
        }
    }

    #[test]
    fn test_generate_produces_varied_candidates() {
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            seen.insert(generate(6));
        }

        // 62^6 candidates; 1000 draws colliding would be astronomical.
        assert!(seen.len() > 990);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let cfg = policy();

        assert!(validate_custom_short("a", &cfg).is_ok());
        assert!(validate_custom_short("abc123", &cfg).is_ok());
        assert!(validate_custom_short(&"x".repeat(15), &cfg).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_lengths() {
        let cfg = policy();

        assert!(validate_custom_short("", &cfg).is_err());
        assert!(validate_custom_short(&"x".repeat(16), &cfg).is_err());
        assert!(validate_custom_short(&"x".repeat(40), &cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        let cfg = policy();

        for bad in ["abc-123", "abc 123", "abc_123", "абв123", "a!b", "a/b"] {
            let err = validate_custom_short(bad, &cfg).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidShortFormat { .. }),
                "expected InvalidShortFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn test_length_is_checked_before_character_class() {
        let cfg = policy();

        // Both checks would fail; the length message must win.
        let err = validate_custom_short(&"-".repeat(20), &cfg).unwrap_err();
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn test_is_reserved_matches_equality_and_prefix() {
        let reserved = vec!["api".to_string(), "files".to_string()];

        assert!(is_reserved("api", &reserved));
        assert!(is_reserved("files", &reserved));
        assert!(is_reserved("api123", &reserved));
        assert!(is_reserved("filesXyz", &reserved));
        assert!(!is_reserved("ap", &reserved));
        assert!(!is_reserved("myapi", &reserved));
        assert!(!is_reserved("abc123", &reserved));
    }
}
