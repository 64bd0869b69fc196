//! Short code generation and validation utilities.
//!
//! Random codes are drawn from a per-thread RNG; uniqueness is enforced by the
//! store, not by this module.

use std::sync::LazyLock;

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;

/// Alphabet for generated codes: digits, lowercase, uppercase.
const BASE62: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Upper bound on generation attempts before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10_000;

/// Accepted shape of a custom code.
pub static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_.]{3,50}$").expect("valid custom code regex"));

/// Route names the generator never hands out. Custom codes may still take
/// them; those links resolve through `/shorturls/{code}`.
const RESERVED_CODES: &[&str] = &["health", "shorturls"];

/// Generates a random base62 code of [`GENERATED_CODE_LENGTH`] characters.
///
/// Each character is drawn independently and uniformly from the 62-symbol alphabet.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_CODE_LENGTH)
        .map(|_| BASE62[rng.random_range(0..BASE62.len())] as char)
        .collect()
}

/// Returns true if `code` collides with a root-level service route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-50 characters
/// - Allowed characters: ASCII letters, digits, `-`, `_`, `.`
///
/// Codes are compared byte-exact; no trimming or case folding is applied.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "shortcode must be alphanumeric (and -_. allowed) and length 3-50",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_base62_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_covers_alphabet_cases() {
        let joined: String = (0..500).map(|_| generate_code()).collect();

        assert!(joined.chars().any(|c| c.is_ascii_digit()));
        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_code_mostly_unique() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // 62^6 candidates; a handful of birthday collisions at most.
        assert!(codes.len() >= 995);
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("ab").is_err());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code(&"a".repeat(50)).is_ok());
        assert!(validate_custom_code(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_allowed_punctuation() {
        assert!(validate_custom_code("my-code_v1.2").is_ok());
        assert!(validate_custom_code("-._").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_kept() {
        assert!(validate_custom_code("MyCode").is_ok());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("code@1").is_err());
        assert!(validate_custom_code("path/seg").is_err());
    }

    #[test]
    fn test_validate_accepts_route_names() {
        for &name in RESERVED_CODES {
            assert!(validate_custom_code(name).is_ok(), "'{}' should be valid", name);
            assert!(is_reserved_code(name));
        }
    }

    #[test]
    fn test_validate_error_message() {
        let err = validate_custom_code("x").unwrap_err();
        assert!(err.to_string().contains("length 3-50"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }
}
