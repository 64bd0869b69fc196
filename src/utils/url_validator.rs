//! Redirect target validation.
//!
//! Targets are stored exactly as submitted; this module only decides whether
//! they are acceptable.

use url::Url;

/// Maximum accepted length of a redirect target, in characters.
pub const MAX_URL_LENGTH: usize = 2000;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be blank")]
    Blank,

    #[error("URL must be at most {MAX_URL_LENGTH} characters, got {0}")]
    TooLong(usize),

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a usable redirect target.
///
/// # Rules
///
/// 1. **Presence**: Not empty or whitespace only
/// 2. **Length**: At most [`MAX_URL_LENGTH`] characters
/// 3. **Characters**: No control characters
/// 4. **Protocol**: Only HTTP and HTTPS are allowed
/// 5. **Host**: An absolute URL with a host
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns the first violated rule as a [`UrlValidationError`].
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Blank);
    }

    let length = input.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(length));
    }

    // The parser silently drops tabs and newlines, but the raw input is stored.
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple_https() {
        assert!(validate_target_url("https://example.com").is_ok());
    }

    #[test]
    fn test_validate_with_path_query_fragment() {
        assert!(validate_target_url("http://example.com:8080/a/b?q=1#top").is_ok());
    }

    #[test]
    fn test_validate_blank() {
        assert!(matches!(
            validate_target_url("   "),
            Err(UrlValidationError::Blank)
        ));
    }

    #[test]
    fn test_validate_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_target_url(&url),
            Err(UrlValidationError::TooLong(_))
        ));
    }

    #[test]
    fn test_validate_exact_limit() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert!(validate_target_url(&url).is_ok());
    }

    #[test]
    fn test_validate_relative_url() {
        assert!(matches!(
            validate_target_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_javascript_scheme() {
        assert!(matches!(
            validate_target_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_validate_control_characters() {
        assert!(matches!(
            validate_target_url("https://example.com/a\nb"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_ftp_scheme() {
        assert!(validate_target_url("ftp://example.com/file").is_err());
    }
}
