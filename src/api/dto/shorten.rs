//! DTOs for the short URL creation endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::code_generator::CUSTOM_CODE_REGEX;

/// Request to create one short mapping.
///
/// Both camelCase aliases (`validityMinutes`, `customCode`) are accepted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// Redirect target; must be an absolute http/https URL.
    #[validate(length(min = 1, max = 2000, message = "url must be 1-2000 characters"))]
    pub url: String,

    /// Lifetime in minutes. Defaults to 30.
    #[serde(default, alias = "validityMinutes")]
    #[validate(range(min = 1, message = "validity must be at least 1 minute"))]
    pub validity: Option<i64>,

    /// Owner-chosen code. An empty string means "generate one".
    #[serde(default, alias = "customCode")]
    #[validate(custom(function = validate_shortcode_field))]
    pub shortcode: Option<String>,
}

fn validate_shortcode_field(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || CUSTOM_CODE_REGEX.is_match(code) {
        return Ok(());
    }

    Err(ValidationError::new("shortcode").with_message(
        "shortcode must be alphanumeric (and -_. allowed) and length 3-50".into(),
    ))
}

/// Created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    /// ISO-8601 UTC instant after which the link stops redirecting.
    pub expiry: String,
}

impl CreateShortUrlResponse {
    pub fn new(short_link: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            short_link,
            expiry: expires_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CreateShortUrlRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_minimal_request() {
        let request = parse(json!({ "url": "https://example.com" }));

        assert!(request.validate().is_ok());
        assert!(request.validity.is_none());
        assert!(request.shortcode.is_none());
    }

    #[test]
    fn accepts_camel_case_aliases() {
        let request = parse(json!({
            "url": "https://example.com",
            "validityMinutes": 5,
            "customCode": "my-code"
        }));

        assert!(request.validate().is_ok());
        assert_eq!(request.validity, Some(5));
        assert_eq!(request.shortcode.as_deref(), Some("my-code"));
    }

    #[test]
    fn rejects_zero_validity() {
        let request = parse(json!({ "url": "https://example.com", "validity": 0 }));

        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_bad_shortcode() {
        for code in ["ab", "has space", "sl/ash"] {
            let request = parse(json!({ "url": "https://example.com", "shortcode": code }));
            assert!(request.validate().is_err(), "{code} should be rejected");
        }
    }

    #[test]
    fn empty_shortcode_passes_validation() {
        let request = parse(json!({ "url": "https://example.com", "shortcode": "" }));

        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_empty_url() {
        let request = parse(json!({ "url": "" }));

        assert!(request.validate().is_err());
    }

    #[test]
    fn response_uses_camel_case_and_utc_instant() {
        let expires_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        let response = CreateShortUrlResponse::new("http://s.test/abc".to_string(), expires_at);

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["shortLink"], "http://s.test/abc");
        assert_eq!(value["expiry"], "2025-01-01T00:30:00Z");
    }
}
