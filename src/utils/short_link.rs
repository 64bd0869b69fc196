//! Short link construction.

/// Joins a public prefix and a code into a short link.
///
/// The prefix gets `http://` when it carries no scheme, and loses any
/// trailing slashes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(build_short_link("localhost:8080/", "abc"), "http://localhost:8080/abc");
/// assert_eq!(build_short_link("https://s.example.com", "abc"), "https://s.example.com/abc");
/// ```
pub fn build_short_link(prefix: &str, code: &str) -> String {
    let prefix = prefix.trim();
    let prefix = if prefix.starts_with("http://") || prefix.starts_with("https://") {
        prefix.to_string()
    } else {
        format!("http://{}", prefix)
    };

    format!("{}/{}", prefix.trim_end_matches('/'), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_default_scheme() {
        assert_eq!(
            build_short_link("localhost:8080", "abc"),
            "http://localhost:8080/abc"
        );
    }

    #[test]
    fn test_keeps_https_scheme() {
        assert_eq!(
            build_short_link("https://s.example.com", "xyz"),
            "https://s.example.com/xyz"
        );
    }

    #[test]
    fn test_strips_trailing_slash() {
        assert_eq!(
            build_short_link("http://s.example.com/", "Ab3"),
            "http://s.example.com/Ab3"
        );
        assert_eq!(
            build_short_link("s.example.com//", "Ab3"),
            "http://s.example.com/Ab3"
        );
    }

    #[test]
    fn test_keeps_path_prefix() {
        assert_eq!(
            build_short_link("https://example.com/s", "code"),
            "https://example.com/s/code"
        );
    }
}
