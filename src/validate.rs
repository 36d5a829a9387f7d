//! URL validation.
//!
//! Accepts absolute `http`/`https` URLs whose host is an IP address or a dotted
//! domain name with an alphabetic top-level label.

use url::{Host, Url};

/// Check whether `raw` is a syntactically valid web URL.
///
/// Never fails: malformed input simply returns `false`. Input with surrounding
/// or embedded whitespace is invalid.
pub fn is_valid_url(raw: &str) -> bool {
    parse_web_url(raw).is_some()
}

/// Parse `raw` into a [`Url`] if it passes validation.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    match url.host()? {
        Host::Ipv4(_) | Host::Ipv6(_) => Some(url),
        Host::Domain(domain) => is_valid_domain(domain).then_some(url),
    }
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });

    // Punycode TLDs (xn--) are alphanumeric with dashes
    let tld = labels[labels.len() - 1];
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"));

    labels_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_urls() {
        for url in [
            "https://www.youtube.com/watch?v=ABC123",
            "https://youtu.be/dQw4w9WgXcQ?feature=shared",
            "http://example.com",
            "https://blog.rust-lang.org/2024/01/01/post.html#section",
            "https://example.co.uk/path?q=1&r=2",
            "http://127.0.0.1:8080/page",
            "http://[::1]:3000/",
            "https://bücher.de/",
        ] {
            assert!(is_valid_url(url), "expected valid: {url}");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for url in [
            "",
            "not a url",
            "example.com",
            "www.example.com/page",
            "ftp://example.com/file",
            "mailto:someone@example.com",
            "https://localhost/",
            "https://example",
            "https://example.c",
            "https://exa mple.com",
            "https://-bad.com",
            "https://example.123",
            "https://..com",
        ] {
            assert!(!is_valid_url(url), "expected invalid: {url}");
        }
    }

    #[test]
    fn rejects_untrimmed_input() {
        assert!(!is_valid_url(" https://example.com"));
        assert!(!is_valid_url("https://example.com\n"));
        assert!(!is_valid_url("\thttps://example.com"));
    }

    #[test]
    fn parse_returns_url() {
        let url = parse_web_url("https://example.com/a?b=c").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("b=c"));
    }
}
