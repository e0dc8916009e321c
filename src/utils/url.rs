/// Normalize operator input into the URL form the backends expect.
///
/// Trims surrounding whitespace, assumes `https://` when no http(s) scheme is
/// given and drops trailing slashes. Blank input stays blank.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let stripped = with_scheme.trim_end_matches('/');
    // keep "https://" itself intact rather than collapsing it to "https:"
    if stripped.ends_with(':') {
        with_scheme
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_scheme() {
        assert_eq!(normalize_url("evil.example"), "https://evil.example");
        assert_eq!(normalize_url("  evil.example/login  "), "https://evil.example/login");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://evil.example"), "http://evil.example");
        assert_eq!(normalize_url("HTTPS://Evil.example/"), "HTTPS://Evil.example");
    }

    #[test]
    fn test_strips_trailing_slashes() {
        assert_eq!(normalize_url("https://evil.example///"), "https://evil.example");
    }

    #[test]
    fn test_blank_stays_blank() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_bare_scheme_not_collapsed() {
        assert_eq!(normalize_url("https://"), "https://");
    }
}
