/// Validate and normalize an email address.
///
/// The local part keeps its casing; the domain is lowercased, so
/// `Alice@EXAMPLE.COM` and `Alice@example.com` name the same account while
/// `alice@example.com` does not. Returns `None` when the address is not
/// structurally valid.
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let (local, domain) = trimmed.rsplit_once('@')?;

    if local.is_empty() || domain.is_empty() {
        return None;
    }

    if trimmed.chars().any(char::is_whitespace) {
        return None;
    }

    Some(format!("{}@{}", local, domain.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_lowercased_local_part_preserved() {
        let cases = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("Test3@EXAMPLE.COM", "Test3@example.com"),
            ("Test4@example.COM", "Test4@example.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_email(input).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_already_normalized_unchanged() {
        assert_eq!(
            normalize_email("user@example.com").as_deref(),
            Some("user@example.com")
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            normalize_email("  user@example.com\n").as_deref(),
            Some("user@example.com")
        );
    }

    #[test]
    fn test_missing_at_rejected() {
        assert_eq!(normalize_email("userexample.com"), None);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(normalize_email(""), None);
        assert_eq!(normalize_email("@example.com"), None);
        assert_eq!(normalize_email("user@"), None);
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        assert_eq!(normalize_email("us er@example.com"), None);
    }

    #[test]
    fn test_plus_addressing_kept() {
        assert_eq!(
            normalize_email("user+tag@Example.com").as_deref(),
            Some("user+tag@example.com")
        );
    }
}
