use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for category slugs
    /// Must be lowercase alphanumeric with single hyphens between words
    /// - Valid: "mens-shoes", "t-shirts", "summer2025"
    /// - Invalid: "-shoes", "shoes-", "mens--shoes", "Shoes", "mens_shoes"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Rejects strings that are empty once surrounding whitespace is trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Derive a slug from a display name: lowercase ASCII words joined by single hyphens.
///
/// Returns `None` when the name has no ASCII alphanumeric character to build
/// a slug from (e.g. only punctuation or non-Latin script).
pub fn slugify(name: &str) -> Option<String> {
    let slug = name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("mens-shoes"));
        assert!(SLUG_REGEX.is_match("t-shirts"));
        assert!(SLUG_REGEX.is_match("summer2025"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-shoes")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("shoes-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("mens--shoes")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Shoes")); // uppercase
        assert!(!SLUG_REGEX.is_match("mens_shoes")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("mens shoes")); // space
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Shoes").is_ok());
        assert!(validate_not_blank("  Shoes ").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n ").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Men's Shoes").as_deref(), Some("men-s-shoes"));
        assert_eq!(slugify("  T-Shirts & Tops ").as_deref(), Some("t-shirts-tops"));
        assert_eq!(slugify("Summer 2025").as_deref(), Some("summer-2025"));
        assert_eq!(slugify("!!!"), None);
        assert_eq!(slugify(""), None);
    }

    #[test]
    fn test_slugify_output_matches_regex() {
        for name in ["Home & Garden", "Kids' Toys", "4K TVs", "--Sale--"] {
            let slug = slugify(name).unwrap();
            assert!(SLUG_REGEX.is_match(&slug), "{slug} should be a valid slug");
        }
    }
}
