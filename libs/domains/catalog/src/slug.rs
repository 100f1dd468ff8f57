//! URL-safe slug derivation.

/// Derive a slug from a display name.
///
/// Lowercases alphanumerics and collapses every other run of characters
/// into a single hyphen; leading and trailing hyphens are trimmed. The
/// derivation is deterministic, so equal names always produce equal
/// slugs.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_hyphenated() {
        assert_eq!(slugify("Gaming Laptop"), "gaming-laptop");
        assert_eq!(slugify("Home & Garden"), "home-garden");
    }

    #[test]
    fn test_collapses_separator_runs() {
        assert_eq!(slugify("  A --- B  "), "a-b");
        assert_eq!(slugify("USB-C   Cable"), "usb-c-cable");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(slugify("--edge--"), "edge");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(slugify("Smart Phones"), slugify("Smart Phones"));
    }
}
