//! Hashtag extraction from free-text descriptions

use regex::Regex;
use std::sync::OnceLock;

/// `#` followed by one or more word characters (letters, digits, underscore)
fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"))
}

/// Extracts hashtag names from free text
///
/// Returns the tag names without the leading `#`, in order of appearance.
/// Duplicates and case are preserved; the caller decides whether to dedupe.
/// Empty text yields an empty list.
///
/// # Example
///
/// ```
/// use clipstream::parse::extract_hashtags;
///
/// assert_eq!(extract_hashtags("great #fyp day #FYP"), vec!["fyp", "FYP"]);
/// ```
pub fn extract_hashtags(text: &str) -> Vec<String> {
    hashtag_pattern()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_case_preserved() {
        assert_eq!(extract_hashtags("great #fyp day #FYP"), vec!["fyp", "FYP"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(extract_hashtags("#cat #dog #cat"), vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_hashtags("no tags here").is_empty());
    }

    #[test]
    fn test_word_characters_only() {
        // Punctuation terminates a tag
        assert_eq!(extract_hashtags("#fun!"), vec!["fun"]);
        assert_eq!(extract_hashtags("#snake_case_2"), vec!["snake_case_2"]);
    }

    #[test]
    fn test_bare_hash_ignored() {
        assert!(extract_hashtags("# not a tag").is_empty());
    }
}
