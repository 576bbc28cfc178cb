//! Count normalization for human-formatted numbers
//!
//! The platform renders engagement counts as abbreviated strings like
//! "1.2M", "50.3K", or comma-grouped plain integers. This module converts
//! them to integers for the record builder.

/// Multiplier suffixes recognized in count strings
const SUFFIXES: [(char, u64); 3] = [('K', 1_000), ('M', 1_000_000), ('B', 1_000_000_000)];

/// Converts a human-formatted count string to an integer
///
/// Commas are stripped and the input is uppercased, so "1.2m" and "12,345"
/// both parse. A recognized suffix (K/M/B) multiplies the floating-point
/// prefix and the product truncates to an integer. Anything unparsable,
/// including the empty string, yields 0 — this function never fails.
///
/// # Example
///
/// ```
/// use clipstream::parse::normalize_count;
///
/// assert_eq!(normalize_count("1.2M"), 1_200_000);
/// assert_eq!(normalize_count("12,345"), 12_345);
/// assert_eq!(normalize_count("junk"), 0);
/// ```
pub fn normalize_count(raw: &str) -> u64 {
    let cleaned = raw.trim().replace(',', "").to_uppercase();

    if cleaned.is_empty() || cleaned == "0" {
        return 0;
    }

    for (suffix, multiplier) in SUFFIXES {
        if let Some(prefix) = cleaned.strip_suffix(suffix) {
            return match prefix.parse::<f64>() {
                Ok(value) if value >= 0.0 => (value * multiplier as f64) as u64,
                _ => 0,
            };
        }
    }

    cleaned.parse::<u64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millions_suffix() {
        assert_eq!(normalize_count("1.2M"), 1_200_000);
        assert_eq!(normalize_count("3M"), 3_000_000);
    }

    #[test]
    fn test_thousands_suffix() {
        assert_eq!(normalize_count("50.3K"), 50_300);
        assert_eq!(normalize_count("1K"), 1_000);
    }

    #[test]
    fn test_billions_suffix() {
        assert_eq!(normalize_count("2.5B"), 2_500_000_000);
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(normalize_count("42"), 42);
        assert_eq!(normalize_count("0"), 0);
    }

    #[test]
    fn test_comma_grouped() {
        assert_eq!(normalize_count("12,345"), 12_345);
        assert_eq!(normalize_count("1,234,567"), 1_234_567);
    }

    #[test]
    fn test_lowercase_suffix() {
        assert_eq!(normalize_count("1.2m"), 1_200_000);
        assert_eq!(normalize_count("50.3k"), 50_300);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalize_count(""), 0);
        assert_eq!(normalize_count("   "), 0);
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(normalize_count("junk"), 0);
        assert_eq!(normalize_count("1.2.3M"), 0);
        assert_eq!(normalize_count("-5"), 0);
    }

    #[test]
    fn test_truncation() {
        // 1.23K is 1230, not rounded
        assert_eq!(normalize_count("1.239K"), 1_239);
        assert_eq!(normalize_count("1.2349K"), 1_234);
    }
}
