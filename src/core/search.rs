//! Plain substring find and replace

use std::ops::Range;

use regex::{NoExpand, Regex, RegexBuilder};

/// Literal matcher for `needle` with Unicode case folding
fn insensitive(needle: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Unusable search text {:?}: {}", needle, e);
            None
        }
    }
}

/// Byte range of the first match of `needle`.
///
/// A case-insensitive match can differ in length from `needle`.
pub fn find_range(haystack: &str, needle: &str, case_sensitive: bool) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    if case_sensitive {
        haystack
            .find(needle)
            .map(|start| start..start + needle.len())
    } else {
        insensitive(needle)?.find(haystack).map(|m| m.range())
    }
}

/// Byte offset of the first match of `needle`
pub fn find(haystack: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    find_range(haystack, needle, case_sensitive).map(|range| range.start)
}

/// Replace the first match; `None` when nothing matched
pub fn replace_first(
    haystack: &str,
    needle: &str,
    replacement: &str,
    case_sensitive: bool,
) -> Option<String> {
    let Range { start, end } = find_range(haystack, needle, case_sensitive)?;

    let mut result = String::with_capacity(haystack.len() + replacement.len());
    result.push_str(&haystack[..start]);
    result.push_str(replacement);
    result.push_str(&haystack[end..]);
    Some(result)
}

/// Replace every match; `None` when nothing matched
pub fn replace_all(
    haystack: &str,
    needle: &str,
    replacement: &str,
    case_sensitive: bool,
) -> Option<String> {
    find(haystack, needle, case_sensitive)?;
    if case_sensitive {
        Some(haystack.replace(needle, replacement))
    } else {
        let re = insensitive(needle)?;
        Some(re.replace_all(haystack, NoExpand(replacement)).into_owned())
    }
}

/// Number of non-overlapping matches
pub fn count(haystack: &str, needle: &str, case_sensitive: bool) -> usize {
    if needle.is_empty() {
        return 0;
    }
    if case_sensitive {
        haystack.matches(needle).count()
    } else {
        insensitive(needle)
            .map(|re| re.find_iter(haystack).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("Hello World", "World", true), Some(6));
        assert_eq!(find("Hello World", "world", true), None);
        assert_eq!(find("Hello World", "world", false), Some(6));
        assert_eq!(find("Hello", "", false), None);
    }

    #[test]
    fn test_needle_is_literal() {
        assert_eq!(find("a.b a+b", "a+b", false), Some(4));
        assert_eq!(find("cost: $5 (approx)", "(APPROX)", false), Some(9));
    }

    #[test]
    fn test_replace_first() {
        assert_eq!(
            replace_first("one two one", "one", "1", true).as_deref(),
            Some("1 two one")
        );
        assert_eq!(
            replace_first("One two one", "ONE", "1", false).as_deref(),
            Some("1 two one")
        );
        assert_eq!(replace_first("abc", "x", "y", true), None);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(
            replace_all("one two one", "one", "1", true).as_deref(),
            Some("1 two 1")
        );
        assert_eq!(
            replace_all("One two oNe", "one", "$0", false).as_deref(),
            Some("$0 two $0")
        );
        assert_eq!(replace_all("abc", "", "y", false), None);
    }

    #[test]
    fn test_case_folding_beyond_ascii() {
        assert_eq!(find("CAFÉ", "café", false), Some(0));
        assert_eq!(find("CAFÉ", "café", true), None);
        assert_eq!(find_range("naïve NAÏVE", "NAÏVE", false), Some(0..6));
        assert_eq!(
            replace_all("Über über", "über", "x", false).as_deref(),
            Some("x x")
        );
        assert_eq!(
            replace_first("ÉTÉ été", "été", "summer", false).as_deref(),
            Some("summer été")
        );
    }

    #[test]
    fn test_find_range_spans_the_match() {
        assert_eq!(find_range("Hello World", "World", true), Some(6..11));
        assert_eq!(find_range("Hello World", "WORLD", false), Some(6..11));
        assert_eq!(find_range("Hello", "", true), None);
    }

    #[test]
    fn test_count() {
        assert_eq!(count("aaa", "a", true), 3);
        assert_eq!(count("Ab ab AB", "ab", false), 3);
        assert_eq!(count("Ab ab AB", "ab", true), 1);
    }
}
