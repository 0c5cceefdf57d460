//! Whole-word occurrence scanning.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Location;
use crate::source::Source;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub fn is_identifier(word: &str) -> bool {
    IDENTIFIER_RE.is_match(word)
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Every non-overlapping whole-word occurrence of `word` in `source`.
/// Anything that is not an identifier yields no occurrences.
pub fn locate_word(source: &Source, word: &str) -> Vec<Location> {
    if !is_identifier(word) {
        return Vec::new();
    }
    let text = source.content();
    text.match_indices(word)
        .filter(|(start, _)| {
            let end = start + word.len();
            let before = text[..*start].chars().next_back();
            let after = text[end..].chars().next();
            !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
        })
        .map(|(start, _)| Location {
            source: source.name().to_string(),
            version: source.version(),
            start,
            end: start + word.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_words_only() {
        let src = Source::new("A.java", "check(); checked(); recheck(); check$; check");
        let found = locate_word(&src, "check");
        let starts: Vec<usize> = found.iter().map(|l| l.start).collect();
        assert_eq!(starts, vec![0, 39]);
        assert!(found.iter().all(|l| l.len() == 5 && l.version == 0));
    }

    #[test]
    fn test_non_identifier_yields_nothing() {
        let src = Source::new("A.java", "a + b");
        assert!(locate_word(&src, "+").is_empty());
        assert!(locate_word(&src, "").is_empty());
        assert!(locate_word(&src, "a b").is_empty());
    }

    #[test]
    fn test_absent_word() {
        let src = Source::new("A.java", "class A {}");
        assert!(locate_word(&src, "something").is_empty());
    }
}
