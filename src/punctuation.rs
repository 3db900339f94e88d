//! Punctuation classes shared by the sentence and word tokenizers.

use lazy_static::lazy_static;
use std::collections::HashSet;
use unicode_general_category::{get_general_category, GeneralCategory};

lazy_static! {
    /// Closing brackets and quotes that stay attached to the end of a sentence
    /// (`meds.)`, `said "stop!"`).
    pub static ref CLOSING_PUNCT: HashSet<char> = [
        ')', ']', '}', '"', '\'', '’', '”', '»',
    ]
    .into_iter()
    .collect();

    /// Opening brackets and quotes stripped before looking a token up as an
    /// abbreviation.
    pub static ref OPENING_PUNCT: HashSet<char> = [
        '(', '[', '{', '"', '\'', '‘', '“', '«', '`',
    ]
    .into_iter()
    .collect();
}

pub fn is_closing_punct(c: char) -> bool {
    CLOSING_PUNCT.contains(&c)
}

pub fn is_opening_punct(c: char) -> bool {
    OPENING_PUNCT.contains(&c)
}

/// True for any character in a Unicode punctuation category.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Strips surrounding brackets and quotes from a whitespace token.
pub fn strip_enclosing_punct(token: &str) -> &str {
    token
        .trim_start_matches(is_opening_punct)
        .trim_end_matches(is_closing_punct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unicode_punctuation() {
        assert!(is_punctuation('.'));
        assert!(is_punctuation('“'));
        assert!(is_punctuation('-'));
        assert!(!is_punctuation('a'));
        assert!(!is_punctuation('7'));
        assert!(!is_punctuation('$'));
    }

    #[test]
    fn strips_brackets_and_quotes() {
        assert_eq!(strip_enclosing_punct("(Dr.)"), "Dr.");
        assert_eq!(strip_enclosing_punct("\"stop\""), "stop");
        assert_eq!(strip_enclosing_punct("plain"), "plain");
    }
}
