//! Clinical preprocessing patterns and Treebank word rule tables.

use once_cell::sync::Lazy; // Import Lazy for static initializations
use std::collections::HashSet;

// ----- CLINICAL PREPROCESSING -----

/// Sentence-ending characters used by the clinical statistical tokenizer.
/// `?` is excluded: notes write "? pneumonia" for suspected findings.
pub const CLINICAL_SENT_END_CHARS: [char; 2] = ['.', '!'];

/// Breaks anything with lots of spaces (tabular data).
///
/// Disabled since 2018-02-13: notes that end every line with two spaces and a
/// newline make this rule fire on every line. Not part of
/// [`clinical_preprocess_patterns`].
pub const DISABLED_WHITESPACE_RUN_PATTERN: &str = r"\s{3,}";

/// Split heuristics for clinical note formatting, in application order.
pub fn clinical_preprocess_patterns() -> Vec<&'static str> {
    vec![
        // double newlines
        r"[\r\n]{2,}",
        // newlines with only spaces
        r"[\r\n]+\s+[\r\n]+",
        // numbered lists (e.g. "1.", "2)")
        r"(^|\r|\n)+\s*\d+[.)-]",
        // bulleted lists (e.g. "*", "-")
        r"(^|\r|\n)+\s*[*-]",
        // starting labels (e.g. "WEIGHT:")
        r"(^|\r|\n)+\s*\w+[:]",
        // lines starting with a date
        r"(^|\r|\n)+\s*\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
        // MIMIC de-identified date markers, [**YYYY-M-DD**]
        r"^\[\*+\d{4}-\d{1,2}-\d{1,2}\*+\]",
        // separator bars: '*****', '=====', '-----'
        r"[*=-]{3,}",
    ]
}

// ----- WORD RULES -----

// Regex char class contents
pub const OPEN_QUOTES_PATTERN_PART: &str = r#"``|''|"|“|‘|«"#;
pub const CLOSE_QUOTES_PATTERN_PART: &str = r#"''|"|”|»"#;
pub const CLITICS_PATTERN_PART: &str = r"s|m|d|ll|re|ve";

pub const LIST_ELLIPSES_LITERALS: &[&str] = &["…", "⋯"];
pub const LIST_ELLIPSES_REGEX: &[&str] = &[r"\.{3,}", r"\.{2}"];

/// Only the final chunk of a sentence may lose its trailing period.
pub const SENTENCE_FINAL_PERIOD_PATTERN: &str = r"(?<=[^.])\.$";

pub fn get_treebank_prefix_patterns() -> Vec<String> {
    vec![
        format!(r"^(?:{})", OPEN_QUOTES_PATTERN_PART),
        r"^[(\[{<]".to_string(),
        r"^--".to_string(),
        format!(r"^{}", LIST_ELLIPSES_REGEX[0]),
    ]
}

/// Suffixes are tried in order and the first one that ends the slice wins, so
/// clitics come before the bare closing quote.
pub fn get_treebank_suffix_patterns() -> Vec<String> {
    vec![
        r"(?i)n['’]t$".to_string(),
        format!(r"(?i)['’](?:{})$", CLITICS_PATTERN_PART),
        format!(r"(?:{})$", CLOSE_QUOTES_PATTERN_PART),
        r"(?<=[^'])'$".to_string(),
        r"[)\]}>]$".to_string(),
        r"[,;:!?]$".to_string(),
        format!(r"{}$", LIST_ELLIPSES_REGEX[0]),
    ]
}

pub fn get_treebank_regex_infix_patterns() -> Vec<String> {
    vec![
        // Commas and colons split unless a digit follows ("1,000", "12:30")
        r"[:,](?!\d)".to_string(),
        LIST_ELLIPSES_REGEX[0].to_string(),
        LIST_ELLIPSES_REGEX[1].to_string(),
    ]
}

/// Literal infixes for Aho-Corasick, longest first so `LeftmostFirst`
/// prefers the longer literal when two start at the same byte.
pub fn get_treebank_literal_infix_strings() -> Vec<String> {
    static LITERALS: Lazy<Vec<String>> = Lazy::new(|| {
        let mut literals: Vec<String> = vec![
            "--", ";", "@", "#", "$", "%", "&", "?", "!", "(", ")", "[", "]", "{", "}", "<", ">",
            "\"",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        literals.extend(LIST_ELLIPSES_LITERALS.iter().map(|s| s.to_string()));
        literals.sort_by_key(|b| std::cmp::Reverse(b.len()));

        let mut seen = HashSet::new();
        literals.retain(|lit| seen.insert(lit.clone()));
        literals
    });
    LITERALS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinical_patterns_are_in_documented_order() {
        assert_eq!(
            clinical_preprocess_patterns(),
            vec![
                r"[\r\n]{2,}",
                r"[\r\n]+\s+[\r\n]+",
                r"(^|\r|\n)+\s*\d+[.)-]",
                r"(^|\r|\n)+\s*[*-]",
                r"(^|\r|\n)+\s*\w+[:]",
                r"(^|\r|\n)+\s*\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
                r"^\[\*+\d{4}-\d{1,2}-\d{1,2}\*+\]",
                r"[*=-]{3,}",
            ]
        );
    }

    #[test]
    fn whitespace_run_rule_stays_disabled() {
        assert!(!clinical_preprocess_patterns().contains(&DISABLED_WHITESPACE_RUN_PATTERN));
    }

    #[test]
    fn literal_infixes_are_longest_first_and_unique() {
        let literals = get_treebank_literal_infix_strings();
        assert!(literals.windows(2).all(|w| w[0].len() >= w[1].len()));
        assert!(literals.contains(&"--".to_string()));
        let unique: HashSet<_> = literals.iter().collect();
        assert_eq!(unique.len(), literals.len());
    }
}
