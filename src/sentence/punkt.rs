//! Punkt-style statistical sentence boundary detection.
//!
//! This is the untrained form of the Punkt algorithm: every period-final token
//! followed by whitespace is a candidate break. A candidate is rejected when
//! the token is a known or dotted abbreviation. An ordinal number breaks
//! unless the next word starts lowercase. An initial breaks only when the next
//! word is uncased (a digit or symbol): with no learned orthographic context,
//! a following capitalised word is read as the rest of a name (`J. Smith`).

use std::collections::HashSet;

use log::debug;
use regex_syntax::is_word_character;

use super::Span;
use crate::punctuation::{is_closing_punct, is_punctuation, strip_enclosing_punct};

const DEFAULT_SENT_END_CHARS: [char; 3] = ['.', '?', '!'];

/// Language-dependent character classes read at segmentation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunktLanguageVars {
    sent_end_chars: Vec<char>,
}

impl Default for PunktLanguageVars {
    fn default() -> Self {
        Self {
            sent_end_chars: DEFAULT_SENT_END_CHARS.to_vec(),
        }
    }
}

impl PunktLanguageVars {
    pub fn sent_end_chars(&self) -> &[char] {
        &self.sent_end_chars
    }

    /// Replaces the sentence-ending characters. Duplicates are dropped and
    /// first-seen order is kept.
    pub fn set_sent_end_chars<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = HashSet::new();
        self.sent_end_chars = chars.into_iter().filter(|c| seen.insert(*c)).collect();
    }

    pub fn is_sent_end_char(&self, c: char) -> bool {
        self.sent_end_chars.contains(&c)
    }
}

/// Learned (or hand-supplied) abbreviation types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunktParameters {
    abbrev_types: HashSet<String>,
}

impl PunktParameters {
    /// Adds an abbreviation. Case and a trailing period are ignored, so `Pt.`
    /// and `pt` register the same type.
    pub fn add_abbreviation(&mut self, abbrev: &str) {
        self.abbrev_types
            .insert(abbrev.trim_end_matches('.').to_lowercase());
    }

    pub fn is_abbreviation(&self, typ: &str) -> bool {
        self.abbrev_types.contains(&typ.to_lowercase())
    }

    pub fn abbrev_types(&self) -> &HashSet<String> {
        &self.abbrev_types
    }
}

#[derive(Debug, Clone, Default)]
pub struct PunktSentenceTokenizer {
    lang_vars: PunktLanguageVars,
    params: PunktParameters,
}

impl PunktSentenceTokenizer {
    pub fn new(lang_vars: PunktLanguageVars) -> Self {
        Self {
            lang_vars,
            params: PunktParameters::default(),
        }
    }

    pub fn with_parameters(lang_vars: PunktLanguageVars, params: PunktParameters) -> Self {
        Self { lang_vars, params }
    }

    pub fn lang_vars(&self) -> &PunktLanguageVars {
        &self.lang_vars
    }

    pub fn lang_vars_mut(&mut self) -> &mut PunktLanguageVars {
        &mut self.lang_vars
    }

    pub fn params(&self) -> &PunktParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut PunktParameters {
        &mut self.params
    }

    /// Returns sentence byte spans, trimmed of surrounding whitespace.
    pub fn span_tokenize(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut sent_start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !self.lang_vars.is_sent_end_char(c) {
                continue;
            }

            // Absorb runs like "!!", "?!" and trailing closers like `.)` or `."`.
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if self.lang_vars.is_sent_end_char(next) || is_closing_punct(next) {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let rest = &text[end..];
            match rest.chars().next() {
                None => break,
                Some(next) if !next.is_whitespace() => continue,
                Some(_) => {}
            }

            let token = &text[token_start(text, sent_start, i)..end];
            if !self.is_sentence_break(token, c, rest) {
                debug!("[punkt] no break after {:?}", token);
                continue;
            }

            if let Some(span) = Span::trimmed(text, sent_start, end) {
                spans.push(span);
            }
            sent_start = end;
        }

        if let Some(span) = Span::trimmed(text, sent_start, text.len()) {
            spans.push(span);
        }
        spans
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.span_tokenize(text)
            .into_iter()
            .map(|span| span.as_str(text))
            .collect()
    }

    fn is_sentence_break(&self, token: &str, end_char: char, rest: &str) -> bool {
        if end_char != '.' {
            return true;
        }

        let core = strip_enclosing_punct(token);
        let typ = core.trim_end_matches(|c: char| c == '.' || self.lang_vars.is_sent_end_char(c));
        if typ.is_empty() {
            return true;
        }

        if self.params.is_abbreviation(typ) || is_dotted_abbreviation(typ) {
            return false;
        }

        if is_ordinal_number(typ) {
            return !next_word_start(rest).map_or(false, char::is_lowercase);
        }

        if is_initial(typ) {
            return !next_word_start(rest).map_or(false, |c| c.is_lowercase() || c.is_uppercase());
        }

        true
    }
}

/// Byte offset where the whitespace token ending at `end_char_at` begins.
fn token_start(text: &str, floor: usize, end_char_at: usize) -> usize {
    text[floor..end_char_at]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(p, c)| floor + p + c.len_utf8())
        .unwrap_or(floor)
}

/// `e.g`, `D.R`, `b.i.d`: every dot-separated part is alphabetic.
fn is_dotted_abbreviation(typ: &str) -> bool {
    typ.contains('.')
        && typ
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic))
}

fn is_initial(typ: &str) -> bool {
    let mut chars = typ.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if is_word_character(c) && c.is_alphabetic()
    )
}

fn is_ordinal_number(typ: &str) -> bool {
    typ.chars().all(|c| c.is_ascii_digit())
}

/// First non-punctuation char of the word after a candidate break.
fn next_word_start(rest: &str) -> Option<char> {
    rest.trim_start().chars().find(|c| !is_punctuation(*c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clinical_punkt() -> PunktSentenceTokenizer {
        let mut punkt = PunktSentenceTokenizer::new(PunktLanguageVars::default());
        punkt.lang_vars_mut().set_sent_end_chars(['.', '!']);
        punkt
    }

    #[test]
    fn splits_on_periods() {
        let punkt = PunktSentenceTokenizer::default();
        let sentences = punkt.tokenize("Patient is stable. Vitals normal. Discharge home.");
        assert_eq!(
            sentences,
            vec!["Patient is stable.", "Vitals normal.", "Discharge home."]
        );
    }

    #[test]
    fn default_sent_end_chars_include_question_mark() {
        let punkt = PunktSentenceTokenizer::default();
        assert_eq!(punkt.lang_vars().sent_end_chars(), &['.', '?', '!']);
        assert_eq!(punkt.tokenize("Pain? Yes.").len(), 2);
    }

    #[test]
    fn question_mark_does_not_break_after_override() {
        let punkt = clinical_punkt();
        assert_eq!(punkt.lang_vars().sent_end_chars(), &['.', '!']);
        assert_eq!(punkt.tokenize("Rule out ? Pneumonia. Start abx!"), vec![
            "Rule out ? Pneumonia.",
            "Start abx!"
        ]);
    }

    #[test]
    fn set_sent_end_chars_dedups() {
        let mut vars = PunktLanguageVars::default();
        vars.set_sent_end_chars(['!', '.', '!']);
        assert_eq!(vars.sent_end_chars(), &['!', '.']);
    }

    #[test]
    fn known_abbreviation_suppresses_break() {
        let mut punkt = clinical_punkt();
        punkt.params_mut().add_abbreviation("Pt.");
        assert_eq!(punkt.tokenize("Seen by pt. Smith today. Stable."), vec![
            "Seen by pt. Smith today.",
            "Stable."
        ]);
    }

    #[test]
    fn dotted_abbreviations_do_not_break() {
        let punkt = clinical_punkt();
        assert_eq!(
            punkt.tokenize("Referred by D.R. Jones, e.g. for follow up."),
            vec!["Referred by D.R. Jones, e.g. for follow up."]
        );
    }

    #[test]
    fn ordinal_followed_by_lowercase_continues() {
        let punkt = clinical_punkt();
        assert_eq!(punkt.tokenize("Admitted on the 3. day of stay."), vec![
            "Admitted on the 3. day of stay."
        ]);
        assert_eq!(punkt.tokenize("1. Follow up."), vec!["1.", "Follow up."]);
    }

    #[test]
    fn initials_stay_with_the_name() {
        let punkt = clinical_punkt();
        assert_eq!(punkt.tokenize("Seen by J. Smith today."), vec!["Seen by J. Smith today."]);
        assert_eq!(punkt.tokenize("Vitamin K. given"), vec!["Vitamin K. given"]);
        assert_eq!(punkt.tokenize("Plan B. 2 doses"), vec!["Plan B.", "2 doses"]);
    }

    #[test]
    fn supplied_parameters_are_used() {
        let mut params = PunktParameters::default();
        params.add_abbreviation("Dr.");
        params.add_abbreviation("approx");
        assert_eq!(params.abbrev_types().len(), 2);
        assert!(params.abbrev_types().contains("dr"));

        let punkt = PunktSentenceTokenizer::with_parameters(PunktLanguageVars::default(), params);
        assert!(punkt.params().is_abbreviation("DR"));
        assert_eq!(punkt.tokenize("Seen by Dr. Smith. Stable."), vec!["Seen by Dr. Smith.", "Stable."]);
    }

    #[test]
    fn closing_punctuation_stays_with_sentence() {
        let punkt = clinical_punkt();
        let text = "Continue meds (as before.) Return if worse.";
        assert_eq!(punkt.tokenize(text), vec!["Continue meds (as before.)", "Return if worse."]);
    }

    #[test]
    fn decimals_are_not_boundaries() {
        let punkt = clinical_punkt();
        assert_eq!(punkt.tokenize("Temp 37.5 today. Fine."), vec!["Temp 37.5 today.", "Fine."]);
    }

    #[test]
    fn whitespace_only_text_has_no_sentences() {
        assert!(clinical_punkt().span_tokenize(" \n\t ").is_empty());
        assert!(clinical_punkt().span_tokenize("").is_empty());
    }

    #[test]
    fn spans_point_into_original_text() {
        let text = "  First one.   Second one.  ";
        let spans = clinical_punkt().span_tokenize(text);
        assert_eq!(spans, vec![Span::new(2, 12), Span::new(15, 26)]);
    }
}
