//! Sentence tokenizers: a statistical Punkt-style splitter and a rule-file
//! segmenter, selected through [`SentenceTokenizer`].

pub mod punkt;
pub mod rush;

pub use punkt::{PunktLanguageVars, PunktParameters, PunktSentenceTokenizer};
pub use rush::{RuleKind, RuleSegmenter, SegmentRule};

use serde::Serialize;

/// A half-open byte range into the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shrinks `text[start..end]` to exclude surrounding whitespace. Returns
    /// `None` if nothing but whitespace remains.
    pub fn trimmed(text: &str, start: usize, end: usize) -> Option<Self> {
        let slice = &text[start..end];
        let lead = slice.len() - slice.trim_start().len();
        let trail = slice.len() - slice.trim_end().len();
        if lead == slice.len() {
            return None;
        }
        Some(Self::new(start + lead, end - trail))
    }

    pub fn offset(self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    pub fn as_str(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

/// Which sentence tokenizer variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceTokenizerKind {
    Statistical,
    RuleFile,
}

/// The sentence tokenizer wrapped by the clinical preprocessing layer.
#[derive(Debug)]
pub enum SentenceTokenizer {
    Statistical(PunktSentenceTokenizer),
    RuleFile(RuleSegmenter),
}

impl SentenceTokenizer {
    pub fn kind(&self) -> SentenceTokenizerKind {
        match self {
            SentenceTokenizer::Statistical(_) => SentenceTokenizerKind::Statistical,
            SentenceTokenizer::RuleFile(_) => SentenceTokenizerKind::RuleFile,
        }
    }

    /// Sentence byte spans of `text`, trimmed and in ascending order.
    pub fn span_tokenize(&self, text: &str) -> Vec<Span> {
        match self {
            SentenceTokenizer::Statistical(punkt) => punkt.span_tokenize(text),
            SentenceTokenizer::RuleFile(rules) => rules.span_tokenize(text),
        }
    }

    pub fn as_statistical(&self) -> Option<&PunktSentenceTokenizer> {
        match self {
            SentenceTokenizer::Statistical(punkt) => Some(punkt),
            SentenceTokenizer::RuleFile(_) => None,
        }
    }
}
