//! Clinical preprocessing in front of a sentence tokenizer.
//!
//! Regex heuristics cut the note into blocks first: list items, header labels,
//! date lines and separator bars. Each block is then handed to the wrapped
//! sentence tokenizer.

use std::collections::BTreeSet;

use log::debug;
use regex::Regex;

use crate::error::{Result, TokenizerError};
use crate::sentence::{SentenceTokenizer, Span};

#[derive(Debug)]
pub struct ClinicalSentenceTokenizer {
    sentence_tokenizer: SentenceTokenizer,
    preprocess_strs: Vec<String>,
    preprocess_res: Vec<Regex>,
}

impl ClinicalSentenceTokenizer {
    /// Compiles `preprocess_split_patterns`. A malformed pattern is an error.
    pub fn new(sentence_tokenizer: SentenceTokenizer, preprocess_split_patterns: &[&str]) -> Result<Self> {
        let preprocess_res = preprocess_split_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| TokenizerError::pattern(p, e)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sentence_tokenizer,
            preprocess_strs: preprocess_split_patterns.iter().map(|p| p.to_string()).collect(),
            preprocess_res,
        })
    }

    pub fn preprocess_patterns(&self) -> &[String] {
        &self.preprocess_strs
    }

    pub fn sentence_tokenizer(&self) -> &SentenceTokenizer {
        &self.sentence_tokenizer
    }

    /// Byte offsets where the text is cut before sentence tokenization.
    ///
    /// Every match cuts at its start. Separator matches (blank lines, bars of
    /// three or more symbols) also cut at their end, so the separator ends up
    /// on its own. A bullet marker stays with its item.
    pub fn preprocess_cuts(&self, text: &str) -> BTreeSet<usize> {
        let mut cuts = BTreeSet::new();
        cuts.insert(0);
        cuts.insert(text.len());

        for re in &self.preprocess_res {
            for mat in re.find_iter(text) {
                if mat.is_empty() {
                    continue;
                }
                cuts.insert(mat.start());
                if is_standalone_separator(mat.as_str()) {
                    cuts.insert(mat.end());
                }
            }
        }
        cuts
    }

    /// Sentence byte spans of `text`, trimmed and in ascending order.
    pub fn span_tokenize(&self, text: &str) -> Vec<Span> {
        let cuts: Vec<usize> = self.preprocess_cuts(text).into_iter().collect();
        debug!("[clinical] {} preprocessing cuts", cuts.len().saturating_sub(2));

        let mut spans = Vec::new();
        for window in cuts.windows(2) {
            let Some(block) = Span::trimmed(text, window[0], window[1]) else {
                continue;
            };
            spans.extend(
                self.sentence_tokenizer
                    .span_tokenize(block.as_str(text))
                    .into_iter()
                    .map(|span| span.offset(block.start)),
            );
        }
        spans
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.span_tokenize(text)
            .into_iter()
            .map(|span| span.as_str(text))
            .collect()
    }
}

/// Whitespace only, or at least three visible symbols and no alphanumerics.
fn is_standalone_separator(matched: &str) -> bool {
    let visible: Vec<char> = matched.chars().filter(|c| !c.is_whitespace()).collect();
    visible.is_empty() || (visible.len() >= 3 && !visible.iter().any(|c| c.is_alphanumeric()))
}
