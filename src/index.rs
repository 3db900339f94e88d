//! Sentence and word tokenization with character offsets into the source text.

use serde::Serialize;

use crate::clinical::ClinicalSentenceTokenizer;
use crate::sentence::{SentenceTokenizer, Span};
use crate::word::TreebankWordTokenizer;

/// A token located by character offsets. `text` is only populated when the
/// tokenizer keeps token strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedToken {
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A sentence located by character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug)]
pub struct IndexTokenizer {
    sentence_tokenizer: ClinicalSentenceTokenizer,
    word_tokenizer: TreebankWordTokenizer,
    keep_token_strings: bool,
}

impl IndexTokenizer {
    pub fn new(
        sentence_tokenizer: ClinicalSentenceTokenizer,
        word_tokenizer: TreebankWordTokenizer,
        keep_token_strings: bool,
    ) -> Self {
        Self {
            sentence_tokenizer,
            word_tokenizer,
            keep_token_strings,
        }
    }

    pub fn keep_token_strings(&self) -> bool {
        self.keep_token_strings
    }

    pub fn preprocess_patterns(&self) -> &[String] {
        self.sentence_tokenizer.preprocess_patterns()
    }

    pub fn sentence_tokenizer(&self) -> &SentenceTokenizer {
        self.sentence_tokenizer.sentence_tokenizer()
    }

    /// Sentences as character spans.
    pub fn sentence_spans(&self, text: &str) -> Vec<CharSpan> {
        let mut counter = CharCounter::new(text);
        self.sentence_tokenizer
            .span_tokenize(text)
            .into_iter()
            .map(|span| counter.char_span(span))
            .collect()
    }

    /// Tokenizes `text` into sentences of word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Vec<IndexedToken>> {
        let mut counter = CharCounter::new(text);
        self.sentence_tokenizer
            .span_tokenize(text)
            .into_iter()
            .map(|span| {
                let sentence_start = counter.char_span(span).start;
                self.word_tokenizer
                    .span_tokenize(span.as_str(text), sentence_start)
                    .into_iter()
                    .map(|word| IndexedToken {
                        start: word.start,
                        end: word.end,
                        text: self.keep_token_strings.then_some(word.text),
                    })
                    .collect()
            })
            .collect()
    }
}

/// Converts ascending byte spans to character spans in one pass over the text.
struct CharCounter<'a> {
    text: &'a str,
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> CharCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte_pos: 0,
            char_pos: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte_pos {
            self.byte_pos = 0;
            self.char_pos = 0;
        }
        self.char_pos += self.text[self.byte_pos..byte].chars().count();
        self.byte_pos = byte;
        self.char_pos
    }

    fn char_span(&mut self, span: Span) -> CharSpan {
        let start = self.char_offset(span.start);
        let end = self.char_offset(span.end);
        CharSpan { start, end }
    }
}
