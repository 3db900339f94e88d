//! Sentence and word tokenization for clinical notes.
//!
//! [`build_tokenizer`] assembles the pipeline:
//!
//! - clinical preprocessing splits (lists, labels, dates, separator bars)
//! - a sentence tokenizer, either Punkt-style statistical or rule-file driven
//! - a Penn Treebank style word tokenizer with character offsets
//!
//! ```
//! use clinical_tokenizer::build_tokenizer;
//!
//! let tokenizer = build_tokenizer(true, false, false)?;
//! let sentences = tokenizer.tokenize("WEIGHT: 70kg\n1. Follow up in 2 weeks.");
//! assert_eq!(sentences[0][0].text.as_deref(), Some("WEIGHT"));
//! # Ok::<(), clinical_tokenizer::TokenizerError>(())
//! ```

pub mod builder;
pub mod clinical;
pub mod config;
pub mod error;
pub mod index;
pub mod pattern;
pub mod punctuation;
pub mod sentence;
pub mod tokenizer_exceptions;
pub mod word;

pub use builder::{build_tokenizer, build_tokenizer_with};
pub use clinical::ClinicalSentenceTokenizer;
pub use config::{SentenceSplitter, TokenizerConfig, DEFAULT_RULE_FILE};
pub use error::{Result, TokenizerError};
pub use index::{CharSpan, IndexTokenizer, IndexedToken};
pub use sentence::{SentenceTokenizer, SentenceTokenizerKind, Span};
pub use word::{TreebankWordTokenizer, WordToken};
