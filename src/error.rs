//! Error types for building and running the clinical tokenizer.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tokenizer construction.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The sentence rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    RuleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the sentence rule file is malformed.
    #[error("rule file line {line}: {message}")]
    RuleSyntax { line: usize, message: String },

    /// A preprocessing or rule-file pattern failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A word tokenizer rule failed to compile.
    #[error("invalid word rule '{pattern}': {source}")]
    WordRule {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// The literal infix matcher could not be built.
    #[error("literal infix matcher: {0}")]
    LiteralMatcher(#[from] aho_corasick::BuildError),

    /// JSON config could not be parsed, or output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

impl TokenizerError {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        TokenizerError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    pub(crate) fn word_rule(pattern: &str, source: fancy_regex::Error) -> Self {
        TokenizerError::WordRule {
            pattern: pattern.to_string(),
            source: Box::new(source),
        }
    }
}
