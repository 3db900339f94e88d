//! Configuration for building the clinical tokenizer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default location of the rule-file segmenter's rules, relative to the
/// working directory.
pub const DEFAULT_RULE_FILE: &str = "resources/PyRuSH/conf/rush_rules.tsv";

/// Which sentence tokenizer the builder wires in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentenceSplitter {
    /// Punkt-style statistical boundary detection.
    Statistical,
    /// Rule-file segmentation driven by the TSV rules at `path`.
    RuleFile { path: PathBuf },
}

impl SentenceSplitter {
    pub fn rule_file_default() -> Self {
        SentenceSplitter::RuleFile {
            path: PathBuf::from(DEFAULT_RULE_FILE),
        }
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        SentenceSplitter::Statistical
    }
}

/// Tokenizer build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Keep each token's text alongside its offsets.
    /// Default: false.
    pub keep_token_strings: bool,

    /// Sentence tokenizer selection.
    /// Default: statistical.
    pub sentence_splitter: SentenceSplitter,

    /// Skip the clinical preprocessing split patterns.
    /// Default: true.
    pub disable_custom_preprocessing: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            keep_token_strings: false,
            sentence_splitter: SentenceSplitter::Statistical,
            disable_custom_preprocessing: true,
        }
    }
}

impl TokenizerConfig {
    /// Maps the three boolean build flags onto a config. The rule-file
    /// splitter uses [`DEFAULT_RULE_FILE`].
    pub fn from_flags(
        keep_token_strings: bool,
        enable_alternate_sentence_tokenizer: bool,
        disable_custom_preprocessing: bool,
    ) -> Self {
        let sentence_splitter = if enable_alternate_sentence_tokenizer {
            SentenceSplitter::rule_file_default()
        } else {
            SentenceSplitter::Statistical
        };
        Self {
            keep_token_strings,
            sentence_splitter,
            disable_custom_preprocessing,
        }
    }

    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
