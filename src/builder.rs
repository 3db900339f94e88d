//! Assembles the clinical tokenizer pipeline.

use log::info;

use crate::clinical::ClinicalSentenceTokenizer;
use crate::config::{SentenceSplitter, TokenizerConfig};
use crate::error::Result;
use crate::index::IndexTokenizer;
use crate::pattern::{clinical_preprocess_patterns, CLINICAL_SENT_END_CHARS};
use crate::sentence::{PunktLanguageVars, PunktSentenceTokenizer, RuleSegmenter, SentenceTokenizer};
use crate::word::TreebankWordTokenizer;

/// Builds the clinical tokenizer from the three build flags.
///
/// `build_tokenizer(false, false, true)` gives the default pipeline: Punkt
/// sentences, no clinical preprocessing and offsets without token text.
pub fn build_tokenizer(
    keep_token_strings: bool,
    enable_alternate_sentence_tokenizer: bool,
    disable_custom_preprocessing: bool,
) -> Result<IndexTokenizer> {
    build_tokenizer_with(&TokenizerConfig::from_flags(
        keep_token_strings,
        enable_alternate_sentence_tokenizer,
        disable_custom_preprocessing,
    ))
}

/// Builds the clinical tokenizer from a full config.
///
/// A rule file that is missing or malformed is an error. There is no fallback
/// to the statistical tokenizer.
pub fn build_tokenizer_with(config: &TokenizerConfig) -> Result<IndexTokenizer> {
    info!("Building clinical tokenizer...");
    let preprocess_split_patterns = clinical_preprocess_patterns();

    let sentence_tokenizer = match &config.sentence_splitter {
        SentenceSplitter::RuleFile { path } => {
            info!("Enabling rule-file segmenter for sentence tokenization...");
            SentenceTokenizer::RuleFile(RuleSegmenter::from_file(path)?)
        }
        SentenceSplitter::Statistical => {
            info!("Enabling Punkt for sentence tokenization...");
            SentenceTokenizer::Statistical(clinical_punkt())
        }
    };
    info!("Type of sentence tokenizer : {:?}", sentence_tokenizer.kind());

    let enabled_patterns: &[&str] = if config.disable_custom_preprocessing {
        info!("Not allowing custom preprocessing expressions...");
        &[]
    } else {
        info!(
            "Enabling custom preprocessing expressions.  Total : {}",
            preprocess_split_patterns.len()
        );
        &preprocess_split_patterns
    };

    let clinical = ClinicalSentenceTokenizer::new(sentence_tokenizer, enabled_patterns)?;
    let words = TreebankWordTokenizer::new()?;
    Ok(IndexTokenizer::new(clinical, words, config.keep_token_strings))
}

/// Punkt with sentence ends limited to `.` and `!`. The language vars are
/// overridden on the constructed tokenizer, not at declaration.
fn clinical_punkt() -> PunktSentenceTokenizer {
    let mut punkt = PunktSentenceTokenizer::new(PunktLanguageVars::default());
    punkt
        .lang_vars_mut()
        .set_sent_end_chars(CLINICAL_SENT_END_CHARS);
    info!("Sentence end chars : {:?}", punkt.lang_vars().sent_end_chars());
    punkt
}
