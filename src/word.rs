//! Penn Treebank style word tokenization with character offsets.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use fancy_regex::Regex;
use log::{debug, log_enabled, Level};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Result, TokenizerError};
use crate::pattern;
use crate::tokenizer_exceptions::{split_exception, ExceptionMap, BASE_EXCEPTIONS};

/// A word token with character offsets into the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl WordToken {
    fn new(text: &str, start: usize) -> Self {
        let end = start + text.chars().count();
        Self {
            text: text.to_string(),
            start,
            end,
        }
    }
}

/// Penn Treebank style word tokenizer built from prefix, suffix and infix
/// rules plus an exception table.
#[derive(Debug)]
pub struct TreebankWordTokenizer {
    prefixes: Vec<Regex>,
    suffixes: Vec<Regex>,
    final_period: Regex,
    regex_infixes: Vec<Regex>,
    literal_infix_matcher: Option<AhoCorasick>,
    exceptions: ExceptionMap,
}

fn compile_all(patterns: Vec<String>) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|s| Regex::new(s).map_err(|e| TokenizerError::word_rule(s, e)))
        .collect()
}

impl TreebankWordTokenizer {
    pub fn new() -> Result<Self> {
        let prefixes = compile_all(pattern::get_treebank_prefix_patterns())?;
        let suffixes = compile_all(pattern::get_treebank_suffix_patterns())?;
        let regex_infixes = compile_all(pattern::get_treebank_regex_infix_patterns())?;
        let final_period = Regex::new(pattern::SENTENCE_FINAL_PERIOD_PATTERN)
            .map_err(|e| TokenizerError::word_rule(pattern::SENTENCE_FINAL_PERIOD_PATTERN, e))?;

        let literal_infix_strings = pattern::get_treebank_literal_infix_strings();
        let literal_infix_matcher = if !literal_infix_strings.is_empty() {
            Some(
                AhoCorasickBuilder::new()
                    // LeftmostFirst plus the longest-first ordering of the
                    // literals makes the longest literal win at a shared start.
                    .match_kind(MatchKind::LeftmostFirst)
                    .build(&literal_infix_strings)?,
            )
        } else {
            None
        };

        Ok(Self {
            prefixes,
            suffixes,
            final_period,
            regex_infixes,
            literal_infix_matcher,
            exceptions: BASE_EXCEPTIONS.clone(),
        })
    }

    /// Tokenizes one sentence. Offsets are characters, shifted by
    /// `base_char_offset` (the sentence's character offset in the whole text).
    /// Chunks are tokenized in parallel and reassembled in order.
    pub fn span_tokenize(&self, sentence: &str, base_char_offset: usize) -> Vec<WordToken> {
        let chunks = whitespace_chunks(sentence);
        let last_chunk = chunks.len().saturating_sub(1);

        let tokens: Vec<WordToken> = chunks
            .into_par_iter()
            .enumerate()
            .flat_map_iter(|(idx, (chunk_char_offset, chunk))| {
                self.tokenize_chunk(chunk, base_char_offset + chunk_char_offset, idx == last_chunk)
            })
            .collect();

        if log_enabled!(Level::Debug) {
            let token_chars: usize = tokens.iter().map(|t| t.end - t.start).sum();
            let sentence_chars = sentence.chars().filter(|c| !c.is_whitespace()).count();
            if token_chars != sentence_chars {
                debug!(
                    "[word] character count mismatch for '{}': expected {}, got {}",
                    sentence, sentence_chars, token_chars
                );
            }
        }
        tokens
    }

    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        self.span_tokenize(sentence, 0)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    /// Tokenizes a single whitespace-free chunk with prefix, suffix and infix
    /// rules.
    fn tokenize_chunk(&self, chunk: &str, base_char_offset: usize, sentence_final: bool) -> Vec<WordToken> {
        let mut tokens: Vec<WordToken> = Vec::new();
        if chunk.is_empty() {
            return tokens;
        }

        // 1. Whole-chunk exceptions
        if let Some(parts) = split_exception(&self.exceptions, chunk) {
            debug!("[word] exception for '{}'", chunk);
            return pieces_to_tokens(&parts, base_char_offset);
        }

        let mut work = chunk;
        let mut offset = base_char_offset;

        // --- Prefix Stripping ---
        loop {
            if work.is_empty() {
                break;
            }
            let Some(end) = first_anchored_prefix(&self.prefixes, work) else {
                break;
            };
            let token = WordToken::new(&work[..end], offset);
            offset = token.end;
            tokens.push(token);
            work = &work[end..];
        }

        // --- Suffix Stripping ---
        let mut suffixes_reversed: Vec<&str> = Vec::new();
        while !work.is_empty() {
            let start = trailing_suffix(&self.suffixes, work).or_else(|| {
                if sentence_final {
                    trailing_suffix(std::slice::from_ref(&self.final_period), work)
                } else {
                    None
                }
            });
            let Some(start) = start else {
                break;
            };
            suffixes_reversed.push(&work[start..]);
            work = &work[..start];
        }

        // --- Infix Tokenization ---
        if !work.is_empty() {
            let parts = match split_exception(&self.exceptions, work) {
                Some(parts) => parts,
                None => split_infixes(work, self.literal_infix_matcher.as_ref(), &self.regex_infixes),
            };
            for token in pieces_to_tokens(&parts, offset) {
                offset = token.end;
                tokens.push(token);
            }
        }

        // --- Re-attach Suffixes ---
        for suffix in suffixes_reversed.into_iter().rev() {
            let token = WordToken::new(suffix, offset);
            offset = token.end;
            tokens.push(token);
        }

        debug!(
            "[word] '{}' -> {:?}",
            chunk,
            tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>()
        );
        tokens
    }
}

fn pieces_to_tokens(pieces: &[&str], base_char_offset: usize) -> Vec<WordToken> {
    let mut offset = base_char_offset;
    pieces
        .iter()
        .map(|piece| {
            let token = WordToken::new(piece, offset);
            offset = token.end;
            token
        })
        .collect()
}

/// Byte length of the first prefix rule that matches at the start of `work`.
fn first_anchored_prefix(prefixes: &[Regex], work: &str) -> Option<usize> {
    prefixes.iter().find_map(|re| match re.find(work) {
        Ok(Some(mat)) if mat.start() == 0 && !mat.as_str().is_empty() => Some(mat.end()),
        _ => None,
    })
}

/// Byte start of the first suffix rule whose rightmost match ends `work`.
/// A suffix never consumes the whole of `work`, so a lone "." or "'s" stays a
/// token of its own.
fn trailing_suffix(suffixes: &[Regex], work: &str) -> Option<usize> {
    suffixes.iter().find_map(|re| {
        let matches = re.find_iter(work).collect::<std::result::Result<Vec<_>, _>>().ok()?;
        matches
            .into_iter()
            .rev()
            .find(|m| m.end() == work.len() && !m.as_str().is_empty() && m.start() > 0)
            .map(|m| m.start())
    })
}

/// Splits a chunk at every literal or regex infix match. Overlapping matches
/// are merged, preferring the longest match at a shared start.
fn split_infixes<'a>(chunk: &'a str, literal_matcher: Option<&AhoCorasick>, regex_infixes: &[Regex]) -> Vec<&'a str> {
    if chunk.is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<(usize, usize)> = Vec::new();

    if let Some(matcher) = literal_matcher {
        spans.extend(
            matcher
                .find_iter(chunk)
                .filter(|m| m.end() > m.start())
                .map(|m| (m.start(), m.end())),
        );
    }

    for re in regex_infixes {
        for mat in re.find_iter(chunk).flatten() {
            if !mat.as_str().is_empty() {
                spans.push((mat.start(), mat.end()));
            }
        }
    }

    if spans.is_empty() {
        return vec![chunk];
    }

    spans.sort_by_key(|k| (k.0, std::cmp::Reverse(k.1 - k.0)));

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => {
                if end > last.1 {
                    last.1 = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut last_end = 0;
    for (start, end) in merged {
        if start > last_end {
            parts.push(&chunk[last_end..start]);
        }
        parts.push(&chunk[start..end]);
        last_end = end;
    }
    if last_end < chunk.len() {
        parts.push(&chunk[last_end..]);
    }
    parts
}

/// Whitespace-separated chunks with their character offsets in `sentence`.
fn whitespace_chunks(sentence: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut chunk_start: Option<(usize, usize)> = None; // (byte, char)

    for (char_idx, (byte_idx, c)) in sentence.char_indices().enumerate() {
        match (c.is_whitespace(), chunk_start) {
            (true, Some((start_byte, start_char))) => {
                chunks.push((start_char, &sentence[start_byte..byte_idx]));
                chunk_start = None;
            }
            (false, None) => chunk_start = Some((byte_idx, char_idx)),
            _ => {}
        }
    }
    if let Some((start_byte, start_char)) = chunk_start {
        chunks.push((start_char, &sentence[start_byte..]));
    }
    chunks
}
