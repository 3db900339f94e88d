//! Word tokenizer exceptions: contractions split without punctuation.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// One piece of a split exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionToken {
    pub orth: String,
}

/// Lowercased chunk -> the pieces it splits into.
pub type ExceptionMap = HashMap<String, Vec<ExceptionToken>>;

// Penn Treebank contractions that carry no apostrophe at the split point.
const CONTRACTIONS: &[&[&str]] = &[
    &["can", "not"],
    &["d", "'ye"],
    &["gim", "me"],
    &["gon", "na"],
    &["got", "ta"],
    &["lem", "me"],
    &["more", "'n"],
    &["wan", "na"],
    &["'t", "is"],
    &["'t", "was"],
];

lazy_static! {
    pub static ref BASE_EXCEPTIONS: ExceptionMap = {
        let mut m = ExceptionMap::new();
        for pieces in CONTRACTIONS {
            m.insert(
                pieces.concat(),
                pieces
                    .iter()
                    .map(|p| ExceptionToken { orth: p.to_string() })
                    .collect(),
            );
        }
        m
    };
}

/// Splits `chunk` by a matching exception, preserving the chunk's original
/// casing. Returns `None` if there is no exception or its pieces do not cover
/// the chunk exactly.
pub fn split_exception<'a>(exceptions: &ExceptionMap, chunk: &'a str) -> Option<Vec<&'a str>> {
    let pieces = exceptions.get(&chunk.to_lowercase())?;

    let mut parts = Vec::with_capacity(pieces.len());
    let mut rest = chunk;
    for piece in pieces {
        let piece_chars = piece.orth.chars().count();
        let split_at = rest
            .char_indices()
            .nth(piece_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split_at);
        if head.chars().count() != piece_chars {
            return None;
        }
        parts.push(head);
        rest = tail;
    }
    rest.is_empty().then_some(parts)
}
