//! Rule-file sentence segmentation.
//!
//! Rules live in a tab-separated file, one per line:
//!
//! ```text
//! <regex>\t<priority>\t<stbegin|stend|pseudo>
//! ```
//!
//! The first capture group marks the boundary. `stbegin` rules open a sentence
//! at the group start and `stend` rules close one at the group end. A rule
//! without a group uses the whole match. A `pseudo` match cancels every begin
//! or end strictly inside its span whose rule priority is not higher than its
//! own. Blank lines and lines starting with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use regex::Regex;

use super::Span;
use crate::error::{Result, TokenizerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Begin,
    End,
    Pseudo,
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stbegin" => Ok(RuleKind::Begin),
            "stend" => Ok(RuleKind::End),
            "pseudo" => Ok(RuleKind::Pseudo),
            other => Err(format!(
                "unknown rule type '{}', expected stbegin, stend or pseudo",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentRule {
    pub pattern: Regex,
    pub priority: u32,
    pub kind: RuleKind,
}

#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    rules: Vec<SegmentRule>,
    source: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Event {
    // Ends sort before begins at the same offset.
    End,
    Begin,
}

impl RuleSegmenter {
    /// Loads rules from `path`. A missing file or a malformed line is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| TokenizerError::RuleFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut segmenter = Self::from_rules_str(&contents)?;
        info!(
            "Loaded {} sentence rules from {}",
            segmenter.rules.len(),
            path.display()
        );
        segmenter.source = Some(path.to_path_buf());
        Ok(segmenter)
    }

    pub fn from_rules_str(contents: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for (idx, raw_line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() != 3 {
                return Err(TokenizerError::RuleSyntax {
                    line: line_no,
                    message: format!(
                        "expected 3 tab-separated columns, found {}",
                        columns.len()
                    ),
                });
            }

            let priority = columns[1].trim().parse::<u32>().map_err(|e| {
                TokenizerError::RuleSyntax {
                    line: line_no,
                    message: format!("invalid priority '{}': {}", columns[1], e),
                }
            })?;
            let kind = columns[2]
                .parse::<RuleKind>()
                .map_err(|message| TokenizerError::RuleSyntax {
                    line: line_no,
                    message,
                })?;
            let pattern =
                Regex::new(columns[0]).map_err(|e| TokenizerError::pattern(columns[0], e))?;

            rules.push(SegmentRule {
                pattern,
                priority,
                kind,
            });
        }

        if rules.is_empty() {
            return Err(TokenizerError::RuleSyntax {
                line: 0,
                message: "rule file contains no rules".to_string(),
            });
        }

        Ok(Self {
            rules,
            source: None,
        })
    }

    pub fn rules(&self) -> &[SegmentRule] {
        &self.rules
    }

    /// The file the rules were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns sentence byte spans covering every non-whitespace character of
    /// `text`, trimmed and in ascending order.
    pub fn span_tokenize(&self, text: &str) -> Vec<Span> {
        let mut boundaries: Vec<(usize, Event, u32)> = Vec::new();
        let mut pseudo: Vec<(usize, usize, u32)> = Vec::new();

        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let marked = caps.get(1).unwrap_or(whole);
                match rule.kind {
                    RuleKind::Begin => boundaries.push((marked.start(), Event::Begin, rule.priority)),
                    RuleKind::End => boundaries.push((marked.end(), Event::End, rule.priority)),
                    RuleKind::Pseudo => pseudo.push((whole.start(), whole.end(), rule.priority)),
                }
            }
        }

        boundaries.retain(|&(pos, event, priority)| {
            let cancelled = pseudo
                .iter()
                .any(|&(start, end, p)| start < pos && pos < end && priority <= p);
            if cancelled {
                debug!("[rush] pseudo rule cancelled {:?} at {}", event, pos);
            }
            !cancelled
        });
        boundaries.sort_by_key(|&(pos, event, _)| (pos, event));

        let mut spans = Vec::new();
        let mut open: Option<usize> = None;
        for (pos, event, _) in boundaries {
            match (event, open) {
                (Event::Begin, None) => open = Some(pos),
                (Event::End, Some(begin)) if pos > begin => {
                    spans.extend(Span::trimmed(text, begin, pos));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(begin) = open {
            spans.extend(Span::trimmed(text, begin, text.len()));
        }

        fill_gaps(text, spans)
    }
}

/// Text not claimed by any rule still has to come out as a sentence.
fn fill_gaps(text: &str, spans: Vec<Span>) -> Vec<Span> {
    let mut filled = Vec::with_capacity(spans.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            filled.extend(Span::trimmed(text, cursor, span.start));
        }
        cursor = span.end;
        filled.push(span);
    }
    filled.extend(Span::trimmed(text, cursor, text.len()));
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "# test rules\n\
        \\A\\s*(\\S)\t0\tstbegin\n\
        [.!?][\"')\\]]*\\s+([\\p{Lu}\\d])\t0\tstbegin\n\
        ([.!?]+[\"')\\]]*)\\s+[\\p{Lu}\\d]\t0\tstend\n\
        (?i)\\b(?:dr|mr|mrs)\\.\\s+\\S\t1\tpseudo\n";

    fn sentences(text: &str) -> Vec<&str> {
        let segmenter = RuleSegmenter::from_rules_str(RULES).unwrap();
        segmenter
            .span_tokenize(text)
            .into_iter()
            .map(|s| s.as_str(text))
            .collect()
    }

    #[test]
    fn parses_rule_columns() {
        let segmenter = RuleSegmenter::from_rules_str(RULES).unwrap();
        assert_eq!(segmenter.rules().len(), 4);
        assert_eq!(segmenter.rules()[3].kind, RuleKind::Pseudo);
        assert_eq!(segmenter.rules()[3].priority, 1);
        assert!(segmenter.source().is_none());
    }

    #[test]
    fn splits_at_begin_and_end_rules() {
        assert_eq!(
            sentences("Patient is stable. Vitals normal."),
            vec!["Patient is stable.", "Vitals normal."]
        );
    }

    #[test]
    fn pseudo_rule_protects_titles() {
        assert_eq!(
            sentences("Seen today. Dr. Smith agrees."),
            vec!["Seen today.", "Dr. Smith agrees."]
        );
    }

    #[test]
    fn leading_whitespace_is_trimmed() {
        assert_eq!(sentences("  lowercase start"), vec!["lowercase start"]);
    }

    #[test]
    fn uncovered_text_becomes_its_own_sentence() {
        let segmenter =
            RuleSegmenter::from_rules_str("\\A(\\S)\t0\tstbegin\n([.!?]+)\\s\t0\tstend\n").unwrap();
        let text = "One. two. three";
        let found: Vec<&str> = segmenter
            .span_tokenize(text)
            .into_iter()
            .map(|s| s.as_str(text))
            .collect();
        assert_eq!(found, vec!["One.", "two. three"]);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = RuleSegmenter::from_rules_str("only\tone\n").unwrap_err();
        assert!(matches!(err, TokenizerError::RuleSyntax { line: 1, .. }));
    }

    #[test]
    fn rejects_unknown_rule_type() {
        let err = RuleSegmenter::from_rules_str("x\t0\tstmiddle\n").unwrap_err();
        assert!(matches!(err, TokenizerError::RuleSyntax { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_priority() {
        let err = RuleSegmenter::from_rules_str("\n\nx\thigh\tstend\n").unwrap_err();
        assert!(matches!(err, TokenizerError::RuleSyntax { line: 3, .. }));
    }

    #[test]
    fn rejects_invalid_regex() {
        let err = RuleSegmenter::from_rules_str("(unclosed\t0\tstend\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Pattern { .. }));
    }

    #[test]
    fn rejects_empty_rule_set() {
        let err = RuleSegmenter::from_rules_str("# nothing here\n\n").unwrap_err();
        assert!(matches!(err, TokenizerError::RuleSyntax { line: 0, .. }));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = RuleSegmenter::from_file("does/not/exist.tsv").unwrap_err();
        match err {
            TokenizerError::RuleFile { path, .. } => {
                assert_eq!(path, PathBuf::from("does/not/exist.tsv"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
