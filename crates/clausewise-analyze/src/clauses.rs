//! Keyword-based clause classification.
//!
//! Every sentence is tested against every bucket pattern, so one sentence can
//! land in several buckets.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::segment::split_sentences;

/// Legal topic a clause can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    Payment,
    Liability,
    Termination,
    Confidentiality,
    Ip,
    Jurisdiction,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 6] = [
        ClauseKind::Payment,
        ClauseKind::Liability,
        ClauseKind::Termination,
        ClauseKind::Confidentiality,
        ClauseKind::Ip,
        ClauseKind::Jurisdiction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Liability => "liability",
            Self::Termination => "termination",
            Self::Confidentiality => "confidentiality",
            Self::Ip => "ip",
            Self::Jurisdiction => "jurisdiction",
        }
    }

    /// Case-insensitive alternation matched anywhere in a sentence.
    fn pattern(&self) -> &'static str {
        match self {
            Self::Payment => {
                r"(?i)payment|fee|compensation|invoice|amount|consideration|price|remuneration"
            }
            Self::Liability => {
                r"(?i)liabilit|indemnif|damages|hold harmless|limitation of liability|cap"
            }
            Self::Termination => r"(?i)terminat|expiry|expire|renewal|notice period|breach",
            Self::Confidentiality => {
                r"(?i)confidential|non-disclosure|nda|proprietary|trade secret"
            }
            Self::Ip => r"(?i)intellectual property|ip rights|license|licence|ownership|assign",
            Self::Jurisdiction => {
                r"(?i)jurisdiction|governing law|venue|dispute|arbitration|forum"
            }
        }
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Compiled once, in `ClauseKind::ALL` order.
static CLAUSE_PATTERNS: Lazy<Vec<(ClauseKind, Regex)>> = Lazy::new(|| {
    ClauseKind::ALL
        .into_iter()
        .map(|kind| (kind, Regex::new(kind.pattern()).unwrap()))
        .collect()
});

pub(crate) fn init() {
    Lazy::force(&CLAUSE_PATTERNS);
}

/// Matching sentences per clause kind. All six kinds are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseBuckets(BTreeMap<ClauseKind, Vec<String>>);

impl Default for ClauseBuckets {
    fn default() -> Self {
        Self(ClauseKind::ALL.into_iter().map(|k| (k, Vec::new())).collect())
    }
}

impl ClauseBuckets {
    /// Sentences in one bucket, in document order.
    pub fn get(&self, kind: ClauseKind) -> &[String] {
        self.0.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseKind, &[String])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Total sentence placements across buckets.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    fn push(&mut self, kind: ClauseKind, sentence: &str) {
        self.0.entry(kind).or_default().push(sentence.to_string());
    }
}

/// Kinds whose pattern matches a single sentence.
pub fn classify_sentence(sentence: &str) -> Vec<ClauseKind> {
    CLAUSE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(sentence))
        .map(|(kind, _)| *kind)
        .collect()
}

/// Sort the sentences of `text` into clause buckets.
pub fn extract_clauses(text: &str) -> ClauseBuckets {
    let mut buckets = ClauseBuckets::default();
    for sentence in split_sentences(text) {
        for kind in classify_sentence(sentence) {
            buckets.push(kind, sentence);
        }
    }
    buckets
}
