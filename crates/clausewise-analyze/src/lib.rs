//! ClauseWise Analyze: heuristic analysis of legal text.
//!
//! Everything here is synchronous and pure: the same text always yields the
//! same sentences, summary, clause buckets and what-if notes. Functions can be
//! called concurrently from request handlers without any locking.

pub mod clauses;
pub mod normalize;
pub mod segment;
pub mod summarize;
pub mod whatif;

pub use clauses::{extract_clauses, ClauseBuckets, ClauseKind};
pub use normalize::normalize;
pub use segment::{sentences, split_sentences, Sentence};
pub use summarize::{extractive_summary, DEFAULT_MAX_SENTENCES};
pub use whatif::{heuristic_whatif, WhatIfItem};

/// Build the lookup tables and compiled patterns used by the analyzers.
///
/// Call once at process startup so the first request does not pay for it.
/// Calling it again is a no-op.
pub fn init() {
    segment::init();
    normalize::init();
    clauses::init();
    tracing::debug!("Text analysis tables initialized");
}
