//! ClauseWise Ingest: turn uploaded files into plain text.
//!
//! Extraction is best effort: the analyzers only need a string, so layout,
//! tables and styling are discarded.

pub mod docx;
pub mod file;

pub use file::{extract_from_bytes, extract_text, ExtractedText, FileType};
