//! Offline commands that run the analyzers on a local file.

use std::path::Path;

use clausewise_analyze::{extract_clauses, extractive_summary, DEFAULT_MAX_SENTENCES};
use clausewise_core::{Error, Result};

use crate::routes::analysis::{MAX_SUMMARY_SENTENCES, MIN_SUMMARY_SENTENCES};

pub fn print_help() {
    println!("ClauseWise: legal document summaries, clause extraction and what-if analysis");
    println!();
    println!("Usage: clausewise [command]");
    println!();
    println!("Commands:");
    println!("  (none)                       Start the HTTP server");
    println!("  summarize <file> [count]     Print an extractive summary (default {} sentences)", DEFAULT_MAX_SENTENCES);
    println!("  clauses <file>               Print clause buckets as JSON");
    println!("  help                         Show this help message");
}

/// Extractive summary of a txt, pdf or docx file.
pub fn summarize_file(path: &Path, max_sentences: Option<&str>) -> Result<String> {
    let max_sentences = match max_sentences {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| Error::Validation(format!("invalid sentence count: {}", raw)))?,
        None => DEFAULT_MAX_SENTENCES,
    };
    if !(MIN_SUMMARY_SENTENCES..=MAX_SUMMARY_SENTENCES).contains(&max_sentences) {
        return Err(Error::Validation(format!(
            "sentence count must be between {} and {}",
            MIN_SUMMARY_SENTENCES, MAX_SUMMARY_SENTENCES
        )));
    }
    let extracted = clausewise_ingest::extract_text(path)?;
    Ok(extractive_summary(&extracted.text, max_sentences))
}

/// Clause buckets of a file, pretty-printed as JSON.
pub fn clauses_file(path: &Path) -> Result<String> {
    let extracted = clausewise_ingest::extract_text(path)?;
    Ok(serde_json::to_string_pretty(&extract_clauses(&extracted.text))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEASE: &str = "The Tenant shall pay the monthly fee. \
        Either party may terminate on 30 days notice. \
        The garden is shared.";

    fn write_lease() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.txt");
        std::fs::write(&path, LEASE).unwrap();
        (dir, path)
    }

    #[test]
    fn test_summarize_file() {
        let (_dir, path) = write_lease();
        let summary = summarize_file(&path, Some("3")).unwrap();
        assert_eq!(summary, LEASE);
    }

    #[test]
    fn test_summarize_file_bad_count() {
        let (_dir, path) = write_lease();
        let err = summarize_file(&path, Some("many")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_summarize_file_count_out_of_range() {
        let (_dir, path) = write_lease();
        for count in ["0", "2", "21", "500"] {
            let err = summarize_file(&path, Some(count)).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "count {}", count);
        }
        assert!(summarize_file(&path, Some("20")).is_ok());
    }

    #[test]
    fn test_clauses_file() {
        let (_dir, path) = write_lease();
        let json: serde_json::Value = serde_json::from_str(&clauses_file(&path).unwrap()).unwrap();
        assert_eq!(json["payment"][0], "The Tenant shall pay the monthly fee.");
        assert_eq!(json["termination"][0], "Either party may terminate on 30 days notice.");
        assert_eq!(json["ip"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_missing_file() {
        let err = clauses_file(Path::new("/nonexistent/contract.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
