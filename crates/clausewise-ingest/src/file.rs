//! File text extraction for the supported upload formats.

use std::path::Path;

use clausewise_core::{Error, Result};
use tracing::debug;

use crate::docx;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Pdf,
    WordDocument,
    Unknown,
}

impl FileType {
    /// Detect file type from extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            // Legacy .doc is not OOXML; the zip reader rejects it.
            "docx" | "doc" => Self::WordDocument,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a file name.
    pub fn from_filename(filename: &str) -> Self {
        Self::from_extension(extension_of(filename))
    }

    /// MIME type reported for documents of this type.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::PlainText => Some(MIME_TEXT),
            Self::Pdf => Some(MIME_PDF),
            Self::WordDocument => Some(MIME_DOCX),
            Self::Unknown => None,
        }
    }
}

/// Text pulled out of a file, with the detected MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub content_type: &'static str,
}

/// Extract text from an in-memory upload, choosing the reader by file name.
pub fn extract_from_bytes(filename: &str, bytes: &[u8]) -> Result<ExtractedText> {
    let file_type = FileType::from_filename(filename);

    let text = match file_type {
        FileType::PlainText => read_plain_text(bytes),
        FileType::Pdf => read_pdf(bytes)?,
        FileType::WordDocument => docx::read_docx(bytes)?,
        FileType::Unknown => return Err(unsupported(filename)),
    };
    let content_type = file_type
        .content_type()
        .ok_or_else(|| unsupported(filename))?;

    debug!("Extracted {} bytes of text from {}", text.len(), filename);

    Ok(ExtractedText { text, content_type })
}

fn unsupported(filename: &str) -> Error {
    let ext = extension_of(filename);
    if ext.is_empty() {
        Error::UnsupportedFormat("(none)".to_string())
    } else {
        Error::UnsupportedFormat(format!(".{}", ext.to_lowercase()))
    }
}

/// Extract text from a file on disk.
pub fn extract_text(path: &Path) -> Result<ExtractedText> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    extract_from_bytes(filename, &bytes)
}

/// Decode UTF-8, dropping invalid byte sequences.
fn read_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}

#[cfg(feature = "pdf")]
fn read_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| Error::Extraction(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_bytes: &[u8]) -> Result<String> {
    tracing::warn!("PDF upload rejected: built without the `pdf` feature");
    Err(Error::Extraction("PDF support is not enabled in this build".into()))
}

fn extension_of(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}
