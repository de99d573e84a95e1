//! DOCX text extraction.
//!
//! Reads `word/document.xml` from the OOXML package and keeps only run text,
//! one line per paragraph.

use std::io::{Cursor, Read};

use clausewise_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:p(?:\s[^>]*?)?(?:/>|>.*?</w:p>)").unwrap());
static RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab|br|cr)(?:\s+w:type="[^"]*")?\s*/>"#).unwrap()
});
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

/// Extract paragraph text from DOCX bytes.
pub fn read_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("Invalid DOCX package: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| Error::Extraction(format!("Missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)?;

    Ok(paragraphs(&xml).join("\n"))
}

/// Text of each `<w:p>` element, in document order.
fn paragraphs(xml: &str) -> Vec<String> {
    PARAGRAPH_RE
        .find_iter(xml)
        .map(|p| {
            let mut text = String::new();
            for caps in RUN_RE.captures_iter(p.as_str()) {
                if let Some(run) = caps.get(1) {
                    text.push_str(&decode_entities(run.as_str()));
                } else {
                    match caps.get(2).map(|m| m.as_str()) {
                        Some("tab") => text.push('\t'),
                        Some(_) => text.push('\n'),
                        None => {}
                    }
                }
            }
            text
        })
        .collect()
}

fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
