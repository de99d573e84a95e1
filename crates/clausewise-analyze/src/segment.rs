//! Sentence segmentation for legal text.
//!
//! Boundaries come from the Unicode sentence-break rules (UAX #29). Pieces
//! that stop on an abbreviation ("Mr.", "Fig.") or on a bare clause number
//! ("1.2.", "Section 4.") are glued onto the piece that follows. Company
//! suffixes ("Inc.") and "No." are glued on only when the next piece does not
//! open with a capital. A list marker at the start of a line always opens a
//! new sentence.
//! Single line breaks are treated as spaces so wrapped lines from PDF
//! extraction stay in one sentence; blank lines still end a sentence.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// A sentence of a document, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Position in the document's sentence sequence.
    pub index: usize,
    /// Trimmed sentence text.
    pub text: &'a str,
}

/// Abbreviations that never end a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "dr", "mr", "mrs", "ms", "prof", "sr", "jr",
        "e.g", "i.e", "vs", "approx", "cf", "viz",
        "u.s", "u.k", "p.m", "a.m",
        "st", "ave", "blvd", "dept", "fig",
        "sec", "art", "para", "cl", "sch", "pp", "vol",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that also close sentences ("... between Beta and Acme Inc.").
static SENTENCE_FINAL_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["inc", "ltd", "corp", "co", "llc", "plc", "no", "nos"]
        .into_iter()
        .collect()
});

/// Words that introduce a numbered heading ("Section 4.").
static HEADING_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "section", "article", "clause", "part", "paragraph", "schedule", "annex",
        "appendix", "exhibit",
    ]
    .into_iter()
    .collect()
});

/// A list marker ("2.", "b.", "iv)", "(c)") opening a line.
static LINE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(\(?(?:\d{1,3}(?:\.\d{1,3})*|[A-Za-z]|[ivxIVX]{1,4})[.)])(?:[ \t]|\r?$)")
        .unwrap()
});

pub(crate) fn init() {
    Lazy::force(&ABBREVIATIONS);
    Lazy::force(&SENTENCE_FINAL_ABBREVIATIONS);
    Lazy::force(&HEADING_WORDS);
    Lazy::force(&LINE_MARKER_RE);
}

/// How a piece relates to the piece after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Ends,
    Joins,
    /// Joined unless the next piece opens with a capitalised word.
    JoinsUnlessCapitalised,
}

/// Split text into indexed sentences.
pub fn sentences(text: &str) -> Vec<Sentence<'_>> {
    split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Sentence { index, text })
        .collect()
}

/// Split text into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // Same byte length as `text`, so offsets map straight back.
    let scan = unwrap_lines(text);
    let markers = line_markers(text);

    let mut sentences = Vec::new();
    let mut pending: Option<(usize, Continuation)> = None;

    for (start, piece) in scan.split_sentence_bound_indices() {
        let end = start + piece.len();
        let mut begin = match pending.take() {
            Some((begin, Continuation::JoinsUnlessCapitalised)) if starts_capitalised(piece) => {
                push_trimmed(&mut sentences, &text[begin..start]);
                start
            }
            Some((begin, _)) => begin,
            None => start,
        };

        // A list marker at the start of a line opens a new sentence.
        for &marker in markers.iter() {
            if !(marker > begin && marker < end) {
                continue;
            }
            push_trimmed(&mut sentences, &text[begin..marker]);
            begin = marker;
        }

        let candidate = text[begin..end].trim();
        if candidate.is_empty() {
            continue;
        }
        match continuation(candidate) {
            Continuation::Ends => sentences.push(candidate),
            joins => pending = Some((begin, joins)),
        }
    }

    if let Some((begin, _)) = pending {
        push_trimmed(&mut sentences, &text[begin..]);
    }

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, span: &'a str) {
    let span = span.trim();
    if !span.is_empty() {
        sentences.push(span);
    }
}

fn starts_capitalised(piece: &str) -> bool {
    piece
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase())
}

/// Byte offsets of list markers that open a line, after the first line.
fn line_markers(text: &str) -> Vec<usize> {
    LINE_MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.start())
        .filter(|&offset| offset > 0)
        .collect()
}

/// Replace line breaks inside a paragraph with spaces.
///
/// A whitespace run holding at most one `\n` is a wrapped line; runs with two
/// or more are paragraph breaks and are left alone.
fn unwrap_lines(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let newlines = bytes[run_start..i].iter().filter(|&&b| b == b'\n').count();
        if newlines <= 1 {
            for b in &mut bytes[run_start..i] {
                if *b == b'\n' || *b == b'\r' {
                    *b = b' ';
                }
            }
        }
    }
    // ASCII-for-ASCII substitution keeps the UTF-8 valid.
    String::from_utf8(bytes).unwrap_or_else(|_| text.to_string())
}

/// Whether a piece stops on a period that does not end a sentence.
fn continuation(candidate: &str) -> Continuation {
    if !candidate.ends_with('.') {
        return Continuation::Ends;
    }

    let tokens: Vec<&str> = candidate.split_whitespace().collect();
    let Some(last) = tokens.last() else {
        return Continuation::Ends;
    };

    let word = last
        .trim_start_matches(|c: char| matches!(c, '(' | '[' | '"' | '\'' | '\u{201C}' | '\u{2018}'))
        .trim_end_matches('.')
        .to_lowercase();
    if word.is_empty() {
        return Continuation::Ends;
    }

    if ABBREVIATIONS.contains(word.as_str()) {
        return Continuation::Joins;
    }
    if SENTENCE_FINAL_ABBREVIATIONS.contains(word.as_str()) {
        return Continuation::JoinsUnlessCapitalised;
    }

    // Bare list markers and numbered headings, not references mid-sentence.
    let marker = match tokens.as_slice() {
        [_] => is_enumerator(&word),
        [heading, _] => {
            let heading = heading.to_lowercase();
            HEADING_WORDS.contains(heading.as_str()) && is_enumerator(&word)
        }
        _ => false,
    };
    if marker {
        Continuation::Joins
    } else {
        Continuation::Ends
    }
}

/// "1", "1.2", "a", "iv" and the like.
fn is_enumerator(word: &str) -> bool {
    let numbered = word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.');
    let lettered = word.chars().count() == 1 && word.chars().all(|c| c.is_ascii_alphabetic());
    let roman = word.len() <= 4 && word.chars().all(|c| matches!(c, 'i' | 'v' | 'x'));
    numbered || lettered || roman
}
