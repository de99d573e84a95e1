//! Prompted tasks: abstractive summary and what-if analysis.

use clausewise_analyze::WhatIfItem;
use clausewise_core::Result;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::LLMEndpoint;
use crate::providers::complete;
use crate::types::ChatMessage;

pub const TEMPERATURE: f64 = 0.2;
pub const SUMMARY_MAX_TOKENS: usize = 800;
pub const WHATIF_MAX_TOKENS: usize = 1200;

/// Characters of contract text sent with what-if prompts.
pub const WHATIF_CONTEXT_CHARS: usize = 10_000;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a legal writing assistant. Produce concise, \
    neutral, layperson-friendly summaries that preserve key obligations, parties, amounts, \
    dates, jurisdiction, and termination terms.";

const WHATIF_SYSTEM_PROMPT: &str = "You are a contract analyst. Given a contract text and \
    hypotheticals, explain precise impacts, citing relevant clauses and giving risk notes. \
    Keep each answer under ~180 words.";

pub fn summary_messages(document_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Summarize the following legal document in 8-12 bullet points with short, clear sentences:\n\n{}\n",
            document_text
        )),
    ]
}

pub fn whatif_messages(text: &str, hypotheticals: &[String]) -> Vec<ChatMessage> {
    let bullets = hypotheticals
        .iter()
        .map(|h| format!("- {}", h))
        .collect::<Vec<_>>()
        .join("\n");
    vec![
        ChatMessage::system(WHATIF_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Contract text:\n{}\n\nHypotheticals:\n{}",
            truncate_chars(text, WHATIF_CONTEXT_CHARS),
            bullets
        )),
    ]
}

/// Bulleted plain-language summary of the whole document.
pub async fn abstractive_summary(
    client: &Client,
    endpoint: &LLMEndpoint,
    document_text: &str,
) -> Result<String> {
    let messages = summary_messages(document_text);
    complete(client, endpoint, &messages, TEMPERATURE, SUMMARY_MAX_TOKENS).await
}

/// One analysis per hypothetical, in input order.
pub async fn whatif(
    client: &Client,
    endpoint: &LLMEndpoint,
    text: &str,
    hypotheticals: &[String],
) -> Result<Vec<WhatIfItem>> {
    let messages = whatif_messages(text, hypotheticals);
    let response = complete(client, endpoint, &messages, TEMPERATURE, WHATIF_MAX_TOKENS).await?;

    let blocks = split_answer_blocks(&response);
    debug!(
        "What-if reply: {} blocks for {} hypotheticals",
        blocks.len(),
        hypotheticals.len()
    );
    if !blocks.is_empty() && blocks.len() != hypotheticals.len() {
        warn!(
            "What-if reply has {} blocks for {} hypotheticals; aligning by position",
            blocks.len(),
            hypotheticals.len()
        );
    }

    Ok(align_answers(hypotheticals, &blocks, &response))
}

/// Split a bulleted reply into answer blocks.
pub fn split_answer_blocks(response: &str) -> Vec<String> {
    response
        .split("\n- ")
        .map(|block| block.trim().trim_start_matches(['-', ' ']).trim())
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pair each hypothetical with a block by position.
///
/// Surplus hypotheticals reuse the last block. With no blocks at all every
/// hypothetical gets the raw response.
pub fn align_answers(hypotheticals: &[String], blocks: &[String], raw: &str) -> Vec<WhatIfItem> {
    hypotheticals
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let analysis = blocks
                .get(i)
                .or_else(|| blocks.last())
                .map(String::as_str)
                .unwrap_or(raw);
            WhatIfItem {
                hypothetical: h.clone(),
                analysis: analysis.to_string(),
            }
        })
        .collect()
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
