//! External LLM provider completions.
//!
//! OpenAI and Groq share the chat-completions format. Anthropic uses the
//! Messages API, which takes the system prompt as a top-level field.

use std::time::Duration;

use clausewise_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::LLMEndpoint;
use crate::types::{ChatMessage, LLMProvider};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP client shared by all provider calls.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))
}

/// Run one completion against the resolved endpoint and return the reply text.
pub async fn complete(
    client: &Client,
    endpoint: &LLMEndpoint,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: usize,
) -> Result<String> {
    let request = match endpoint.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => client
            .post(format!("{}/chat/completions", endpoint.base_url))
            .header("Authorization", format!("Bearer {}", endpoint.api_key))
            .json(&openai_body(&endpoint.model, messages, temperature, max_tokens)),
        LLMProvider::Anthropic => client
            .post(format!("{}/messages", endpoint.base_url))
            .header("x-api-key", &endpoint.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&anthropic_body(&endpoint.model, messages, temperature, max_tokens)),
    };

    debug!(
        "Requesting completion from {} with model {}",
        endpoint.provider, endpoint.model
    );

    let response = request
        .send()
        .await
        .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{} API error {}: {}", endpoint.provider, status, body);
        return Err(Error::Llm(format!("API error {}: {}", status, body)));
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| Error::Http(format!("Invalid response body: {}", e)))?;

    match endpoint.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => parse_openai_response(&data),
        LLMProvider::Anthropic => parse_anthropic_response(&data),
    }
}

/// Request body for OpenAI-compatible chat completions.
pub fn openai_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: usize,
) -> Value {
    let msgs: Vec<Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();
    json!({
        "model": model,
        "messages": msgs,
        "temperature": temperature,
        "max_tokens": max_tokens,
    })
}

/// Request body for Anthropic's Messages API.
pub fn anthropic_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: usize,
) -> Value {
    // Separate system messages from conversation
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == "system")
        .map(|m| m.content.as_str())
        .collect();

    let conv_msgs: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv_msgs,
        "temperature": temperature,
        "max_tokens": max_tokens,
    });
    if !system.is_empty() {
        body["system"] = json!(system.join("\n\n"));
    }
    body
}

pub fn parse_openai_response(data: &Value) -> Result<String> {
    data["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Llm("Response has no message content".into()))
}

/// Concatenate the text blocks of an Anthropic reply.
pub fn parse_anthropic_response(data: &Value) -> Result<String> {
    let blocks = data["content"]
        .as_array()
        .ok_or_else(|| Error::Llm("Response has no content blocks".into()))?;

    let text: String = blocks
        .iter()
        .filter(|b| b["type"] == "text")
        .filter_map(|b| b["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(Error::Llm("Response has no text content".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are a contract analyst."),
            ChatMessage::user("Summarize this."),
        ]
    }

    #[test]
    fn test_openai_body_keeps_system_message() {
        let body = openai_body("gpt-4o-mini", &messages(), 0.2, 800);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_anthropic_body_lifts_system_prompt() {
        let body = anthropic_body("claude", &messages(), 0.2, 1200);
        assert_eq!(body["system"], "You are a contract analyst.");
        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0]["role"], "user");
        assert_eq!(body["max_tokens"], 1200);
    }

    #[test]
    fn test_parse_openai_response() {
        let data = json!({"choices": [{"message": {"role": "assistant", "content": "- One\n- Two"}}]});
        assert_eq!(parse_openai_response(&data).unwrap(), "- One\n- Two");

        let err = parse_openai_response(&json!({"choices": []})).unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
    }

    #[test]
    fn test_parse_anthropic_response() {
        let data = json!({"content": [
            {"type": "text", "text": "First. "},
            {"type": "tool_use", "id": "x"},
            {"type": "text", "text": "Second."}
        ]});
        assert_eq!(parse_anthropic_response(&data).unwrap(), "First. Second.");

        assert!(parse_anthropic_response(&json!({"content": []})).is_err());
        assert!(parse_anthropic_response(&json!({"error": "x"})).is_err());
    }

    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }
}
