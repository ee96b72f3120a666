//! Per-file summaries from an OpenAI chat-completions endpoint.

use crate::config::SummaryConfig;
use crate::error::DumperError;
use reqwest::blocking::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 128;
const TOP_P: f32 = 1.0;
const ERROR_BODY_LIMIT: usize = 200;

/// Turns one file's content into a short description.
pub trait Summarizer {
    fn summarize(&self, path: &Path, content: &str) -> Result<String, DumperError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn system_prompt(path: &Path) -> String {
    format!(
        "You are an expert text summarizer. \
         Summarize the given file content into a short text summary. \
         Use technical terms that are industry standard. \
         Format the response with: // Summary of file {}:\n",
        path.display()
    )
}

fn build_request<'a>(model: &'a str, path: &Path, content: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt(path),
            },
            ChatMessage {
                role: "user",
                content: format!("Sum up the following:\n{}", content),
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        top_p: TOP_P,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Maps a non-success HTTP status to an error.
fn check_status(status: u16, body: &str) -> Result<(), DumperError> {
    let body = truncate(body.trim(), ERROR_BODY_LIMIT);
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(DumperError::service(format!(
            "authentication failed ({}). Check the API key. Response: {}",
            status, body
        ))),
        429 => Err(DumperError::service(format!(
            "rate limited or out of quota (429). Response: {}",
            body
        ))),
        _ => Err(DumperError::service(format!("HTTP {} error: {}", status, body))),
    }
}

/// Pulls the trimmed text of the first choice out of a response body.
fn parse_summary(body: &str) -> Result<String, DumperError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DumperError::service(format!("malformed response: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| DumperError::service("malformed response: no message content"))
}

/// Blocking client for `POST {api_base}/chat/completions`.
pub struct OpenAiSummarizer {
    client: Client,
    config: SummaryConfig,
}

impl OpenAiSummarizer {
    pub fn new(config: SummaryConfig) -> Result<Self, DumperError> {
        let client = Client::builder()
            .build()
            .map_err(|e| DumperError::service(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, path: &Path, content: &str) -> Result<String, DumperError> {
        info!("Summarizing {} with {}", path.display(), self.config.model);
        let request = build_request(&self.config.model, path, content);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .map_err(|e| DumperError::service(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| DumperError::service(format!("failed to read response: {}", e)))?;
        debug!("Summary response for {}: HTTP {}", path.display(), status);

        check_status(status, &body)?;
        parse_summary(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn request_carries_model_prompt_and_sampling() {
        let request = build_request("gpt-4o-mini", Path::new("src/lib.rs"), "pub fn a() {}");
        let json: Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 128);
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("// Summary of file src/lib.rs:"));
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(
            json["messages"][1]["content"],
            "Sum up the following:\npub fn a() {}"
        );
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  // Summary of file a.rs:\nDoes things.\n"}}]}"#;
        assert_eq!(
            parse_summary(body).unwrap(),
            "// Summary of file a.rs:\nDoes things."
        );
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = parse_summary(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, DumperError::ExternalService(_)));
        assert!(err.to_string().contains("no message content"));
    }

    #[test]
    fn null_content_is_malformed() {
        let body = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert!(parse_summary(body).is_err());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_summary("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("malformed response"));
    }

    #[test]
    fn status_classification() {
        assert!(check_status(200, "").is_ok());
        assert!(check_status(401, "nope").unwrap_err().to_string().contains("authentication"));
        assert!(check_status(429, "slow down").unwrap_err().to_string().contains("rate limited"));
        assert!(check_status(500, "oops").unwrap_err().to_string().contains("HTTP 500"));
    }

    #[test]
    fn error_bodies_are_truncated() {
        let body = "é".repeat(500);
        let message = check_status(502, &body).unwrap_err().to_string();
        assert_eq!(message.matches('é').count(), ERROR_BODY_LIMIT);
    }
}
