//! Minimal MiniMax chat completion API client.
//!
//! This crate provides a focused client for MiniMax's chat completion
//! endpoint: one request, one JSON response, the first choice's message
//! text extracted for the caller. No streaming, no tool use.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_URL: &str = "https://api.minimaxi.com/v1/text/chatcompletion_v2";

/// Default model identifier for chat completions.
pub const DEFAULT_MODEL: &str = "abab6.5s-chat";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token ceiling.
pub const DEFAULT_MAX_TOKENS: usize = 2000;

/// Errors that can occur when using the MiniMax client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API key not configured")]
    NoApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// MiniMax API client.
#[derive(Clone)]
pub struct MiniMax {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl MiniMax {
    /// Create a new MiniMax client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a MiniMax client from the MINIMAX_API_KEY environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("MINIMAX_API_KEY").map_err(|_| Error::NoApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Set the default model for this client.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a completion request and return the extracted response text.
    pub async fn complete(&self, request: Request) -> Result<Response, Error> {
        let api_request = self.build_api_request(&request);
        let headers = self.build_headers()?;

        let response = self
            .client
            .post(API_URL)
            .headers(headers)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        extract_content(api_response)
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| Error::Config(format!("Invalid API key: {e}")))?,
        );
        Ok(headers)
    }

    fn build_api_request(&self, request: &Request) -> ApiRequest {
        let messages: Vec<ApiMessage> = request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        ApiRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A completion request to send to MiniMax.
#[derive(Debug, Clone)]
pub struct Request {
    pub model: Option<String>,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Request {
    /// Create a new request with the given messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: None,
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A completion response from MiniMax.
#[derive(Debug, Clone)]
pub struct Response {
    /// Model that produced the completion.
    pub model: String,

    /// The first choice's message text.
    pub content: String,
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of the response envelope.
///
/// An envelope without that path is a `Parse` error rather than a panic;
/// the upstream contract offers no schema guarantees beyond this field.
fn extract_content(api_response: ApiResponse) -> Result<Response, Error> {
    let model = api_response.model;
    let content = api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Parse("response contained no message content".to_string()))?;

    Ok(Response { model, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MiniMax::new("test-key");
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_client_with_model() {
        let client = MiniMax::new("test-key").with_model("abab7-preview");
        assert_eq!(client.model, "abab7-preview");
    }

    #[test]
    fn test_request_defaults() {
        let request = Request::new(vec![Message::user("你好")]);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.model.is_none());
    }

    #[test]
    fn test_request_builder() {
        let request = Request::new(vec![Message::user("Hello")])
            .with_model("abab6.5s-chat")
            .with_temperature(0.9)
            .with_max_tokens(512);

        assert_eq!(request.model.as_deref(), Some("abab6.5s-chat"));
        assert_eq!(request.temperature, 0.9);
        assert_eq!(request.max_tokens, 512);
    }

    #[test]
    fn test_api_request_serialization() {
        let client = MiniMax::new("test-key");
        let request = Request::new(vec![Message::user("讲个谜题")]);
        let api_request = client.build_api_request(&request);

        let value = serde_json::to_value(&api_request).unwrap();
        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "讲个谜题");
        assert_eq!(value["max_tokens"], 2000);
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{
            "model": "abab6.5s-chat",
            "choices": [{"message": {"role": "assistant", "content": "谜题正文"}}]
        }"#;
        let api_response: ApiResponse = serde_json::from_str(body).unwrap();
        let response = extract_content(api_response).unwrap();
        assert_eq!(response.content, "谜题正文");
        assert_eq!(response.model, "abab6.5s-chat");
    }

    #[test]
    fn test_extract_content_empty_choices() {
        let api_response: ApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = extract_content(api_response).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_extract_content_missing_text() {
        let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let api_response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            extract_content(api_response),
            Err(Error::Parse(_))
        ));
    }
}
