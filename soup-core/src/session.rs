//! SoupSession - the primary public API for riddle generation.
//!
//! The session coordinates three injected capabilities: a credential
//! store, a chat backend, and a display sink. One generation is in
//! flight at a time; a remote failure shows the error immediately and
//! replaces it with locally generated content after a short delay.

use crate::generate::local_puzzle;
use crate::keystore::{KeyStore, StoreError};
use crate::prompt::build_prompt;
use crate::puzzle::{Difficulty, Era, PuzzleCategory};
use async_trait::async_trait;
use minimax::{Message, MiniMax, Request};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Notice shown when no API key has been configured.
pub const MISSING_KEY_NOTICE: &str = "请先配置MiniMax API Key";

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SoupError {
    #[error("MiniMax API error: {0}")]
    Api(#[from] minimax::Error),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration for a riddle generation session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model override (defaults to the client's model).
    pub model: Option<String>,

    /// Maximum tokens for generated riddles.
    pub max_tokens: usize,

    /// Temperature for generation.
    pub temperature: f32,

    /// How long the error message stays visible before the local
    /// fallback replaces it.
    pub fallback_delay: Duration,
}

impl SessionConfig {
    /// Create a config with the fixed generation parameters.
    pub fn new() -> Self {
        Self {
            model: None,
            max_tokens: minimax::DEFAULT_MAX_TOKENS,
            temperature: minimax::DEFAULT_TEMPERATURE,
            fallback_delay: Duration::from_secs(2),
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens for responses.
    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = tokens;
        self
    }

    /// Set temperature for generation.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the delay before the fallback replaces an error display.
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where generated content and notices are shown.
///
/// The TUI renders these into its output panel; tests record them.
pub trait DisplaySink: Send + Sync {
    /// Enter the loading state.
    fn loading(&self);

    /// Replace the displayed content.
    fn content(&self, text: &str);

    /// Show a user-facing notice outside the content area.
    fn notice(&self, text: &str);
}

/// The remote generation seam.
///
/// Production uses [`MiniMaxBackend`]; tests inject scripted doubles.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate a riddle document for the prompt using the given key.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, minimax::Error>;
}

/// Chat backend that calls the MiniMax API.
pub struct MiniMaxBackend {
    model: Option<String>,
    max_tokens: usize,
    temperature: f32,
}

impl MiniMaxBackend {
    /// Create a backend with the default generation parameters.
    pub fn new() -> Self {
        Self {
            model: None,
            max_tokens: minimax::DEFAULT_MAX_TOKENS,
            temperature: minimax::DEFAULT_TEMPERATURE,
        }
    }

    /// Create a backend with parameters from a session config.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for MiniMaxBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MiniMaxBackend {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, minimax::Error> {
        let mut client = MiniMax::new(api_key);
        if let Some(ref model) = self.model {
            client = client.with_model(model);
        }

        let request = Request::new(vec![Message::user(prompt)])
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = client.complete(request).await?;
        Ok(response.content)
    }
}

/// How a generation attempt concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote model produced the displayed riddle.
    Remote,

    /// The remote call failed; the error is displayed and a local
    /// fallback will replace it once the delay elapses.
    FallbackScheduled,

    /// No API key is configured; nothing was attempted.
    MissingKey,
}

/// A riddle generation session.
pub struct SoupSession {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn KeyStore>,
    display: Arc<dyn DisplaySink>,
    config: SessionConfig,
    pending_fallback: Option<JoinHandle<()>>,
}

impl SoupSession {
    /// Create a session over the three injected capabilities.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn KeyStore>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            backend,
            store,
            display,
            config: SessionConfig::default(),
            pending_fallback: None,
        }
    }

    /// Configure the session.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a riddle for the selected combination.
    ///
    /// Reads the stored key, builds the prompt, and calls the backend.
    /// On success the returned document is displayed as-is. On failure
    /// the error message is displayed immediately and, after the
    /// configured delay, replaced by locally generated content. A new
    /// call supersedes any still-pending replacement.
    pub async fn generate(
        &mut self,
        category: PuzzleCategory,
        era: Era,
        difficulty: Difficulty,
    ) -> Result<Outcome, SoupError> {
        if let Some(pending) = self.pending_fallback.take() {
            pending.abort();
        }

        let Some(api_key) = self.store.load().await? else {
            self.display.notice(MISSING_KEY_NOTICE);
            return Ok(Outcome::MissingKey);
        };

        self.display.loading();
        let prompt = build_prompt(category, era, difficulty);

        match self.backend.generate(&api_key, &prompt).await {
            Ok(document) => {
                self.display.content(&document);
                Ok(Outcome::Remote)
            }
            Err(e) => {
                self.display
                    .content(&format!("❌ 生成失败: {e}\n\n🔄 正在使用备用生成模式..."));

                let fallback = local_puzzle(category, era, difficulty);
                let display = Arc::clone(&self.display);
                let delay = self.config.fallback_delay;
                self.pending_fallback = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    display.content(&fallback);
                }));

                Ok(Outcome::FallbackScheduled)
            }
        }
    }

    /// Whether a fallback replacement is still scheduled.
    pub fn has_pending_fallback(&self) -> bool {
        self.pending_fallback.is_some()
    }

    /// Wait for a scheduled fallback replacement to run, if any.
    pub async fn finish_pending(&mut self) {
        if let Some(pending) = self.pending_fallback.take() {
            // Aborted tasks resolve with a JoinError; either way the
            // session has no more pending work.
            let _ = pending.await;
        }
    }

    /// Persist an API key through the injected store.
    pub async fn save_key(&self, api_key: &str) -> Result<(), SoupError> {
        self.store.save(api_key).await?;
        Ok(())
    }

    /// Read the stored API key, if any.
    pub async fn saved_key(&self) -> Result<Option<String>, SoupError> {
        Ok(self.store.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.fallback_delay, Duration::from_secs(2));
        assert!(config.model.is_none());
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .with_model("abab7-preview")
            .with_max_tokens(1024)
            .with_temperature(0.3)
            .with_fallback_delay(Duration::from_millis(500));

        assert_eq!(config.model.as_deref(), Some("abab7-preview"));
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.fallback_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_backend_from_config() {
        let config = SessionConfig::new().with_model("abab7-preview").with_max_tokens(256);
        let backend = MiniMaxBackend::from_config(&config);
        assert_eq!(backend.model.as_deref(), Some("abab7-preview"));
        assert_eq!(backend.max_tokens, 256);
    }
}
