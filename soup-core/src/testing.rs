//! Testing utilities for the riddle engine.
//!
//! This module provides scripted doubles for the session's injected
//! capabilities:
//! - `MockBackend` for deterministic remote responses without API calls
//! - `RecordingDisplay` for asserting what the player would have seen

use crate::session::{ChatBackend, DisplaySink};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A scripted remote response.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Successful generation returning this document.
    Document(String),
    /// HTTP failure with this status code.
    ApiError(u16),
    /// Network-level failure with no response.
    NetworkError,
    /// Success status but an envelope without message content.
    MalformedBody,
}

/// A chat backend that returns scripted responses in order.
///
/// Use this for deterministic tests without API calls. The call counter
/// lets tests assert that no network attempt was made.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock scripted to return one document.
    pub fn with_document(text: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.queue(Scripted::Document(text.into()));
        mock
    }

    /// Create a mock scripted to fail with one HTTP status.
    pub fn with_api_error(status: u16) -> Self {
        let mock = Self::new();
        mock.queue(Scripted::ApiError(status));
        mock
    }

    /// Append a scripted response.
    pub fn queue(&self, response: Scripted) {
        self.responses
            .lock()
            .expect("mock backend lock poisoned")
            .push_back(response);
    }

    /// Number of generation calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn generate(&self, _api_key: &str, _prompt: &str) -> Result<String, minimax::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .responses
            .lock()
            .expect("mock backend lock poisoned")
            .pop_front();

        match next {
            Some(Scripted::Document(text)) => Ok(text),
            Some(Scripted::ApiError(status)) => Err(minimax::Error::Api {
                status,
                message: "scripted error".to_string(),
            }),
            Some(Scripted::NetworkError) => {
                Err(minimax::Error::Network("connection refused".to_string()))
            }
            Some(Scripted::MalformedBody) => Err(minimax::Error::Parse(
                "response contained no message content".to_string(),
            )),
            None => Err(minimax::Error::Network(
                "mock backend has no more scripted responses".to_string(),
            )),
        }
    }
}

/// What the display sink was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Loading,
    Content(String),
    Notice(String),
}

/// A display sink that records everything it is shown.
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    /// Create an empty recording display.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in order.
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events
            .lock()
            .expect("recording display lock poisoned")
            .clone()
    }

    /// The most recent content replacement, if any.
    pub fn last_content(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                DisplayEvent::Content(text) => Some(text),
                _ => None,
            })
    }

    /// All content replacements, in order.
    pub fn contents(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Content(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// All notices, in order.
    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySink for RecordingDisplay {
    fn loading(&self) {
        self.events
            .lock()
            .expect("recording display lock poisoned")
            .push(DisplayEvent::Loading);
    }

    fn content(&self, text: &str) {
        self.events
            .lock()
            .expect("recording display lock poisoned")
            .push(DisplayEvent::Content(text.to_string()));
    }

    fn notice(&self, text: &str) {
        self.events
            .lock()
            .expect("recording display lock poisoned")
            .push(DisplayEvent::Notice(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_scripted_order() {
        let mock = MockBackend::new();
        mock.queue(Scripted::Document("one".to_string()));
        mock.queue(Scripted::ApiError(503));

        assert_eq!(mock.generate("key", "prompt").await.unwrap(), "one");
        assert!(matches!(
            mock.generate("key", "prompt").await,
            Err(minimax::Error::Api { status: 503, .. })
        ));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_backend_exhausted() {
        let mock = MockBackend::new();
        assert!(matches!(
            mock.generate("key", "prompt").await,
            Err(minimax::Error::Network(_))
        ));
    }

    #[test]
    fn test_recording_display_accessors() {
        let display = RecordingDisplay::new();
        display.loading();
        display.content("first");
        display.notice("heads up");
        display.content("second");

        assert_eq!(display.events().len(), 4);
        assert_eq!(display.last_content().as_deref(), Some("second"));
        assert_eq!(display.contents(), vec!["first", "second"]);
        assert_eq!(display.notices(), vec!["heads up"]);
    }
}
