//! Turtle soup riddle engine with AI generation and local fallback.
//!
//! This crate provides:
//! - The riddle data model (category, era, difficulty)
//! - Prompt construction for remote generation via MiniMax
//! - A local template/dynamic generator that never fails
//! - Session orchestration with error-then-fallback display
//! - API key persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use soup_core::{
//!     Difficulty, Era, FileKeyStore, MiniMaxBackend, PuzzleCategory, SoupSession,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileKeyStore::new("minimax_api_key.json"));
//!     let display = Arc::new(MyDisplay::new());
//!     let mut session = SoupSession::new(Arc::new(MiniMaxBackend::new()), store, display);
//!
//!     session
//!         .generate(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod generate;
pub mod keystore;
pub mod prompt;
pub mod puzzle;
pub mod session;
pub mod templates;
pub mod testing;

// Primary public API
pub use generate::{dynamic_puzzle, local_puzzle};
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore, StoreError};
pub use prompt::build_prompt;
pub use puzzle::{Difficulty, Era, ParseDimensionError, PuzzleCategory};
pub use session::{
    ChatBackend, DisplaySink, MiniMaxBackend, Outcome, SessionConfig, SoupError, SoupSession,
    MISSING_KEY_NOTICE,
};
pub use testing::{DisplayEvent, MockBackend, RecordingDisplay, Scripted};
