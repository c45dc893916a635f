//! Headless one-shot generation for scripts and automated testing.
//!
//! Prints the generated riddle to stdout instead of driving the TUI.
//! With `--offline` the remote call is skipped entirely and the local
//! generator is used directly.

use soup_core::{
    local_puzzle, Difficulty, DisplaySink, Era, FileKeyStore, MiniMaxBackend, PuzzleCategory,
    SoupError, SoupSession,
};
use std::str::FromStr;
use std::sync::Arc;

/// Configuration for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub category: PuzzleCategory,
    pub era: Era,
    pub difficulty: Difficulty,
    pub offline: bool,
}

/// Parse headless configuration from command line arguments.
///
/// Unknown values fall back to the first option with a warning, so a
/// typo still produces a riddle.
pub fn parse_config_from_args(args: &[String]) -> HeadlessConfig {
    fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    fn parse_or_default<T: FromStr + Copy>(value: Option<&str>, default: T, kind: &str) -> T {
        match value {
            None => default,
            Some(s) => s.parse().unwrap_or_else(|_| {
                eprintln!("Warning: unknown {kind} '{s}', using default");
                default
            }),
        }
    }

    HeadlessConfig {
        category: parse_or_default(
            flag_value(args, "--category"),
            PuzzleCategory::Death,
            "category",
        ),
        era: parse_or_default(flag_value(args, "--era"), Era::Ancient, "era"),
        difficulty: parse_or_default(
            flag_value(args, "--difficulty"),
            Difficulty::Easy,
            "difficulty",
        ),
        offline: args.iter().any(|a| a == "--offline"),
    }
}

/// Display sink that prints straight to stdout.
struct StdoutDisplay;

impl DisplaySink for StdoutDisplay {
    fn loading(&self) {
        println!("🤖 MiniMax-M2 正在创作海龟汤...");
    }

    fn content(&self, text: &str) {
        println!("{text}");
    }

    fn notice(&self, text: &str) {
        println!("{text}");
    }
}

/// Run one generation and exit.
pub async fn run_headless(config: HeadlessConfig) -> Result<(), SoupError> {
    if config.offline {
        println!(
            "{}",
            local_puzzle(config.category, config.era, config.difficulty)
        );
        return Ok(());
    }

    let store = Arc::new(FileKeyStore::new(crate::KEY_FILE));
    let mut session = SoupSession::new(
        Arc::new(MiniMaxBackend::new()),
        store,
        Arc::new(StdoutDisplay),
    );

    session
        .generate(config.category, config.era, config.difficulty)
        .await?;

    // Let a scheduled fallback print before the process exits.
    session.finish_pending().await;
    Ok(())
}
