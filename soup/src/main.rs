//! Turtle soup riddle generator TUI.
//!
//! A terminal front end for generating situational logic riddles via
//! the MiniMax API, with a local fallback when the call fails.
//!
//! # Headless Mode
//!
//! Run with `--headless` for one-shot generation suitable for scripts:
//!
//! ```bash
//! cargo run -p soup -- --headless --category logic --era modern --difficulty hard
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use soup_core::{FileKeyStore, MiniMaxBackend, SoupSession};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use app::{App, SharedDisplay};
use events::{handle_event, EventResult};
use ui::render;

/// Where the API key is persisted between runs.
pub const KEY_FILE: &str = "minimax_api_key.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--headless") {
        let config = headless::parse_config_from_args(&args);
        return headless::run_headless(config).await.map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let display = Arc::new(SharedDisplay::new());
    let store = Arc::new(FileKeyStore::new(KEY_FILE));
    let mut session = SoupSession::new(Arc::new(MiniMaxBackend::new()), store, display.clone());

    let mut app = App::new(display);

    // Restore the saved key into the input field, as the original page
    // did on load.
    match session.saved_key().await {
        Ok(Some(key)) => app.set_key_input(key),
        Ok(None) => {}
        Err(e) => app.set_status(format!("读取API Key失败: {e}")),
    }

    // One user action at a time: these are picked up by the loop after
    // the next draw so the user sees their input acknowledged first.
    let mut pending_generate = false;
    let mut pending_save = false;

    loop {
        terminal.draw(|f| render(f, &app))?;

        if pending_save {
            pending_save = false;
            let key = app.key_input().trim().to_string();
            if key.is_empty() {
                app.set_status("请输入有效的API Key");
            } else {
                match session.save_key(&key).await {
                    Ok(()) => app.mark_key_saved(),
                    Err(e) => app.set_status(format!("保存失败: {e}")),
                }
            }
        }

        if pending_generate {
            pending_generate = false;
            app.generating = true;
            app.reset_scroll();
            terminal.draw(|f| render(f, &app))?;

            let result = session
                .generate(
                    app.selected_category(),
                    app.selected_era(),
                    app.selected_difficulty(),
                )
                .await;
            app.generating = false;

            if let Err(e) = result {
                app.set_status(format!("错误: {e}"));
            }
        }

        // Poll for events; on timeout, tick transient feedback.
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => break,
                EventResult::Generate => pending_generate = true,
                EventResult::SaveKey => pending_save = true,
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        // Notices from the session surface on the status line.
        app.drain_notice();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn print_help() {
    println!("soup - turtle soup riddle generator");
    println!();
    println!("USAGE:");
    println!("  soup [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       One-shot generation (text-only, no TUI)");
    println!();
    println!("HEADLESS OPTIONS (only with --headless):");
    println!("  --category <CATEGORY>    Riddle category (default: death)");
    println!("  --era <ERA>              Setting era (default: ancient)");
    println!("  --difficulty <TIER>      Difficulty tier (default: easy)");
    println!("  --offline                Skip the remote call, generate locally");
    println!();
    println!("CATEGORIES:");
    println!("  death, identity, behavior, mystery, logic");
    println!();
    println!("ERAS:");
    println!("  ancient, modern");
    println!();
    println!("DIFFICULTIES:");
    println!("  easy, medium, hard");
    println!();
    println!("EXAMPLES:");
    println!("  soup                                   # Interactive TUI mode");
    println!("  soup --headless                        # Headless with defaults");
    println!("  soup --headless --category logic --era modern --difficulty hard --offline");
}
