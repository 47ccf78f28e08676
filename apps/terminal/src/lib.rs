//! # barista-terminal: Operator Terminal
//!
//! Wires configuration, storage and the back-office core together and runs
//! the operator console.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Terminal Startup                                  │
//! │                                                                         │
//! │  1. Initialize Logging ──────────── RUST_LOG or info,barista=debug      │
//! │  2. Load Config ─────────────────── terminal.toml + BARISTA_* env       │
//! │  3. Open Store ──────────────────── data_dir, created if missing        │
//! │  4. Load or Seed Documents ──────── defaults on first run               │
//! │  5. Restore State ───────────────── open shift resumes with its         │
//! │                                     baseline and receipts              │
//! │  6. Run Console ─────────────────── until EOF or 'quit'                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod state;

use std::io;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::TerminalConfig;
use console::Console;
use error::StartupError;

/// Runs the terminal on stdin/stdout.
///
/// `config_path` overrides the platform config location.
pub fn run(config_path: Option<PathBuf>) -> Result<(), StartupError> {
    init_tracing();

    let config = TerminalConfig::load(config_path)?;
    info!(
        terminal = %config.terminal.name,
        data_dir = %config.storage.data_dir.display(),
        report_dir = %config.storage.report_dir.display(),
        utc_offset_minutes = config.report.utc_offset_minutes,
        "Starting Barista terminal"
    );

    let console = Console::open(&config)?;
    info!(terminal = console.name(), "Terminal ready");

    let stdin = io::stdin();
    console.run(stdin.lock(), io::stdout())?;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they do not interleave with console output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,barista=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
