//! # Barista Terminal Entry Point
//!
//! ```text
//! barista-terminal [--config <PATH>]
//! ```
//!
//! Without `--config` the config is read from the platform config
//! directory (`terminal.toml`) when present. Environment variables override
//! it: `BARISTA_DATA_DIR`, `BARISTA_REPORT_DIR`,
//! `BARISTA_UTC_OFFSET_MINUTES`, `BARISTA_TERMINAL_NAME`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "barista-terminal")]
#[command(version)]
#[command(about = "Café back-office terminal: stock, sales and shift reports", long_about = None)]
struct Cli {
    /// Path to config file (must exist when given)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The actual setup is in lib.rs for better testability
    match barista_terminal::run(cli.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("barista-terminal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["barista-terminal", "--config", "/etc/barista.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/barista.toml")));

        let cli = Cli::try_parse_from(["barista-terminal"]).unwrap();
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_help_is_not_a_config_path() {
        let err = Cli::try_parse_from(["barista-terminal", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["barista-terminal", "terminal.toml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
