//! CLI - Command Line Interface for Playmood
//!
//! Every catalog read and user action the TV client performs is scriptable.
//! Output is human-readable on a terminal and JSON when piped or with
//! `--json`.
//!
//! # Examples
//!
//! ```bash
//! # Browse
//! playmood home --json
//! playmood channel 64f0c2 --json
//!
//! # Sign in once, then act as that user
//! playmood login --email ana@example.com --password secret
//! playmood like c1
//! playmood watchlist list
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Content or creator not found
    NotFound = 4,
    /// Command needs a saved session
    NotSignedIn = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Playmood - TV client for the Playmood video platform
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scripting.
#[derive(Parser, Debug)]
#[command(
    name = "playmood",
    version,
    about = "TV client for the Playmood video platform",
    long_about = "Browse Playmood channels and content from the terminal with a \
                  remote-style, focus-driven interface.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  playmood                               Launch interactive TUI\n\
                  playmood home --json                   Bucketed home catalog\n\
                  playmood channel <id>                  Creator and sections\n\
                  playmood watchlist add <content-id>    Save for later"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and PLAYMOOD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Home catalog: featured, top 10, new and the category shelves
    Home,

    /// List creator channels
    #[command(visible_alias = "ch")]
    Channels,

    /// Show a creator channel with each section's load state
    Channel(IdArg),

    /// Show one piece of content
    #[command(visible_alias = "c")]
    Content(IdArg),

    /// Sign in and save the session
    Login(LoginCmd),

    /// Forget the saved session
    Logout,

    /// Like content
    Like(IdArg),

    /// Remove a like
    Unlike(IdArg),

    /// Show liked content
    Likes,

    /// Manage the watchlist
    #[command(visible_alias = "wl", subcommand)]
    Watchlist(WatchlistCmd),
}

impl Command {
    /// Whether the command acts as the signed-in user
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Command::Like(_) | Command::Unlike(_) | Command::Likes | Command::Watchlist(_)
        )
    }
}

/// Single content or creator id
#[derive(Args, Debug, PartialEq, Eq)]
pub struct IdArg {
    #[arg(required = true)]
    pub id: String,
}

// =============================================================================
// Login Command
// =============================================================================

/// Sign in with email and password
#[derive(Args, Debug, PartialEq, Eq)]
pub struct LoginCmd {
    #[arg(long, short = 'e')]
    pub email: String,

    #[arg(long, short = 'p')]
    pub password: String,
}

// =============================================================================
// Watchlist Command
// =============================================================================

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum WatchlistCmd {
    /// Show the watchlist
    #[command(visible_alias = "ls")]
    List,

    /// Add content to the watchlist
    Add(IdArg),

    /// Remove content from the watchlist
    #[command(visible_alias = "rm")]
    Remove(IdArg),
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Status OK response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOk {
    pub status: String,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data; `human` renders it for a terminal
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if !self.quiet {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

/// Reject ids that cannot be a backend document id
pub fn validate_id(id: &str) -> Result<&str, &'static str> {
    let id = id.trim();
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Ok(id)
    } else {
        Err("Invalid id (expected letters, digits, '-' or '_')")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["playmood"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "playmood",
            "--json",
            "--quiet",
            "--api-url",
            "http://tv.local:5000",
            "home",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.api_url.as_deref(), Some("http://tv.local:5000"));
        assert_eq!(cli.command, Some(Command::Home));
    }

    #[test]
    fn test_watchlist_subcommands() {
        let cli = Cli::parse_from(["playmood", "watchlist", "remove", "c1"]);
        assert_eq!(
            cli.command,
            Some(Command::Watchlist(WatchlistCmd::Remove(IdArg { id: "c1".into() })))
        );
        assert!(cli.command.is_some_and(|c| c.needs_session()));
    }

    #[test]
    fn test_login_requires_both_flags() {
        assert!(Cli::try_parse_from(["playmood", "login", "--email", "a@b.c"]).is_err());
        let cli = Cli::parse_from(["playmood", "login", "-e", "a@b.c", "-p", "pw"]);
        assert_eq!(
            cli.command,
            Some(Command::Login(LoginCmd {
                email: "a@b.c".into(),
                password: "pw".into(),
            }))
        );
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("64f0c2ab"), Ok("64f0c2ab"));
        assert_eq!(validate_id(" c1 "), Ok("c1"));
        assert!(validate_id("").is_err());
        assert!(validate_id("../etc").is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
        assert_eq!(i32::from(ExitCode::NotSignedIn), 5);
    }
}
