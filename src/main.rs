//! Playmood - TV client for the Playmood video platform
//!
//! A remote-style terminal interface: every screen is a stack of focusable
//! lists driven by arrow keys and Enter.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! playmood
//!
//! # CLI mode (for automation)
//! playmood home --json
//! playmood channel 64f0c2
//! playmood watchlist add c1
//! ```

use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use playmood::api::PlaymoodClient;
use playmood::app::{App, AppEvent};
use playmood::cli::{self, Cli, Command, ExitCode, Output};
use playmood::commands;
use playmood::config::Config;
use playmood::effects::Effects;
use playmood::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    // The flag beats PLAYMOOD_API_URL, which beats the config file
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        init_cli_logging();
        let exit_code = run_cli(cli, config, api_url).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        let _guard = init_tui_logging();
        run_tui(config, api_url).await
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Directory for TUI log files
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("playmood")
        .join("logs")
}

/// The terminal belongs to the UI, so TUI logs go to a daily file
fn init_tui_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok()?;
    let file_appender = tracing_appender::rolling::daily(&dir, "playmood");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Some(guard)
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, mut config: Config, api_url: String) -> ExitCode {
    let output = Output::new(&cli);
    let Some(command) = cli.command else {
        return ExitCode::Success;
    };

    let mut client = PlaymoodClient::new(api_url);
    if let Some(session) = &config.session {
        client = client.with_token(session.token.clone());
    }
    tracing::debug!(api_url = client.base_url(), ?command, "running cli command");

    // Reject malformed ids before touching the network
    let id = match &command {
        Command::Channel(arg)
        | Command::Content(arg)
        | Command::Like(arg)
        | Command::Unlike(arg) => Some(&arg.id),
        Command::Watchlist(cli::WatchlistCmd::Add(arg) | cli::WatchlistCmd::Remove(arg)) => Some(&arg.id),
        _ => None,
    };
    if let Some(id) = id {
        if let Err(e) = cli::validate_id(id) {
            return output.error(e, ExitCode::InvalidArgs);
        }
    }

    match command {
        Command::Home => commands::home_cmd(&client, &output).await,
        Command::Channels => commands::channels_cmd(&client, &output).await,
        Command::Channel(arg) => commands::channel_cmd(arg, &client, &output).await,
        Command::Content(arg) => commands::content_cmd(arg, &client, &output).await,
        Command::Login(cmd) => commands::login_cmd(cmd, &client, &mut config, &output).await,
        Command::Logout => commands::logout_cmd(&mut config, &output),
        Command::Like(arg) => commands::like_cmd(arg, true, &client, &config, &output).await,
        Command::Unlike(arg) => commands::like_cmd(arg, false, &client, &config, &output).await,
        Command::Likes => commands::likes_cmd(&client, &config, &output).await,
        Command::Watchlist(cmd) => commands::watchlist_cmd(cmd, &client, &config, &output).await,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config, api_url: String) -> Result<()> {
    tracing::info!(%api_url, "Playmood starting up");

    let session = config.session.as_ref().map(|s| s.to_user());
    let mut app = App::new(session, config.banner_interval());

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut effects = Effects::new(PlaymoodClient::new(api_url), events_tx, config);

    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut effects, events_rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    tracing::info!("Playmood shutting down");
    result
}

/// Main event loop - handles input, applies command results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    effects: &mut Effects,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while app.running {
        for command in app.take_commands() {
            effects.run(command);
        }

        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so results and the banner keep flowing
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(event) = events.try_recv() {
            tracing::debug!(event = event.name(), "command result");
            app.apply_event(event);
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;
    }

    Ok(())
}
