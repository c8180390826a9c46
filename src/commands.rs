//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the same client, catalog and screen
//! state the TUI uses. Each handler takes its args, the client and Output,
//! and returns an ExitCode.

use serde::Serialize;

use crate::api::{ApiError, ApiResultExt, PlaymoodClient};
use crate::app::{AppEvent, ChannelScreen, ChannelTab};
use crate::catalog::HomeCatalog;
use crate::cli::{ExitCode, IdArg, LoginCmd, Output, StatusOk, WatchlistCmd};
use crate::config::Config;
use crate::effects;
use crate::focus::{Phase, RecordPhase};
use crate::models::{Content, Creator, CreatorSummary};

/// Exit code for a failed API call
pub fn exit_code_for(error: &ApiError) -> ExitCode {
    match error {
        ApiError::NotFound => ExitCode::NotFound,
        ApiError::Unauthorized => ExitCode::NotSignedIn,
        ApiError::RequestFailed(_) | ApiError::RateLimited => ExitCode::NetworkError,
        ApiError::ServerError(_) | ApiError::InvalidResponse(_) => ExitCode::Error,
    }
}

fn api_error(output: &Output, context: &str, error: ApiError) -> ExitCode {
    tracing::debug!(context, error = %error, "command failed");
    output.error(format!("{}: {}", context, error), exit_code_for(&error))
}

fn print_or_fail<T: Serialize>(output: &Output, data: T, human: impl FnOnce(&T) -> String) -> ExitCode {
    match output.print(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn content_lines(items: &[Content]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|c| format!("{:<26} {}", c.id, c))
        .collect::<Vec<_>>()
        .join("\n")
}

fn id_lines(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join("\n")
    }
}

fn require_session(config: &Config, output: &Output) -> Result<(), ExitCode> {
    if config.session.is_some() {
        Ok(())
    } else {
        Err(output.error(
            "Not signed in. Run `playmood login --email <email> --password <password>` first.",
            ExitCode::NotSignedIn,
        ))
    }
}

// =============================================================================
// Home Command
// =============================================================================

pub async fn home_cmd(client: &PlaymoodClient, output: &Output) -> ExitCode {
    output.info("Fetching catalog...");
    match effects::load_catalog(client).await {
        Ok(catalog) => print_or_fail(output, catalog, home_text),
        Err(e) => api_error(output, "Catalog fetch failed", e),
    }
}

fn home_text(catalog: &HomeCatalog) -> String {
    let mut out = Vec::new();
    for (title, items) in [
        ("Featured", &catalog.featured),
        ("Top 10", &catalog.top_ten),
        ("New on Playmood", &catalog.new),
    ] {
        out.push(format!("== {} ==\n{}", title, content_lines(items)));
    }
    for shelf in &catalog.shelves {
        out.push(format!("== {} ==\n{}", shelf.title, content_lines(&shelf.items)));
    }
    out.join("\n\n")
}

// =============================================================================
// Channels / Channel Commands
// =============================================================================

pub async fn channels_cmd(client: &PlaymoodClient, output: &Output) -> ExitCode {
    match client.creators().await {
        Ok(creators) => print_or_fail(output, creators, |creators: &Vec<CreatorSummary>| {
            creators
                .iter()
                .map(|c| format!("{:<26} {}", c.id, c.name))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Err(e) => api_error(output, "Channel list failed", e),
    }
}

/// One channel section as loaded
#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub section: &'static str,
    pub state: &'static str,
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SectionReport {
    fn new(section: &'static str, phase: &Phase, items: usize) -> Self {
        Self {
            section,
            state: phase_name(phase),
            items,
            error: phase.error_message().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChannelReport {
    pub creator: Creator,
    pub sections: Vec<SectionReport>,
}

pub fn phase_name(phase: &Phase) -> &'static str {
    match phase {
        Phase::Init => "init",
        Phase::Loading => "loading",
        Phase::Empty => "empty",
        Phase::Ready => "ready",
        Phase::Error(_) => "error",
    }
}

/// Load every section of a channel the way the Channel screen does
pub async fn load_channel(client: &PlaymoodClient, creator_id: &str) -> ChannelScreen {
    let mut screen = ChannelScreen::new();
    let mut commands = Vec::new();
    screen.start(creator_id.to_string(), &mut commands);
    for tab in [ChannelTab::Feeds, ChannelTab::Playlists, ChannelTab::Community] {
        screen.activate_tab(tab, &mut commands);
    }
    for command in commands {
        if let Some(event) = effects::execute(client, command).await {
            apply(&mut screen, event);
        }
    }
    screen
}

fn apply(screen: &mut ChannelScreen, event: AppEvent) {
    if screen.accepts(&event) {
        screen.apply(event);
    }
}

pub async fn channel_cmd(cmd: IdArg, client: &PlaymoodClient, output: &Output) -> ExitCode {
    output.info(format!("Loading channel {}...", cmd.id));
    let screen = load_channel(client, &cmd.id).await;

    let creator = match screen.header() {
        RecordPhase::Ready(creator) => creator.clone(),
        RecordPhase::Missing => {
            return output.error(format!("Creator not found: {}", cmd.id), ExitCode::NotFound)
        }
        RecordPhase::Error(msg) => return output.error(msg.clone(), ExitCode::NetworkError),
        RecordPhase::Init | RecordPhase::Loading => {
            return output.error("Creator did not load", ExitCode::Error)
        }
    };

    let sections = vec![
        SectionReport::new("videos", &screen.videos_phase(), screen.videos.len()),
        SectionReport::new(
            "highlights",
            screen.highlights.phase(),
            screen.highlights.list().len(),
        ),
        SectionReport::new("feeds", screen.feed.phase(), screen.feed.list().len()),
        SectionReport::new(
            "playlists",
            screen.playlists.phase(),
            screen.playlists.list().len(),
        ),
        SectionReport::new(
            "community",
            screen.community.phase(),
            screen.community.list().len(),
        ),
    ];

    print_or_fail(output, ChannelReport { creator, sections }, |report: &ChannelReport| {
        let mut out = vec![
            report.creator.name.clone(),
            report.creator.subscribers_label(),
            String::new(),
        ];
        for s in &report.sections {
            let detail = s.error.clone().unwrap_or_else(|| format!("{} items", s.items));
            out.push(format!("{:<11} {:<6} {}", s.section, s.state, detail));
        }
        out.join("\n")
    })
}

// =============================================================================
// Content Command
// =============================================================================

pub async fn content_cmd(cmd: IdArg, client: &PlaymoodClient, output: &Output) -> ExitCode {
    match client.content(&cmd.id).await.found() {
        Ok(Some(content)) => print_or_fail(output, content, |c: &Content| {
            format!("{}\n{}\n\n{}\n\n{}", c.title, c.category, c.description, c.video)
        }),
        Ok(None) => output.error(format!("Content not found: {}", cmd.id), ExitCode::NotFound),
        Err(e) => api_error(output, "Content fetch failed", e),
    }
}

// =============================================================================
// Session Commands
// =============================================================================

pub async fn login_cmd(
    cmd: LoginCmd,
    client: &PlaymoodClient,
    config: &mut Config,
    output: &Output,
) -> ExitCode {
    if cmd.email.trim().is_empty() || cmd.password.is_empty() {
        return output.error("Email and password are required", ExitCode::InvalidArgs);
    }
    let user = match client.login(cmd.email.trim(), &cmd.password).await {
        Ok(user) => user,
        Err(e) => {
            let code = exit_code_for(&e);
            return output.error(effects::login_message(&e), code);
        }
    };
    tracing::info!(user_id = %user.id, "signed in");
    config.remember(&user);
    if let Err(e) = config.save() {
        return output.error(format!("Signed in but could not save session: {}", e), ExitCode::Error);
    }
    let name = user.name.clone();
    print_or_fail(output, user.to_string(), move |_| format!("Signed in as {}", name))
}

pub fn logout_cmd(config: &mut Config, output: &Output) -> ExitCode {
    if config.session.is_none() {
        output.info("Not signed in");
        return ExitCode::Success;
    }
    config.forget_session();
    if let Err(e) = config.save() {
        return output.error(format!("Could not save config: {}", e), ExitCode::Error);
    }
    print_or_fail(output, StatusOk::default(), |_| "Signed out".to_string())
}

// =============================================================================
// User Action Commands
// =============================================================================

/// Like or unlike content; prints the updated liked ids
pub async fn like_cmd(
    cmd: IdArg,
    like: bool,
    client: &PlaymoodClient,
    config: &Config,
    output: &Output,
) -> ExitCode {
    if let Err(code) = require_session(config, output) {
        return code;
    }
    let result = if like {
        client.like(&cmd.id, None).await
    } else {
        client.unlike(&cmd.id, None).await
    };
    match result {
        Ok(ids) => print_or_fail(output, ids, |ids: &Vec<String>| id_lines(ids)),
        Err(e) => api_error(output, "Failed to update likes", e),
    }
}

pub async fn likes_cmd(client: &PlaymoodClient, config: &Config, output: &Output) -> ExitCode {
    if let Err(code) = require_session(config, output) {
        return code;
    }
    match client.liked_content(None).await {
        Ok(items) => print_or_fail(output, items, |items: &Vec<Content>| content_lines(items)),
        Err(e) => api_error(output, "Liked content fetch failed", e),
    }
}

pub async fn watchlist_cmd(
    cmd: WatchlistCmd,
    client: &PlaymoodClient,
    config: &Config,
    output: &Output,
) -> ExitCode {
    if let Err(code) = require_session(config, output) {
        return code;
    }
    let result = match cmd {
        WatchlistCmd::List => {
            return match client.watchlist(None).await {
                Ok(items) => print_or_fail(output, items, |items: &Vec<Content>| content_lines(items)),
                Err(e) => api_error(output, "Watchlist fetch failed", e),
            };
        }
        WatchlistCmd::Add(arg) => client.add_to_watchlist(&arg.id, None).await,
        WatchlistCmd::Remove(arg) => client.remove_from_watchlist(&arg.id, None).await,
    };
    match result {
        Ok(ids) => print_or_fail(output, ids, |ids: &Vec<String>| id_lines(ids)),
        Err(e) => api_error(output, "Failed to update watchlist", e),
    }
}
