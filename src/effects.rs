//! Command execution
//!
//! Runs the [`Command`]s the app queues: network calls on spawned tasks whose
//! results go back to the UI loop over an unbounded channel, and session
//! persistence inline. Nothing here touches app state directly.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiError, ApiResult, ApiResultExt, PlaymoodClient};
use crate::app::{AppEvent, Command};
use crate::catalog::HomeCatalog;
use crate::config::{Config, Session};
use crate::store::{UserAction, UserEvent};

/// Executes commands against the backend
pub struct Effects {
    client: Arc<PlaymoodClient>,
    events: UnboundedSender<AppEvent>,
    config: Config,
}

impl Effects {
    pub fn new(client: PlaymoodClient, events: UnboundedSender<AppEvent>, config: Config) -> Self {
        Self {
            client: Arc::new(client),
            events,
            config,
        }
    }

    /// Run `command`. Network work is spawned; the result arrives as an event.
    pub fn run(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "running command");
        match command {
            Command::SaveSession(session) => self.save_session(session),
            command => {
                let client = Arc::clone(&self.client);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let name = command.name();
                    if let Some(event) = execute(&client, command).await {
                        if events.send(event).is_err() {
                            tracing::debug!(command = name, "ui gone, dropping result");
                        }
                    }
                });
            }
        }
    }

    fn save_session(&mut self, session: Option<Session>) {
        self.config.session = session;
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "could not persist session");
        }
    }
}

/// Perform one network command and turn its outcome into an event
pub async fn execute(client: &PlaymoodClient, command: Command) -> Option<AppEvent> {
    let event = match command {
        Command::LoadCatalog(ticket) => AppEvent::Catalog(ticket, load_catalog(client).await),
        Command::LoadCreators(ticket) => AppEvent::Creators(ticket, client.creators().await),
        Command::LoadLikedContent { ticket, token } => {
            let result = client.liked_content(Some(&token)).await;
            AppEvent::LikedContent(ticket, result)
        }
        Command::LoadWatchlist { ticket, token } => {
            let result = client.watchlist(Some(&token)).await;
            AppEvent::Watchlist(ticket, result)
        }
        Command::LoadChannel(ticket) => {
            let result = client.channel(&ticket.context).await.found();
            AppEvent::Channel(ticket, result)
        }
        Command::LoadHighlights(ticket) => {
            let result = client.highlights(&ticket.context).await;
            AppEvent::Highlights(ticket, result)
        }
        Command::LoadFeed(ticket) => {
            let result = client.feed(&ticket.context).await;
            AppEvent::Feed(ticket, result)
        }
        Command::LoadPlaylists(ticket) => {
            let result = client.public_playlists(&ticket.context).await;
            AppEvent::Playlists(ticket, result)
        }
        Command::LoadCommunity(ticket) => {
            let result = client.community(&ticket.context).await;
            AppEvent::Community(ticket, result)
        }
        Command::LoadContent(ticket) => {
            let result = client.content(&ticket.context).await.found();
            AppEvent::Content(ticket, result)
        }
        Command::Login { email, password } => AppEvent::User(login(client, &email, &password).await),
        Command::User { action, token } => AppEvent::User(user_action(client, action, &token).await),
        Command::SaveSession(_) => return None,
    };
    Some(event)
}

/// Full catalog and top ten, fetched together and bucketed
pub async fn load_catalog(client: &PlaymoodClient) -> ApiResult<HomeCatalog> {
    let (all, top_ten) = tokio::join!(client.all_content(), client.top_ten());
    let all = all?;
    let top_ten = top_ten?;
    tracing::info!(items = all.len(), top_ten = top_ten.len(), "catalog loaded");
    Ok(HomeCatalog::build(&all, top_ten))
}

async fn login(client: &PlaymoodClient, email: &str, password: &str) -> UserEvent {
    match client.login(email, password).await {
        Ok(user) => UserEvent::LoggedIn(user),
        Err(e) => {
            tracing::warn!(error = %e, "login failed");
            UserEvent::LoginFailed(login_message(&e).to_string())
        }
    }
}

/// Message shown on the Login screen
pub fn login_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Unauthorized | ApiError::NotFound => "Invalid email or password.",
        ApiError::RequestFailed(_) => "Could not reach Playmood. Check your connection.",
        _ => "Login failed. Please try again later.",
    }
}

async fn user_action(client: &PlaymoodClient, action: UserAction, token: &str) -> UserEvent {
    let token = Some(token);
    let result = match &action {
        UserAction::LikeContent { content_id } => client.like(content_id, token).await.map(UserEvent::LikesUpdated),
        UserAction::UnlikeContent { content_id } => {
            client.unlike(content_id, token).await.map(UserEvent::LikesUpdated)
        }
        UserAction::AddToWatchlist { content_id } => client
            .add_to_watchlist(content_id, token)
            .await
            .map(UserEvent::WatchlistUpdated),
        UserAction::RemoveFromWatchlist { content_id } => client
            .remove_from_watchlist(content_id, token)
            .await
            .map(UserEvent::WatchlistUpdated),
    };
    result.unwrap_or_else(|e| {
        tracing::warn!(action = action.name(), content_id = action.content_id(), error = %e, "user action failed");
        UserEvent::ActionFailed(action_failure_message(&action).to_string())
    })
}

fn action_failure_message(action: &UserAction) -> &'static str {
    match action {
        UserAction::LikeContent { .. } | UserAction::UnlikeContent { .. } => "Failed to update likes.",
        UserAction::AddToWatchlist { .. } | UserAction::RemoveFromWatchlist { .. } => {
            "Failed to update watchlist."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_messages() {
        assert_eq!(login_message(&ApiError::Unauthorized), "Invalid email or password.");
        assert_eq!(
            login_message(&ApiError::ServerError(500)),
            "Login failed. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_save_session_is_not_a_network_command() {
        let client = PlaymoodClient::new("http://127.0.0.1:9");
        assert!(execute(&client, Command::SaveSession(None)).await.is_none());
    }
}
