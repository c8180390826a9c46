//! User store
//!
//! Holds the signed-in user and the ids they liked or saved. Screens read it
//! at render time and request changes by dispatching a [`UserAction`]; the
//! store itself only changes by applying a [`UserEvent`] that came back from
//! the backend.

use serde::Serialize;

use crate::models::User;

/// Change the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    LikeContent { content_id: String },
    UnlikeContent { content_id: String },
    AddToWatchlist { content_id: String },
    RemoveFromWatchlist { content_id: String },
}

impl UserAction {
    pub fn content_id(&self) -> &str {
        match self {
            UserAction::LikeContent { content_id }
            | UserAction::UnlikeContent { content_id }
            | UserAction::AddToWatchlist { content_id }
            | UserAction::RemoveFromWatchlist { content_id } => content_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UserAction::LikeContent { .. } => "likeContent",
            UserAction::UnlikeContent { .. } => "unlikeContent",
            UserAction::AddToWatchlist { .. } => "addToWatchlist",
            UserAction::RemoveFromWatchlist { .. } => "removeFromWatchlist",
        }
    }
}

/// Sink for user actions
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: UserAction);
}

impl ActionDispatcher for Vec<UserAction> {
    fn dispatch(&mut self, action: UserAction) {
        self.push(action);
    }
}

/// Outcome reported back to the store
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    SigningIn,
    LoggedIn(User),
    LoginFailed(String),
    LoggedOut,
    /// Authoritative liked ids after a like/unlike
    LikesUpdated(Vec<String>),
    /// Authoritative watchlist ids after an add/remove
    WatchlistUpdated(Vec<String>),
    ActionFailed(String),
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    SignedOut,
    SigningIn,
    SignedIn,
}

/// Signed-in user state
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    user: Option<User>,
    status: SessionStatus,
    /// Last login or action failure, shown until the next event
    error: Option<String>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store restored from a saved session
    pub fn signed_in(user: User) -> Self {
        let mut store = Self::new();
        store.apply(UserEvent::LoggedIn(user));
        store
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_liked(&self, content_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.likes.iter().any(|id| id == content_id))
    }

    pub fn in_watchlist(&self, content_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.watchlist.iter().any(|id| id == content_id))
    }

    /// Action the like button dispatches for `content_id`
    pub fn like_toggle(&self, content_id: &str) -> UserAction {
        let content_id = content_id.to_string();
        if self.is_liked(&content_id) {
            UserAction::UnlikeContent { content_id }
        } else {
            UserAction::LikeContent { content_id }
        }
    }

    /// Action the watchlist button dispatches for `content_id`
    pub fn watchlist_toggle(&self, content_id: &str) -> UserAction {
        let content_id = content_id.to_string();
        if self.in_watchlist(&content_id) {
            UserAction::RemoveFromWatchlist { content_id }
        } else {
            UserAction::AddToWatchlist { content_id }
        }
    }

    pub fn like_label(&self, content_id: &str) -> &'static str {
        if self.is_liked(content_id) {
            "UNLIKE"
        } else {
            "LIKE"
        }
    }

    pub fn watchlist_label(&self, content_id: &str) -> &'static str {
        if self.in_watchlist(content_id) {
            "REMOVE FROM WATCHLIST"
        } else {
            "ADD TO WATCHLIST"
        }
    }

    /// The only way the store changes
    pub fn apply(&mut self, event: UserEvent) {
        match event {
            UserEvent::SigningIn => {
                self.status = SessionStatus::SigningIn;
                self.error = None;
            }
            UserEvent::LoggedIn(user) => {
                tracing::info!(user = %user, "signed in");
                self.user = Some(user);
                self.status = SessionStatus::SignedIn;
                self.error = None;
            }
            UserEvent::LoginFailed(message) => {
                self.status = if self.user.is_some() {
                    SessionStatus::SignedIn
                } else {
                    SessionStatus::SignedOut
                };
                self.error = Some(message);
            }
            UserEvent::LoggedOut => {
                self.user = None;
                self.status = SessionStatus::SignedOut;
                self.error = None;
            }
            UserEvent::LikesUpdated(ids) => {
                if let Some(user) = self.user.as_mut() {
                    user.likes = ids;
                    self.error = None;
                }
            }
            UserEvent::WatchlistUpdated(ids) => {
                if let Some(user) = self.user.as_mut() {
                    user.watchlist = ids;
                    self.error = None;
                }
            }
            UserEvent::ActionFailed(message) => {
                self.error = Some(message);
            }
        }
    }
}
