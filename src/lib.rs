//! Playmood - TV client for the Playmood video platform
//!
//! Screens are stacks of focusable lists navigated with a remote (arrow keys
//! and Enter). Each list owns its items and focus; network-fed lists track
//! their own load state and ignore responses that arrive for a context the
//! user already left.
//!
//! # Modules
//!
//! - `focus` - Focus state, selection dispatch and load-state sections
//! - `models` - Wire types returned by the Playmood API
//! - `api` - Playmood HTTP client and error type
//! - `catalog` - Home catalog bucketing
//! - `store` - Signed-in user, likes and watchlist
//! - `app` - Screens, navigation and key handling
//! - `effects` - Executes the commands the app queues
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod banner;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod effects;
pub mod focus;
pub mod models;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiError, ApiResult, PlaymoodClient};
pub use app::{App, AppEvent, Command, Intent, Route};
pub use focus::{Direction, FocusPolicy, FocusState, FocusableList, Navigable, Section};
pub use models::{Content, Creator, CreatorSummary, User};
