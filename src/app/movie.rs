//! Movie (content detail) screen state

use crate::focus::{Direction, FocusPolicy, FocusableList, Navigable, Record, SelectionEvent};
use crate::models::Content;

use super::{AppEvent, Command, Intent};

/// Action buttons under the content details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieButton {
    Like,
    Watchlist,
}

impl Navigable for MovieButton {
    fn key(&self) -> &str {
        match self {
            MovieButton::Like => "like",
            MovieButton::Watchlist => "watchlist",
        }
    }
}

fn press(button: &MovieButton, _: &SelectionEvent) -> Intent {
    Intent::Movie(*button)
}

#[derive(Debug)]
pub struct MovieScreen {
    pub content: Record<String, Content>,
    pub buttons: FocusableList<MovieButton, Intent>,
}

impl Default for MovieScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieScreen {
    pub fn new() -> Self {
        Self {
            content: Record::new("Failed to load content."),
            buttons: FocusableList::new(FocusPolicy::FirstItem, press)
                .with_items(vec![MovieButton::Like, MovieButton::Watchlist]),
        }
    }

    pub fn start(&mut self, content_id: String, commands: &mut Vec<Command>) {
        if let Some(ticket) = self.content.load(content_id) {
            commands.push(Command::LoadContent(ticket));
        }
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content.context().map(String::as_str)
    }

    pub fn accepts(&self, event: &AppEvent) -> bool {
        matches!(event, AppEvent::Content(ticket, _) if self.content.accepts(ticket))
    }

    pub fn apply(&mut self, event: AppEvent) {
        if let AppEvent::Content(ticket, result) = event {
            self.content.resolve(&ticket, result);
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.buttons.navigate(direction)
    }

    /// Buttons act on the loaded content; with nothing shown, Enter is dropped
    pub fn confirm(&self) -> Option<Intent> {
        self.content.value()?;
        self.buttons.confirm_focused()
    }
}
