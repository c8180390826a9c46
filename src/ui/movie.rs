//! Movie (content detail) rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{MovieButton, MovieScreen};
use crate::focus::RecordPhase;
use crate::store::UserStore;
use crate::ui::Theme;

/// Shown when the content id does not exist
pub const CONTENT_NOT_FOUND: &str = "Content not found.";

pub fn render(frame: &mut Frame, area: Rect, movie: &MovieScreen, user: &UserStore) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = match movie.content.phase() {
        RecordPhase::Ready(content) => content,
        RecordPhase::Init => return,
        RecordPhase::Loading => {
            frame.render_widget(Paragraph::new(Span::styled("Loading...", Theme::loading())), inner);
            return;
        }
        RecordPhase::Missing => {
            frame.render_widget(
                Paragraph::new(Span::styled(CONTENT_NOT_FOUND, Theme::dimmed())),
                inner,
            );
            return;
        }
        RecordPhase::Error(msg) => {
            frame.render_widget(Paragraph::new(Span::styled(msg.clone(), Theme::error())), inner);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Category
            Constraint::Length(2), // Media
            Constraint::Min(1),    // Description
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(content.title.clone(), Theme::title_active())),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(content.category.clone(), Theme::secondary())),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("▶ ", Theme::title_active()),
            Span::styled(content.video.clone(), Theme::dimmed()),
        ])),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(content.description.clone())
            .style(Theme::text())
            .wrap(Wrap { trim: true }),
        chunks[3],
    );

    let mut buttons = Vec::new();
    for button in movie.buttons.rendered() {
        let label = match button.item {
            MovieButton::Like => user.like_label(&content.id),
            MovieButton::Watchlist => user.watchlist_label(&content.id),
        };
        let style = if button.focused {
            Theme::card_focused()
        } else {
            Theme::card()
        };
        buttons.push(Span::styled(format!(" {} ", label), style));
        buttons.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(buttons)), chunks[4]);
}
