//! Terminal UI
//!
//! Built with ratatui. Every screen is a pure function of the app state:
//! header, the foreground screen, a status bar, and an optional overlay.

pub mod channel;
pub mod home;
pub mod login;
pub mod movie;
pub mod overlay;
pub mod slider;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Route, Screen};

/// Draw the whole app
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match &app.screen {
        Screen::Login(login) => login::render(frame, chunks[1], login, &app.user),
        Screen::Home(home) => home::render(frame, chunks[1], app, home),
        Screen::Channel(channel) => channel::render(frame, chunks[1], channel),
        Screen::Movie(movie) => movie::render(frame, chunks[1], movie, &app.user),
    }
    render_status_bar(frame, chunks[2], app);

    if let Some(overlay) = &app.overlay {
        overlay::render(frame, chunks[1], overlay);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let account = match app.user.user() {
        Some(user) => Span::styled(format!("● {} ", user.name), Theme::success()),
        None => Span::styled("guest ", Theme::dimmed()),
    };
    let logo = Line::from(vec![
        Span::styled(" PLAY", Theme::title()),
        Span::styled("MOOD", Theme::title_active()),
    ]);
    let header = Paragraph::new(logo).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Plain)
            .border_style(Theme::border())
            .title_top(Line::from(account).right_aligned()),
    );
    frame.render_widget(header, area);
}

fn route_label(route: &Route) -> &'static str {
    match route {
        Route::Login => "LOGIN",
        Route::Home => "HOME",
        Route::Channel { .. } => "CHANNEL",
        Route::Movie { .. } => "MOVIE",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let route = Span::styled(
        format!(" {} ", route_label(&app.route())),
        Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
    );
    let message = match &app.status {
        Some(status) => Span::styled(format!(" {} ", status), Theme::warning()),
        None => Span::raw(""),
    };
    let help = if app.is_editing() {
        " type · ↑↓ move · Enter next · Ctrl+C quit "
    } else {
        " ←↑↓→ move · Enter select · Esc back · L sign out · q quit "
    };

    let line = Line::from(vec![route, message, Span::styled(help, Theme::keybind())]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
