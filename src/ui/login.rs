//! Login screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{LoginField, LoginScreen, TextField};
use crate::store::{SessionStatus, UserStore};
use crate::ui::Theme;

const FORM_WIDTH: u16 = 50;
const FORM_HEIGHT: u16 = 14;

/// Text with a cursor bar at the cursor position
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut out: String = text.chars().take(cursor).collect();
    out.push('│');
    out.extend(text.chars().skip(cursor));
    out
}

fn input<'a>(label: &'a str, field: &TextField, masked: bool, focused: bool) -> Paragraph<'a> {
    let shown = if masked {
        field.masked()
    } else {
        field.value.clone()
    };
    let text = if focused {
        with_cursor(&shown, field.cursor)
    } else {
        shown
    };
    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(format!(" {} ", label), Theme::dimmed())),
    )
}

pub fn render(frame: &mut Frame, area: Rect, login: &LoginScreen, user: &UserStore) {
    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    let form = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, form);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" SIGN IN ", Theme::title_active()));
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1), // Error
            Constraint::Length(1), // Login
            Constraint::Length(1), // Guest
        ])
        .split(inner);

    let focused = login.focused_field();
    frame.render_widget(
        input("Email", &login.email, false, focused == Some(LoginField::Email)),
        chunks[0],
    );
    frame.render_widget(
        input("Password", &login.password, true, focused == Some(LoginField::Password)),
        chunks[1],
    );
    if let Some(error) = user.error() {
        frame.render_widget(Paragraph::new(Span::styled(error, Theme::error())), chunks[2]);
    }

    let submit = if user.status() == SessionStatus::SigningIn {
        "Signing in..."
    } else {
        "LOGIN"
    };
    for (field, label, chunk) in [
        (LoginField::Submit, submit, chunks[3]),
        (LoginField::Guest, "BROWSE AS GUEST", chunks[4]),
    ] {
        let style = if focused == Some(field) {
            Theme::card_focused()
        } else {
            Theme::card()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", label), style)).alignment(Alignment::Center),
            chunk,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_placement() {
        assert_eq!(with_cursor("ana", 0), "│ana");
        assert_eq!(with_cursor("ana", 3), "ana│");
        assert_eq!(with_cursor("ñu", 1), "ñ│u");
    }
}
