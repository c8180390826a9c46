//! Slider and grid rendering for focusable lists
//!
//! Items are drawn in list order; focus only changes emphasis. A list that is
//! not ready draws exactly one line for its phase instead of items.

use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::focus::{FocusableList, Navigable, Phase};
use crate::ui::Theme;

/// Width of one slider card, borders of the row excluded
pub const CARD_WIDTH: u16 = 24;

/// Rows needed by a slider, including its border
pub const SLIDER_HEIGHT: u16 = 4;

/// Text shown for an empty list that has nothing more specific to say
pub const EMPTY_TEXT: &str = "Nothing here yet.";

/// Row title plus the text it shows when loaded empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub title: &'a str,
    pub empty: &'a str,
}

impl<'a> Heading<'a> {
    pub fn new(title: &'a str, empty: &'a str) -> Self {
        Self { title, empty }
    }
}

/// The single line standing in for a list that has no items to draw
pub fn phase_line(phase: &Phase, empty: &str) -> Option<Line<'static>> {
    match phase {
        Phase::Init => Some(Line::from(Span::styled("·", Theme::dimmed()))),
        Phase::Loading => Some(Line::from(Span::styled("Loading...", Theme::loading()))),
        Phase::Empty => Some(Line::from(Span::styled(empty.to_string(), Theme::dimmed()))),
        Phase::Error(msg) => Some(Line::from(Span::styled(msg.clone(), Theme::error()))),
        Phase::Ready => None,
    }
}

/// Items to draw so that `focused` stays on screen
pub fn visible_window(len: usize, focused: Option<usize>, capacity: usize) -> Range<usize> {
    if capacity == 0 || len == 0 {
        return 0..0;
    }
    let focused = focused.unwrap_or(0).min(len - 1);
    let start = (focused + 1).saturating_sub(capacity);
    start..len.min(start + capacity)
}

/// Truncate `text` to `width` columns, marking the cut
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

fn row_block(title: &str, active: bool) -> Block<'static> {
    let (border, title_style) = if active {
        (Theme::border_focused(), Theme::title_active())
    } else {
        (Theme::border(), Theme::title())
    };
    Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(border)
        .title(Span::styled(format!(" {} ", title), title_style))
}

/// Horizontal slider
///
/// `active` marks the row that holds focus; an item is only highlighted when
/// its list reports it focused.
pub fn render_slider<T: Navigable, A>(
    frame: &mut Frame,
    area: Rect,
    heading: Heading<'_>,
    list: &FocusableList<T, A>,
    phase: &Phase,
    active: bool,
    label: fn(&T) -> String,
) {
    let block = row_block(heading.title, active);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(line) = phase_line(phase, heading.empty) {
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let capacity = (inner.width / (CARD_WIDTH + 1)).max(1) as usize;
    let window = visible_window(list.len(), list.focused(), capacity);
    let width = CARD_WIDTH as usize;

    let mut spans = Vec::new();
    if window.start > 0 {
        spans.push(Span::styled("‹", Theme::dimmed()));
    }
    for item in list.rendered().skip(window.start).take(window.len()) {
        let style = if item.focused {
            Theme::card_focused()
        } else {
            Theme::card()
        };
        let text = format!(" {:<w$}", clip(&label(item.item), width - 2), w = width - 2);
        spans.push(Span::styled(format!("{} ", text), style));
        spans.push(Span::raw(" "));
    }
    if window.end < list.len() {
        spans.push(Span::styled("›", Theme::dimmed()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Fixed-column grid, scrolled by whole rows
pub fn render_grid<T: Navigable, A>(
    frame: &mut Frame,
    area: Rect,
    columns: usize,
    list: &FocusableList<T, A>,
    phase: &Phase,
    empty: &str,
    label: fn(&T) -> String,
) {
    if let Some(line) = phase_line(phase, empty) {
        frame.render_widget(Paragraph::new(line), area);
        return;
    }
    let columns = columns.max(1);
    let cell_height = 3u16;
    let rows_total = list.len().div_ceil(columns);
    let capacity = (area.height / cell_height).max(1) as usize;
    let rows = visible_window(rows_total, list.focused().map(|i| i / columns), capacity);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(cell_height); rows.len()])
        .split(area);
    let col_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (slot, row) in rows.enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints.clone())
            .split(row_areas[slot]);
        for item in list.rendered().skip(row * columns).take(columns) {
            let border = if item.focused {
                Theme::border_focused()
            } else {
                Theme::border()
            };
            let style = if item.focused {
                Theme::title_active()
            } else {
                Theme::text()
            };
            let cell = cells[item.index % columns];
            let text = clip(&label(item.item), cell.width.saturating_sub(2) as usize);
            let widget = Paragraph::new(Span::styled(text, style))
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(widget, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_follows_focus() {
        assert_eq!(visible_window(10, None, 4), 0..4);
        assert_eq!(visible_window(10, Some(2), 4), 0..4);
        assert_eq!(visible_window(10, Some(5), 4), 2..6);
        assert_eq!(visible_window(10, Some(9), 4), 6..10);
        assert_eq!(visible_window(3, Some(1), 4), 0..3);
        assert_eq!(visible_window(0, None, 4), 0..0);
    }

    #[test]
    fn test_window_clamps_stale_focus() {
        assert_eq!(visible_window(3, Some(7), 2), 1..3);
    }

    #[test]
    fn test_phase_lines() {
        assert!(phase_line(&Phase::Ready, EMPTY_TEXT).is_none());
        let loading = phase_line(&Phase::Loading, EMPTY_TEXT).unwrap();
        assert_eq!(loading.spans[0].content, "Loading...");
        let empty = phase_line(&Phase::Empty, "No videos yet.").unwrap();
        assert_eq!(empty.spans[0].content, "No videos yet.");
        let error = phase_line(&Phase::Error("Failed to load feeds.".into()), EMPTY_TEXT).unwrap();
        assert_eq!(error.spans[0].style.fg, Some(Theme::ERROR));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a long title", 6), "a lon…");
    }
}
