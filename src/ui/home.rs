//! Home screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, BannerButton, HomeRegion, HomeScreen};
use crate::catalog::ShelfKind;
use crate::focus::Phase;
use crate::models::{Content, CreatorSummary};
use crate::ui::slider::{self, Heading, SLIDER_HEIGHT};
use crate::ui::Theme;

/// Height of the hero banner
pub const BANNER_HEIGHT: u16 = 8;

fn content_label(content: &Content) -> String {
    content.title.clone()
}

fn creator_label(creator: &CreatorSummary) -> String {
    format!("◉ {}", creator.name)
}

fn region_height(region: HomeRegion) -> u16 {
    match region {
        HomeRegion::Banner => BANNER_HEIGHT,
        _ => SLIDER_HEIGHT,
    }
}

/// Rows that fit in `available`, keeping the focused one on screen
pub fn row_window(heights: &[u16], focused: usize, available: u16) -> std::ops::Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let focused = focused.min(heights.len() - 1);
    let mut start = focused;
    let mut used = heights[focused];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    let mut end = focused + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, home: &HomeScreen) {
    let regions = home.regions();
    let focused_region = home.focused_region();
    let focused = focused_region
        .and_then(|r| regions.iter().position(|x| *x == r))
        .unwrap_or(0);
    let heights: Vec<u16> = regions.iter().map(|r| region_height(*r)).collect();
    let window = row_window(&heights, focused, area.height);

    let visible = &regions[window.clone()];
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            visible
                .iter()
                .map(|r| Constraint::Length(region_height(*r)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (region, row_area) in visible.iter().zip(areas.iter()) {
        let active = focused_region == Some(*region);
        match region {
            HomeRegion::Banner => render_banner(frame, *row_area, app, home, active),
            HomeRegion::Channels => slider::render_slider(
                frame,
                *row_area,
                Heading::new("Channels", "No channels yet."),
                home.channels.list(),
                home.channels.phase(),
                active,
                creator_label,
            ),
            HomeRegion::Shelf(kind) => render_shelf(frame, *row_area, home, *kind, active),
        }
    }
}

fn render_shelf(frame: &mut Frame, area: Rect, home: &HomeScreen, kind: ShelfKind, active: bool) {
    let Some(list) = home.shelf_list(kind) else {
        return;
    };
    let phase = home.shelf_phase(kind);
    let heading = Heading::new(kind.title(), slider::EMPTY_TEXT);
    slider::render_slider(frame, area, heading, list, &phase, active, content_label);
}

fn render_banner(frame: &mut Frame, area: Rect, app: &App, home: &HomeScreen, active: bool) {
    let border = if active {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let featured = home.featured();
    let position = format!(" {}/{} ", app.banner.index() + 1, featured.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(" FEATURED ", Theme::title_active()))
        .title_bottom(Line::from(Span::styled(position, Theme::dimmed())).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(item) = app.featured_item() else {
        if let Some(line) = slider::phase_line(&Phase::Loading, slider::EMPTY_TEXT) {
            frame.render_widget(Paragraph::new(line), inner);
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Category
            Constraint::Min(1),    // Description
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(Span::styled(item.title.clone(), Theme::title())), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(item.category.clone(), Theme::secondary())),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(item.description.clone())
            .style(Theme::text())
            .wrap(Wrap { trim: true }),
        chunks[2],
    );

    let mut buttons = Vec::new();
    for button in home.banner_buttons.rendered() {
        let label = match button.item {
            BannerButton::WatchNow => "▶ WATCH NOW",
            BannerButton::Watchlist => app.user.watchlist_label(&item.id),
        };
        let style = if button.focused {
            Theme::card_focused()
        } else {
            Theme::card()
        };
        buttons.push(Span::styled(format!(" {} ", label), style));
        buttons.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(buttons)), chunks[3]);
}
