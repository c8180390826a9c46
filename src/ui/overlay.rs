//! Feed post and highlight viewers drawn over the current screen

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{Intent, Overlay};
use crate::focus::FocusableList;
use crate::models::{FeedPost, Highlight};
use crate::ui::Theme;

/// Rect of `percent_x` by `percent_y` centered in `area`
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn viewer_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" {} ", title), Theme::title_active()))
        .title_bottom(Line::from(Span::styled(" Esc close ", Theme::dimmed())).right_aligned())
        .style(Style::default().bg(Theme::BACKGROUND))
}

pub fn render(frame: &mut Frame, area: Rect, overlay: &Overlay) {
    let popup = centered(area, 70, 70);
    frame.render_widget(Clear, popup);
    match overlay {
        Overlay::FeedPost(post) => render_post(frame, popup, post),
        Overlay::Highlights(viewer) => render_highlights(frame, popup, viewer),
    }
}

fn render_post(frame: &mut Frame, area: Rect, post: &FeedPost) {
    let author = post.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
    let mut lines = vec![
        Line::from(Span::styled(author, Theme::title())),
        Line::from(""),
    ];
    for media in &post.media {
        lines.push(Line::from(vec![
            Span::styled("▣ ", Theme::secondary()),
            Span::styled(media.url.clone(), Theme::dimmed()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(post.caption.clone(), Theme::text())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("♥ {}   ✎ {}", post.likes.len(), post.comments.len()),
        Theme::dimmed(),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(viewer_block("POST")),
        area,
    );
}

fn render_highlights(frame: &mut Frame, area: Rect, viewer: &FocusableList<Highlight, Intent>) {
    let index = viewer.focused().unwrap_or(0);
    let position = format!("HIGHLIGHT {}/{}", index + 1, viewer.len());
    let block = viewer_block(&position);

    let Some(highlight) = viewer.get(index) else {
        frame.render_widget(block, area);
        return;
    };
    let video = highlight
        .content
        .as_ref()
        .and_then(|c| c.video.clone())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(highlight.title().to_string(), Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("▶ ", Theme::title_active()),
            Span::styled(video, Theme::dimmed()),
        ]),
        Line::from(""),
        Line::from(Span::styled("↑/↓ previous / next", Theme::keybind())),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
