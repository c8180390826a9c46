//! Channel screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{ChannelRegion, ChannelScreen, ChannelTab, FEED_COLUMNS};
use crate::focus::{Phase, RecordPhase};
use crate::models::{CommunityPost, Content, FeedPost, Highlight, PlaylistVideo};
use crate::ui::slider::{self, Heading, SLIDER_HEIGHT};
use crate::ui::Theme;

/// Shown when the creator id does not exist
pub const CREATOR_NOT_FOUND: &str = "Creator not found.";

fn content_label(content: &Content) -> String {
    content.title.clone()
}

fn video_label(video: &PlaylistVideo) -> String {
    video.title.clone()
}

fn highlight_label(highlight: &Highlight) -> String {
    let title = highlight.title();
    if title.is_empty() {
        "◌ highlight".to_string()
    } else {
        format!("◌ {}", title)
    }
}

fn post_label(post: &FeedPost) -> String {
    if post.caption.is_empty() {
        post.cover_url().unwrap_or("(no media)").to_string()
    } else {
        post.caption.clone()
    }
}

pub fn render(frame: &mut Frame, area: Rect, channel: &ChannelScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),             // Header
            Constraint::Length(SLIDER_HEIGHT), // Highlights
            Constraint::Length(1),             // Tabs
            Constraint::Min(1),                // Body
        ])
        .split(area);

    render_header(frame, chunks[0], channel);
    slider::render_slider(
        frame,
        chunks[1],
        Heading::new("Highlights", "No highlights yet."),
        channel.highlights.list(),
        channel.highlights.phase(),
        channel.region() == ChannelRegion::Highlights,
        highlight_label,
    );
    render_tabs(frame, chunks[2], channel);
    render_body(frame, chunks[3], channel);
}

fn render_header(frame: &mut Frame, area: Rect, channel: &ChannelScreen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match channel.header() {
        RecordPhase::Init => vec![],
        RecordPhase::Loading => vec![Line::from(Span::styled("Loading...", Theme::loading()))],
        RecordPhase::Missing => vec![Line::from(Span::styled(CREATOR_NOT_FOUND, Theme::dimmed()))],
        RecordPhase::Error(msg) => vec![Line::from(Span::styled(msg.clone(), Theme::error()))],
        RecordPhase::Ready(creator) => vec![
            Line::from(Span::styled(creator.name.clone(), Theme::title())),
            Line::from(Span::styled(creator.subscribers_label(), Theme::secondary())),
            Line::from(Span::styled(
                creator.banner_image.clone().unwrap_or_default(),
                Theme::dimmed(),
            )),
        ],
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_tabs(frame: &mut Frame, area: Rect, channel: &ChannelScreen) {
    let tabs_active = channel.region() == ChannelRegion::Tabs;
    let mut spans = vec![Span::raw(" ")];
    for tab in channel.tabs.rendered() {
        let selected = *tab.item == channel.active_tab;
        let style = if tab.focused && tabs_active {
            Theme::card_focused()
        } else if selected {
            Theme::title_active().add_modifier(Modifier::UNDERLINED)
        } else {
            Theme::dimmed()
        };
        spans.push(Span::styled(format!(" {} ", tab.item.label()), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_body(frame: &mut Frame, area: Rect, channel: &ChannelScreen) {
    let active = channel.region() == ChannelRegion::Body;
    match channel.active_tab {
        ChannelTab::Videos => {
            let area = Rect {
                height: area.height.min(SLIDER_HEIGHT),
                ..area
            };
            slider::render_slider(
                frame,
                area,
                Heading::new("Videos", "No videos yet."),
                &channel.videos,
                &channel.videos_phase(),
                active,
                content_label,
            );
        }
        ChannelTab::Feeds => slider::render_grid(
            frame,
            area,
            FEED_COLUMNS,
            channel.feed.list(),
            channel.feed.phase(),
            "No feed posts yet.",
            post_label,
        ),
        ChannelTab::Playlists => render_playlists(frame, area, channel, active),
        ChannelTab::Community => render_community(frame, area, channel),
        ChannelTab::About => {
            let text = channel
                .creator
                .value()
                .map(|c| c.about.clone())
                .unwrap_or_default();
            frame.render_widget(
                Paragraph::new(text).style(Theme::text()).wrap(Wrap { trim: true }),
                area,
            );
        }
    }
}

fn render_playlists(frame: &mut Frame, area: Rect, channel: &ChannelScreen, active: bool) {
    if let Some(line) = slider::phase_line(channel.playlists.phase(), "No public playlists available.") {
        frame.render_widget(Paragraph::new(line), area);
        return;
    }
    let focused_row = channel.focused_playlist_row();
    let capacity = (area.height / SLIDER_HEIGHT).max(1) as usize;
    let window = slider::visible_window(channel.playlist_rows.len(), focused_row, capacity);

    let mut y = area.y;
    for index in window {
        let (Some(playlist), Some(list)) = (
            channel.playlists.list().get(index),
            channel.playlist_rows.get(index),
        ) else {
            continue;
        };
        let row_area = Rect {
            y,
            height: SLIDER_HEIGHT.min(area.bottom().saturating_sub(y)),
            ..area
        };
        slider::render_slider(
            frame,
            row_area,
            Heading::new(&playlist.name, slider::EMPTY_TEXT),
            list,
            &Phase::loaded(list.len()),
            active && focused_row == Some(index),
            video_label,
        );
        y += SLIDER_HEIGHT;
    }
}

fn post_lines(post: &CommunityPost, focused: bool) -> Vec<Line<'static>> {
    let marker = if focused {
        Span::styled("▌", Theme::title_active())
    } else {
        Span::raw(" ")
    };
    let mut lines = vec![
        Line::from(vec![
            marker.clone(),
            Span::styled(post.author_name().to_string(), Theme::title()),
            Span::raw("  "),
            Span::styled(post.date_label(), Theme::dimmed()),
        ]),
        Line::from(vec![marker.clone(), Span::styled(post.content.clone(), Theme::text())]),
    ];
    for comment in &post.comments {
        let author = comment.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
        lines.push(Line::from(vec![
            marker.clone(),
            Span::styled(format!("  ↳ {}: ", author), Theme::secondary()),
            Span::styled(comment.text.clone(), Theme::dimmed()),
        ]));
    }
    lines.push(Line::from(vec![
        marker,
        Span::styled(format!("♥ {}", post.likes.len()), Theme::dimmed()),
    ]));
    lines.push(Line::from(""));
    lines
}

fn render_community(frame: &mut Frame, area: Rect, channel: &ChannelScreen) {
    let list = channel.community.list();
    if let Some(line) = slider::phase_line(channel.community.phase(), "No community posts available.") {
        frame.render_widget(Paragraph::new(line), area);
        return;
    }
    let start = list.focused().unwrap_or(0);
    let lines: Vec<Line> = list
        .rendered()
        .skip(start)
        .flat_map(|post| post_lines(post.item, post.focused))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
