//! Channel screen state
//!
//! Creator header, highlights strip, tab bar and the active tab's body.
//! Each section loads on its own and fails on its own. The per-creator
//! sections (highlights, feed, playlists, community) are keyed on the creator
//! id, so a late response for a previous channel is never shown.

use crate::focus::{
    Direction, FocusPolicy, FocusableList, ListLayout, Navigable, Phase, Record, RecordPhase,
    Section, SelectionEvent,
};
use crate::models::{CommunityPost, Content, Creator, FeedPost, Highlight, Playlist, PlaylistVideo};

use super::{AppEvent, Command, Intent};

/// Columns of the feed grid
pub const FEED_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelTab {
    Videos,
    Feeds,
    Playlists,
    Community,
    About,
}

impl ChannelTab {
    pub const ALL: [ChannelTab; 5] = [
        ChannelTab::Videos,
        ChannelTab::Feeds,
        ChannelTab::Playlists,
        ChannelTab::Community,
        ChannelTab::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChannelTab::Videos => "VIDEOS",
            ChannelTab::Feeds => "FEEDS",
            ChannelTab::Playlists => "PLAYLISTS",
            ChannelTab::Community => "COMMUNITY",
            ChannelTab::About => "ABOUT",
        }
    }
}

impl Navigable for ChannelTab {
    fn key(&self) -> &str {
        self.label()
    }
}

/// Vertical position on the Channel screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRegion {
    Highlights,
    Tabs,
    Body,
}

fn open_content(content: &Content, _: &SelectionEvent) -> Intent {
    Intent::OpenContent(content.id.clone())
}

fn open_video(video: &PlaylistVideo, _: &SelectionEvent) -> Intent {
    Intent::OpenContent(video.id.clone())
}

fn open_post(post: &FeedPost, _: &SelectionEvent) -> Intent {
    Intent::OpenFeedPost(post.id.clone())
}

fn open_highlight(highlight: &Highlight, _: &SelectionEvent) -> Intent {
    Intent::OpenHighlight(highlight.id.clone())
}

fn select_tab(tab: &ChannelTab, _: &SelectionEvent) -> Intent {
    Intent::SelectTab(*tab)
}

#[derive(Debug)]
pub struct ChannelScreen {
    pub creator: Record<String, Creator>,
    pub highlights: Section<String, Highlight, Intent>,
    pub tabs: FocusableList<ChannelTab, Intent>,
    pub active_tab: ChannelTab,
    pub videos: FocusableList<Content, Intent>,
    pub feed: Section<String, FeedPost, Intent>,
    /// Playlist rows; the list's own focus says which row is active
    pub playlists: Section<String, Playlist, Intent>,
    pub playlist_rows: Vec<FocusableList<PlaylistVideo, Intent>>,
    pub community: Section<String, CommunityPost, Intent>,
    region: ChannelRegion,
}

impl Default for ChannelScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelScreen {
    pub fn new() -> Self {
        Self {
            creator: Record::new("Failed to load creator data. Please try again later."),
            highlights: Section::new(
                FocusableList::new(FocusPolicy::Unfocused, open_highlight),
                "Failed to load highlights.",
            ),
            tabs: FocusableList::new(FocusPolicy::FirstItem, select_tab)
                .with_items(ChannelTab::ALL.to_vec()),
            active_tab: ChannelTab::Videos,
            videos: FocusableList::new(FocusPolicy::Unfocused, open_content),
            feed: Section::new(
                FocusableList::new(FocusPolicy::Unfocused, open_post)
                    .with_layout(ListLayout::Grid { columns: FEED_COLUMNS }),
                "Failed to load feeds.",
            ),
            playlists: Section::new(
                FocusableList::inert(FocusPolicy::FirstItem).with_layout(ListLayout::Column),
                "Failed to load playlists.",
            ),
            playlist_rows: Vec::new(),
            community: Section::new(
                FocusableList::inert(FocusPolicy::Unfocused).with_layout(ListLayout::Column),
                "Failed to load community posts.",
            ),
            region: ChannelRegion::Tabs,
        }
    }

    /// Load the channel for `creator_id`
    pub fn start(&mut self, creator_id: String, commands: &mut Vec<Command>) {
        // Tab sections follow the creator; anything loaded for another
        // channel is discarded
        self.feed.switch_context(creator_id.clone());
        self.playlists.switch_context(creator_id.clone());
        self.playlist_rows.clear();
        self.community.switch_context(creator_id.clone());
        self.videos.clear();

        if let Some(ticket) = self.creator.load(creator_id.clone()) {
            commands.push(Command::LoadChannel(ticket));
        }
        if let Some(ticket) = self.highlights.load(creator_id) {
            commands.push(Command::LoadHighlights(ticket));
        }
        self.activate_tab(self.active_tab, commands);
    }

    pub fn creator_id(&self) -> Option<&str> {
        self.creator.context().map(String::as_str)
    }

    pub fn region(&self) -> ChannelRegion {
        self.region
    }

    /// Switch the body to `tab`, loading its section the first time
    pub fn activate_tab(&mut self, tab: ChannelTab, commands: &mut Vec<Command>) {
        self.active_tab = tab;
        let command = match tab {
            ChannelTab::Feeds if self.feed.phase() == &Phase::Init => {
                self.feed.begin_fetch().map(Command::LoadFeed)
            }
            ChannelTab::Playlists if self.playlists.phase() == &Phase::Init => {
                self.playlists.begin_fetch().map(Command::LoadPlaylists)
            }
            ChannelTab::Community if self.community.phase() == &Phase::Init => {
                self.community.begin_fetch().map(Command::LoadCommunity)
            }
            _ => None,
        };
        commands.extend(command);
    }

    pub fn feed_post(&self, key: &str) -> Option<&FeedPost> {
        let list = self.feed.list();
        list.position(key).and_then(|i| list.get(i))
    }

    /// Viewer over all highlights, opened at `key`
    pub fn highlight_viewer(&self, key: &str) -> Option<FocusableList<Highlight, Intent>> {
        let list = self.highlights.list();
        let start = list.position(key)?;
        let mut viewer = FocusableList::inert(FocusPolicy::Unfocused)
            .with_layout(ListLayout::Column)
            .with_items(list.items().to_vec());
        viewer.on_enter_focus(start);
        Some(viewer)
    }

    /// Row of the focused playlist
    pub fn focused_playlist_row(&self) -> Option<usize> {
        self.playlists.list().focused()
    }

    pub fn accepts(&self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Channel(ticket, _) => self.creator.accepts(ticket),
            AppEvent::Highlights(ticket, _) => self.highlights.accepts(ticket),
            AppEvent::Feed(ticket, _) => self.feed.accepts(ticket),
            AppEvent::Playlists(ticket, _) => self.playlists.accepts(ticket),
            AppEvent::Community(ticket, _) => self.community.accepts(ticket),
            _ => false,
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Channel(ticket, result) => {
                if self.creator.resolve(&ticket, result) {
                    let videos = self
                        .creator
                        .value()
                        .map(|c| c.content.clone())
                        .unwrap_or_default();
                    self.videos.replace(videos);
                }
            }
            AppEvent::Highlights(ticket, result) => {
                self.highlights.resolve(&ticket, result);
            }
            AppEvent::Feed(ticket, result) => {
                self.feed.resolve(&ticket, result);
            }
            AppEvent::Playlists(ticket, result) => {
                if self.playlists.resolve(&ticket, result) {
                    self.playlist_rows = self
                        .playlists
                        .list()
                        .items()
                        .iter()
                        .map(|p| {
                            FocusableList::new(FocusPolicy::Unfocused, open_video)
                                .with_items(p.videos.clone())
                        })
                        .collect();
                }
            }
            AppEvent::Community(ticket, result) => {
                self.community.resolve(&ticket, result);
            }
            _ => {}
        }
        if self.region == ChannelRegion::Body {
            self.resume_body();
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Directional input inside the active tab's body
    fn navigate_body(&mut self, direction: Direction) -> bool {
        match self.active_tab {
            ChannelTab::Videos => self.videos.navigate(direction),
            ChannelTab::Feeds => self.feed.list_mut().navigate(direction),
            ChannelTab::Community => self.community.list_mut().navigate(direction),
            ChannelTab::About => false,
            ChannelTab::Playlists => match direction {
                Direction::Left | Direction::Right => {
                    let Some(row) = self.focused_playlist_row() else {
                        return false;
                    };
                    self.playlist_rows
                        .get_mut(row)
                        .is_some_and(|list| list.navigate(direction))
                }
                Direction::Up | Direction::Down => {
                    let before = self.focused_playlist_row();
                    if !self.playlists.list_mut().navigate(direction) {
                        return false;
                    }
                    if let Some(list) = before.and_then(|i| self.playlist_rows.get_mut(i)) {
                        list.blur();
                    }
                    self.resume_body();
                    true
                }
            },
        }
    }

    /// Give the body's focused list something to focus
    fn resume_body(&mut self) {
        match self.active_tab {
            ChannelTab::Videos => {
                self.videos.resume();
            }
            ChannelTab::Feeds => {
                self.feed.list_mut().resume();
            }
            ChannelTab::Community => {
                self.community.list_mut().resume();
            }
            ChannelTab::Playlists => {
                self.playlists.list_mut().resume();
                if let Some(row) = self.focused_playlist_row() {
                    if let Some(list) = self.playlist_rows.get_mut(row) {
                        list.resume();
                    }
                }
            }
            ChannelTab::About => {}
        }
    }

    fn body_is_focusable(&self) -> bool {
        match self.active_tab {
            ChannelTab::Videos => !self.videos.is_empty(),
            ChannelTab::Feeds => !self.feed.list().is_empty(),
            ChannelTab::Playlists => !self.playlists.list().is_empty(),
            ChannelTab::Community => !self.community.list().is_empty(),
            ChannelTab::About => false,
        }
    }

    fn enter_region(&mut self, region: ChannelRegion) {
        if self.region == ChannelRegion::Highlights {
            self.highlights.list_mut().blur();
        }
        self.region = region;
        match region {
            ChannelRegion::Highlights => {
                self.highlights.list_mut().resume();
            }
            ChannelRegion::Tabs => {}
            ChannelRegion::Body => self.resume_body(),
        }
    }

    /// Returns whether focus moved
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match self.region {
            ChannelRegion::Highlights => {
                if self.highlights.list_mut().navigate(direction) {
                    return true;
                }
                if direction == Direction::Down {
                    self.enter_region(ChannelRegion::Tabs);
                    return true;
                }
                false
            }
            ChannelRegion::Tabs => match direction {
                Direction::Left | Direction::Right => self.tabs.navigate(direction),
                Direction::Up if !self.highlights.list().is_empty() => {
                    self.enter_region(ChannelRegion::Highlights);
                    true
                }
                Direction::Down if self.body_is_focusable() => {
                    self.enter_region(ChannelRegion::Body);
                    true
                }
                _ => false,
            },
            ChannelRegion::Body => {
                if self.navigate_body(direction) {
                    return true;
                }
                if direction == Direction::Up {
                    self.enter_region(ChannelRegion::Tabs);
                    return true;
                }
                false
            }
        }
    }

    pub fn confirm(&self) -> Option<Intent> {
        match self.region {
            ChannelRegion::Highlights => self.highlights.list().confirm_focused(),
            ChannelRegion::Tabs => self.tabs.confirm_focused(),
            ChannelRegion::Body => match self.active_tab {
                ChannelTab::Videos => self.videos.confirm_focused(),
                ChannelTab::Feeds => self.feed.list().confirm_focused(),
                ChannelTab::Playlists => self
                    .focused_playlist_row()
                    .and_then(|row| self.playlist_rows.get(row))
                    .and_then(|list| list.confirm_focused()),
                ChannelTab::Community | ChannelTab::About => None,
            },
        }
    }

    /// Header state for rendering
    pub fn header(&self) -> &RecordPhase<Creator> {
        self.creator.phase()
    }

    /// Videos come with the creator, so they share its load state
    pub fn videos_phase(&self) -> Phase {
        match self.creator.phase() {
            RecordPhase::Init => Phase::Init,
            RecordPhase::Loading => Phase::Loading,
            RecordPhase::Ready(_) => Phase::loaded(self.videos.len()),
            RecordPhase::Missing => Phase::Empty,
            RecordPhase::Error(msg) => Phase::Error(msg.clone()),
        }
    }
}
