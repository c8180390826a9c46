//! Home screen state
//!
//! Hero banner, the channels slider and the content shelves, stacked
//! vertically. Up/Down moves between rows, Left/Right within a row, and
//! every row keeps its own focus while the user is elsewhere.

use crate::api::ApiResult;
use crate::catalog::{HomeCatalog, ShelfKind};
use crate::focus::{
    Direction, FocusPolicy, FocusRegion, FocusState, FocusableList, ListLayout, Navigable, Phase,
    Record, RecordPhase, Section, SelectionEvent,
};
use crate::models::{Content, CreatorSummary};
use crate::store::UserStore;

use super::{AppEvent, Command, Intent};

/// Buttons on the hero banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerButton {
    WatchNow,
    Watchlist,
}

impl Navigable for BannerButton {
    fn key(&self) -> &str {
        match self {
            BannerButton::WatchNow => "watch-now",
            BannerButton::Watchlist => "watchlist",
        }
    }
}

/// Vertical position on the Home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeRegion {
    Banner,
    Channels,
    Shelf(ShelfKind),
}

/// Catalog shelf (everything except the personal ones)
#[derive(Debug)]
pub struct ShelfRow {
    pub kind: ShelfKind,
    pub list: FocusableList<Content, Intent>,
}

fn open_content(content: &Content, _: &SelectionEvent) -> Intent {
    Intent::OpenContent(content.id.clone())
}

fn open_channel(creator: &CreatorSummary, _: &SelectionEvent) -> Intent {
    Intent::OpenChannel(creator.id.clone())
}

fn press_banner(button: &BannerButton, _: &SelectionEvent) -> Intent {
    Intent::Banner(*button)
}

#[derive(Debug)]
pub struct HomeScreen {
    pub catalog: Record<(), HomeCatalog>,
    pub banner_buttons: FocusableList<BannerButton, Intent>,
    pub channels: Section<(), CreatorSummary, Intent>,
    pub shelves: Vec<ShelfRow>,
    pub likes: Section<String, Content, Intent>,
    pub watchlist: Section<String, Content, Intent>,
    regions: FocusState,
    region_order: Vec<HomeRegion>,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        let shelves = ShelfKind::ORDER
            .into_iter()
            .filter(|kind| !kind.requires_session())
            .map(|kind| ShelfRow {
                kind,
                list: FocusableList::new(FocusPolicy::Unfocused, open_content),
            })
            .collect();

        let mut home = Self {
            catalog: Record::new("Failed to load content."),
            banner_buttons: FocusableList::new(FocusPolicy::Unfocused, press_banner)
                .with_items(vec![BannerButton::WatchNow, BannerButton::Watchlist]),
            channels: Section::new(
                FocusableList::new(FocusPolicy::Unfocused, open_channel),
                "Failed to load channels. Please try again later.",
            ),
            shelves,
            likes: Section::new(
                FocusableList::new(FocusPolicy::Unfocused, open_content),
                "Failed to load content.",
            ),
            watchlist: Section::new(
                FocusableList::new(FocusPolicy::Unfocused, open_content),
                "Failed to load content.",
            ),
            regions: FocusState::new(FocusPolicy::FirstItem),
            region_order: Vec::new(),
        };
        home.sync_regions();
        home
    }

    /// Kick off every fetch the screen needs
    pub fn start(&mut self, user: &UserStore, commands: &mut Vec<Command>) {
        if let Some(ticket) = self.catalog.load(()) {
            commands.push(Command::LoadCatalog(ticket));
        }
        if let Some(ticket) = self.channels.load(()) {
            commands.push(Command::LoadCreators(ticket));
        }
        self.sync_user(user, commands);
    }

    /// Point the personal shelves at the signed-in user (or drop them)
    pub fn sync_user(&mut self, user: &UserStore, commands: &mut Vec<Command>) {
        match user.user() {
            Some(u) => {
                if self.likes.context() != Some(&u.id) {
                    if let Some(ticket) = self.likes.load(u.id.clone()) {
                        commands.push(Command::LoadLikedContent {
                            ticket,
                            token: u.token.clone(),
                        });
                    }
                }
                if self.watchlist.context() != Some(&u.id) {
                    if let Some(ticket) = self.watchlist.load(u.id.clone()) {
                        commands.push(Command::LoadWatchlist {
                            ticket,
                            token: u.token.clone(),
                        });
                    }
                }
            }
            None => {
                self.likes.reset();
                self.watchlist.reset();
            }
        }
        self.sync_regions();
    }

    /// Refetch one personal shelf after the user changed it
    pub fn refresh_personal(&mut self, kind: ShelfKind, user: &UserStore, commands: &mut Vec<Command>) {
        let Some(token) = user.token() else {
            return;
        };
        let command = match kind {
            ShelfKind::MyLikes => self.likes.begin_fetch().map(|ticket| Command::LoadLikedContent {
                ticket,
                token: token.to_string(),
            }),
            ShelfKind::MyWatchlist => self.watchlist.begin_fetch().map(|ticket| Command::LoadWatchlist {
                ticket,
                token: token.to_string(),
            }),
            _ => None,
        };
        commands.extend(command);
    }

    /// Banner items
    pub fn featured(&self) -> &[Content] {
        self.catalog
            .value()
            .map(|c| c.featured.as_slice())
            .unwrap_or(&[])
    }

    /// Rows in display order
    pub fn regions(&self) -> &[HomeRegion] {
        &self.region_order
    }

    pub fn focused_region(&self) -> Option<HomeRegion> {
        self.regions
            .focused()
            .and_then(|i| self.region_order.get(i).copied())
    }

    pub fn personal(&self, kind: ShelfKind) -> Option<&Section<String, Content, Intent>> {
        match kind {
            ShelfKind::MyLikes => Some(&self.likes),
            ShelfKind::MyWatchlist => Some(&self.watchlist),
            _ => None,
        }
    }

    /// Items of a shelf, catalog or personal
    pub fn shelf_list(&self, kind: ShelfKind) -> Option<&FocusableList<Content, Intent>> {
        match self.personal(kind) {
            Some(section) => Some(section.list()),
            None => self.shelves.iter().find(|r| r.kind == kind).map(|r| &r.list),
        }
    }

    /// Load state of a shelf
    pub fn shelf_phase(&self, kind: ShelfKind) -> Phase {
        if let Some(section) = self.personal(kind) {
            return section.phase().clone();
        }
        match self.catalog.phase() {
            RecordPhase::Init => Phase::Init,
            RecordPhase::Loading => Phase::Loading,
            RecordPhase::Ready(_) => Phase::loaded(self.shelf_list(kind).map_or(0, |l| l.len())),
            RecordPhase::Missing => Phase::Empty,
            RecordPhase::Error(msg) => Phase::Error(msg.clone()),
        }
    }

    pub fn accepts(&self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Catalog(ticket, _) => self.catalog.accepts(ticket),
            AppEvent::Creators(ticket, _) => self.channels.accepts(ticket),
            AppEvent::LikedContent(ticket, _) => self.likes.accepts(ticket),
            AppEvent::Watchlist(ticket, _) => self.watchlist.accepts(ticket),
            _ => false,
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Catalog(ticket, result) => {
                if self.catalog.resolve(&ticket, result.map(Some)) {
                    self.fill_shelves();
                }
            }
            AppEvent::Creators(ticket, result) => {
                self.channels.resolve(&ticket, result);
            }
            AppEvent::LikedContent(ticket, result) => {
                self.likes.resolve(&ticket, personal_or_empty(result));
            }
            AppEvent::Watchlist(ticket, result) => {
                self.watchlist.resolve(&ticket, personal_or_empty(result));
            }
            _ => {}
        }
        self.sync_regions();
        self.refocus();
    }

    fn fill_shelves(&mut self) {
        let Some(catalog) = self.catalog.value() else {
            return;
        };
        for row in &mut self.shelves {
            let items = match row.kind {
                ShelfKind::TopTen => catalog.top_ten.clone(),
                ShelfKind::New => catalog.new.clone(),
                kind => catalog
                    .shelf(kind)
                    .map(|s| s.items.clone())
                    .unwrap_or_default(),
            };
            row.list.replace(items);
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    fn visible_regions(&self) -> Vec<HomeRegion> {
        let mut regions = Vec::new();
        if !self.featured().is_empty() {
            regions.push(HomeRegion::Banner);
        }
        regions.push(HomeRegion::Channels);
        for kind in ShelfKind::ORDER {
            let hidden = self
                .personal(kind)
                .is_some_and(|section| section.context().is_none());
            if !hidden {
                regions.push(HomeRegion::Shelf(kind));
            }
        }
        regions
    }

    /// Recompute the row order, keeping focus on the same row if it survives
    fn sync_regions(&mut self) {
        let order = self.visible_regions();
        if order == self.region_order {
            return;
        }
        let previous = self.focused_region();
        self.region_order = order;
        self.regions.reset(self.region_order.len());
        if let Some(index) = previous.and_then(|p| self.region_order.iter().position(|r| *r == p)) {
            self.regions.on_enter_focus(index);
        }
        self.refocus();
    }

    /// Make sure the focused row has a focused item once it has items
    fn refocus(&mut self) {
        if let Some(region) = self.focused_region() {
            if let Some(row) = self.row_mut(region) {
                row.resume();
            }
        }
    }

    fn row(&self, region: HomeRegion) -> Option<&dyn FocusRegion<Intent>> {
        match region {
            HomeRegion::Banner => Some(&self.banner_buttons),
            HomeRegion::Channels => Some(self.channels.list()),
            HomeRegion::Shelf(kind) => self.shelf_list(kind).map(|l| l as &dyn FocusRegion<Intent>),
        }
    }

    fn row_mut(&mut self, region: HomeRegion) -> Option<&mut dyn FocusRegion<Intent>> {
        match region {
            HomeRegion::Banner => Some(&mut self.banner_buttons),
            HomeRegion::Channels => Some(self.channels.list_mut()),
            HomeRegion::Shelf(ShelfKind::MyLikes) => Some(self.likes.list_mut()),
            HomeRegion::Shelf(ShelfKind::MyWatchlist) => Some(self.watchlist.list_mut()),
            HomeRegion::Shelf(kind) => self
                .shelves
                .iter_mut()
                .find(|r| r.kind == kind)
                .map(|r| &mut r.list as &mut dyn FocusRegion<Intent>),
        }
    }

    /// Returns whether focus moved
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(region) = self.focused_region() else {
            return false;
        };
        match direction {
            Direction::Left | Direction::Right => self
                .row_mut(region)
                .is_some_and(|row| row.navigate(direction)),
            Direction::Up | Direction::Down => {
                if !self.regions.navigate(ListLayout::Column, direction) {
                    return false;
                }
                if let Some(row) = self.row_mut(region) {
                    row.blur();
                }
                if let Some(next) = self.focused_region() {
                    if let Some(row) = self.row_mut(next) {
                        row.resume();
                    }
                }
                true
            }
        }
    }

    pub fn confirm(&self) -> Option<Intent> {
        self.row(self.focused_region()?)?.confirm_focused()
    }
}

/// Personal shelves show nothing rather than an error when they fail
fn personal_or_empty(result: ApiResult<Vec<Content>>) -> ApiResult<Vec<Content>> {
    result.or_else(|e| {
        tracing::warn!(error = %e, "personal shelf failed, showing it empty");
        Ok(Vec::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FetchTicket;
    use crate::models::User;

    fn content(id: &str, category: &str) -> Content {
        Content {
            id: id.into(),
            title: id.to_uppercase(),
            description: String::new(),
            video: String::new(),
            thumbnail: String::new(),
            category: category.into(),
        }
    }

    fn catalog_ticket(commands: &[Command]) -> FetchTicket<()> {
        commands
            .iter()
            .find_map(|c| match c {
                Command::LoadCatalog(t) => Some(t.clone()),
                _ => None,
            })
            .unwrap()
    }

    fn loaded_home() -> HomeScreen {
        let mut home = HomeScreen::new();
        let mut commands = Vec::new();
        home.start(&UserStore::new(), &mut commands);
        let all: Vec<Content> = (0..6).map(|i| content(&format!("c{}", i), "Interview")).collect();
        let catalog = HomeCatalog::build(&all, vec![content("c3", "Interview")]);
        home.apply(AppEvent::Catalog(catalog_ticket(&commands), Ok(catalog)));
        home
    }

    #[test]
    fn test_guest_has_no_personal_shelves() {
        let home = loaded_home();
        assert!(!home.regions().contains(&HomeRegion::Shelf(ShelfKind::MyLikes)));
        assert_eq!(home.regions()[0], HomeRegion::Banner);
        assert_eq!(home.regions()[1], HomeRegion::Channels);
    }

    #[test]
    fn test_signed_in_user_gets_personal_shelves() {
        let mut home = HomeScreen::new();
        let mut commands = Vec::new();
        let store = UserStore::signed_in(User {
            id: "u1".into(),
            name: "Ana".into(),
            email: String::new(),
            token: "tok".into(),
            likes: vec![],
            watchlist: vec![],
        });
        home.start(&store, &mut commands);

        assert!(home.regions().contains(&HomeRegion::Shelf(ShelfKind::MyWatchlist)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::LoadWatchlist { token, .. } if token == "tok")));
    }

    #[test]
    fn test_focus_stays_on_row_when_banner_appears() {
        let mut home = HomeScreen::new();
        let mut commands = Vec::new();
        home.start(&UserStore::new(), &mut commands);
        assert_eq!(home.focused_region(), Some(HomeRegion::Channels));
        assert!(home.navigate(Direction::Down));
        assert_eq!(home.focused_region(), Some(HomeRegion::Shelf(ShelfKind::TopTen)));

        let all = vec![content("c0", "Social")];
        home.apply(AppEvent::Catalog(
            catalog_ticket(&commands),
            Ok(HomeCatalog::build(&all, vec![])),
        ));
        assert_eq!(home.regions()[0], HomeRegion::Banner);
        assert_eq!(home.focused_region(), Some(HomeRegion::Shelf(ShelfKind::TopTen)));
    }

    #[test]
    fn test_rows_keep_their_own_focus() {
        let mut home = loaded_home();
        assert_eq!(home.focused_region(), Some(HomeRegion::Channels));
        home.navigate(Direction::Down);
        home.navigate(Direction::Down);
        assert_eq!(home.focused_region(), Some(HomeRegion::Shelf(ShelfKind::New)));
        home.navigate(Direction::Right);
        home.navigate(Direction::Right);
        assert_eq!(home.confirm(), Some(Intent::OpenContent("c2".into())));

        home.navigate(Direction::Up);
        home.navigate(Direction::Down);
        assert_eq!(home.confirm(), Some(Intent::OpenContent("c2".into())));
    }

    #[test]
    fn test_shelf_phase_follows_catalog() {
        let mut home = HomeScreen::new();
        let mut commands = Vec::new();
        home.start(&UserStore::new(), &mut commands);
        assert_eq!(home.shelf_phase(ShelfKind::Social), Phase::Loading);

        home.apply(AppEvent::Catalog(
            catalog_ticket(&commands),
            Err(crate::api::ApiError::ServerError(500)),
        ));
        assert_eq!(
            home.shelf_phase(ShelfKind::Social),
            Phase::Error("Failed to load content.".into())
        );
    }

    #[test]
    fn test_personal_failure_is_empty() {
        let result = personal_or_empty(Err(crate::api::ApiError::Unauthorized));
        assert!(result.unwrap().is_empty());
    }
}
