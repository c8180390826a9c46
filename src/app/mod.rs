//! App state and core application logic
//!
//! Manages the screen stack, the signed-in user and the queue of side
//! effects. Input is handled synchronously: a key either moves focus or
//! confirms an item, a confirm yields an [`Intent`], and intents turn into
//! screen changes and [`Command`]s. Command results come back later as
//! [`AppEvent`]s and are applied only if the screen that asked still wants
//! them.

mod channel;
mod home;
mod login;
mod movie;

pub use channel::{ChannelRegion, ChannelScreen, ChannelTab, FEED_COLUMNS};
pub use home::{BannerButton, HomeRegion, HomeScreen, ShelfRow};
pub use login::{LoginField, LoginScreen, TextField};
pub use movie::{MovieButton, MovieScreen};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ApiResult;
use crate::banner::BannerRotation;
use crate::catalog::{HomeCatalog, ShelfKind};
use crate::config::Session;
use crate::focus::{Direction, FetchTicket, FocusableList};
use crate::models::*;
use crate::store::{ActionDispatcher, SessionStatus, UserAction, UserEvent, UserStore};

/// Shown when a like/watchlist button is pressed without a session
pub const SIGN_IN_HINT: &str = "Sign in to like or save";

// =============================================================================
// Routes, Intents, Effects
// =============================================================================

/// Where the user is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Channel { creator_id: String },
    Movie { content_id: String },
}

/// What a confirmed selection asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenContent(String),
    OpenChannel(String),
    OpenFeedPost(String),
    OpenHighlight(String),
    SelectTab(ChannelTab),
    Banner(BannerButton),
    Movie(MovieButton),
    Login(LoginField),
}

/// Side effect requested by the app, executed outside the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadCatalog(FetchTicket<()>),
    LoadCreators(FetchTicket<()>),
    LoadLikedContent {
        ticket: FetchTicket<String>,
        token: String,
    },
    LoadWatchlist {
        ticket: FetchTicket<String>,
        token: String,
    },
    LoadChannel(FetchTicket<String>),
    LoadHighlights(FetchTicket<String>),
    LoadFeed(FetchTicket<String>),
    LoadPlaylists(FetchTicket<String>),
    LoadCommunity(FetchTicket<String>),
    LoadContent(FetchTicket<String>),
    Login {
        email: String,
        password: String,
    },
    User {
        action: UserAction,
        token: String,
    },
    /// Persist (or forget) the session in the config file
    SaveSession(Option<Session>),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadCatalog(_) => "load_catalog",
            Command::LoadCreators(_) => "load_creators",
            Command::LoadLikedContent { .. } => "load_liked_content",
            Command::LoadWatchlist { .. } => "load_watchlist",
            Command::LoadChannel(_) => "load_channel",
            Command::LoadHighlights(_) => "load_highlights",
            Command::LoadFeed(_) => "load_feed",
            Command::LoadPlaylists(_) => "load_playlists",
            Command::LoadCommunity(_) => "load_community",
            Command::LoadContent(_) => "load_content",
            Command::Login { .. } => "login",
            Command::User { .. } => "user_action",
            Command::SaveSession(_) => "save_session",
        }
    }
}

/// Result of a [`Command`], delivered back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Catalog(FetchTicket<()>, ApiResult<HomeCatalog>),
    Creators(FetchTicket<()>, ApiResult<Vec<CreatorSummary>>),
    LikedContent(FetchTicket<String>, ApiResult<Vec<Content>>),
    Watchlist(FetchTicket<String>, ApiResult<Vec<Content>>),
    /// `Ok(None)` when the creator does not exist
    Channel(FetchTicket<String>, ApiResult<Option<Creator>>),
    Highlights(FetchTicket<String>, ApiResult<Vec<Highlight>>),
    Feed(FetchTicket<String>, ApiResult<Vec<FeedPost>>),
    Playlists(FetchTicket<String>, ApiResult<Vec<Playlist>>),
    Community(FetchTicket<String>, ApiResult<Vec<CommunityPost>>),
    /// `Ok(None)` when the content does not exist
    Content(FetchTicket<String>, ApiResult<Option<Content>>),
    User(UserEvent),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::Catalog(..) => "catalog",
            AppEvent::Creators(..) => "creators",
            AppEvent::LikedContent(..) => "liked_content",
            AppEvent::Watchlist(..) => "watchlist",
            AppEvent::Channel(..) => "channel",
            AppEvent::Highlights(..) => "highlights",
            AppEvent::Feed(..) => "feed",
            AppEvent::Playlists(..) => "playlists",
            AppEvent::Community(..) => "community",
            AppEvent::Content(..) => "content",
            AppEvent::User(_) => "user",
        }
    }
}

// =============================================================================
// Screens
// =============================================================================

#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Home(HomeScreen),
    Channel(ChannelScreen),
    Movie(MovieScreen),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Login(_) => Route::Login,
            Screen::Home(_) => Route::Home,
            Screen::Channel(channel) => Route::Channel {
                creator_id: channel.creator_id().unwrap_or_default().to_string(),
            },
            Screen::Movie(movie) => Route::Movie {
                content_id: movie.content_id().unwrap_or_default().to_string(),
            },
        }
    }

    fn accepts(&self, event: &AppEvent) -> bool {
        match self {
            Screen::Login(_) => false,
            Screen::Home(home) => home.accepts(event),
            Screen::Channel(channel) => channel.accepts(event),
            Screen::Movie(movie) => movie.accepts(event),
        }
    }

    fn apply(&mut self, event: AppEvent) {
        match self {
            Screen::Login(_) => {}
            Screen::Home(home) => home.apply(event),
            Screen::Channel(channel) => channel.apply(event),
            Screen::Movie(movie) => movie.apply(event),
        }
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        match self {
            Screen::Login(login) => login.navigate(direction),
            Screen::Home(home) => home.navigate(direction),
            Screen::Channel(channel) => channel.navigate(direction),
            Screen::Movie(movie) => movie.navigate(direction),
        }
    }

    fn confirm(&self) -> Option<Intent> {
        match self {
            Screen::Login(login) => login.confirm(),
            Screen::Home(home) => home.confirm(),
            Screen::Channel(channel) => channel.confirm(),
            Screen::Movie(movie) => movie.confirm(),
        }
    }
}

/// Modal viewer over the current screen
#[derive(Debug)]
pub enum Overlay {
    FeedPost(FeedPost),
    /// Vertical pager over a creator's highlights
    Highlights(FocusableList<Highlight, Intent>),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Foreground screen
    pub screen: Screen,
    /// Screens underneath, most recent last
    pub nav_stack: Vec<Screen>,
    pub overlay: Option<Overlay>,
    pub user: UserStore,
    pub banner: BannerRotation,
    /// Transient hint or failure message, cleared on the next key
    pub status: Option<String>,
    commands: Vec<Command>,
}

impl App {
    /// Start on Home with a restored session, otherwise on Login
    pub fn new(session: Option<User>, banner_interval: Duration) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Login(LoginScreen::new()),
            nav_stack: Vec::new(),
            overlay: None,
            user: UserStore::new(),
            banner: BannerRotation::new(banner_interval),
            status: None,
            commands: Vec::new(),
        };
        if let Some(user) = session {
            app.user = UserStore::signed_in(user);
            app.reset_to(Route::Home);
        }
        app
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn login(&self) -> Option<&LoginScreen> {
        match &self.screen {
            Screen::Login(login) => Some(login),
            _ => None,
        }
    }

    pub fn home(&self) -> Option<&HomeScreen> {
        match &self.screen {
            Screen::Home(home) => Some(home),
            _ => None,
        }
    }

    pub fn channel(&self) -> Option<&ChannelScreen> {
        match &self.screen {
            Screen::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    pub fn movie(&self) -> Option<&MovieScreen> {
        match &self.screen {
            Screen::Movie(movie) => Some(movie),
            _ => None,
        }
    }

    /// Commands queued since the last call
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn pending_commands(&self) -> &[Command] {
        &self.commands
    }

    /// Printable keys go to a text field
    pub fn is_editing(&self) -> bool {
        self.overlay.is_none() && self.login().is_some_and(LoginScreen::is_editing)
    }

    /// Banner item currently shown
    pub fn featured_item(&self) -> Option<&Content> {
        self.home()?.featured().get(self.banner.index())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn build(&mut self, route: Route) -> Screen {
        match route {
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Home => {
                let mut home = HomeScreen::new();
                home.start(&self.user, &mut self.commands);
                Screen::Home(home)
            }
            Route::Channel { creator_id } => {
                let mut channel = ChannelScreen::new();
                channel.start(creator_id, &mut self.commands);
                Screen::Channel(channel)
            }
            Route::Movie { content_id } => {
                let mut movie = MovieScreen::new();
                movie.start(content_id, &mut self.commands);
                Screen::Movie(movie)
            }
        }
    }

    /// Open `route` on top of the current screen
    pub fn navigate(&mut self, route: Route) {
        if self.route() == route {
            return;
        }
        tracing::debug!(?route, "navigate");
        let screen = self.build(route);
        let previous = std::mem::replace(&mut self.screen, screen);
        self.nav_stack.push(previous);
        self.overlay = None;
        self.sync_banner();
    }

    /// Replace the whole stack with `route`
    pub fn reset_to(&mut self, route: Route) {
        tracing::debug!(?route, "reset navigation");
        self.screen = self.build(route);
        self.nav_stack.clear();
        self.overlay = None;
        self.sync_banner();
    }

    /// Close the overlay, or go back one screen
    pub fn back(&mut self) -> bool {
        if self.overlay.take().is_some() {
            return true;
        }
        match self.nav_stack.pop() {
            Some(previous) => {
                self.screen = previous;
                self.sync_banner();
                true
            }
            None => false,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn sign_out(&mut self) {
        if !self.user.is_signed_in() {
            return;
        }
        tracing::info!("signing out");
        self.user.apply(UserEvent::LoggedOut);
        self.commands.push(Command::SaveSession(None));
        self.reset_to(Route::Login);
    }

    /// Banner runs only while Home is in the foreground
    fn sync_banner(&mut self) {
        match &self.screen {
            Screen::Home(home) if self.overlay.is_none() => self.banner.start(home.featured().len()),
            _ => self.banner.stop(),
        }
    }

    /// Advance timers; returns whether a redraw is needed
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.sync_banner();
        self.banner.tick_with_elapsed(elapsed)
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    pub fn perform(&mut self, intent: Intent) {
        tracing::debug!(?intent, "perform");
        match intent {
            Intent::OpenContent(content_id) => self.navigate(Route::Movie { content_id }),
            Intent::OpenChannel(creator_id) => self.navigate(Route::Channel { creator_id }),
            Intent::OpenFeedPost(key) => {
                if let Some(post) = self.channel().and_then(|c| c.feed_post(&key)).cloned() {
                    self.overlay = Some(Overlay::FeedPost(post));
                }
            }
            Intent::OpenHighlight(key) => {
                if let Some(viewer) = self.channel().and_then(|c| c.highlight_viewer(&key)) {
                    self.overlay = Some(Overlay::Highlights(viewer));
                }
            }
            Intent::SelectTab(tab) => {
                if let Screen::Channel(channel) = &mut self.screen {
                    channel.activate_tab(tab, &mut self.commands);
                }
            }
            Intent::Banner(button) => {
                let Some(content_id) = self.featured_item().map(|c| c.id.clone()) else {
                    return;
                };
                match button {
                    BannerButton::WatchNow => self.navigate(Route::Movie { content_id }),
                    BannerButton::Watchlist => {
                        let action = self.user.watchlist_toggle(&content_id);
                        self.request(action);
                    }
                }
            }
            Intent::Movie(button) => {
                let Some(content_id) = self.movie().and_then(|m| m.content.value()).map(|c| c.id.clone()) else {
                    return;
                };
                let action = match button {
                    MovieButton::Like => self.user.like_toggle(&content_id),
                    MovieButton::Watchlist => self.user.watchlist_toggle(&content_id),
                };
                self.request(action);
            }
            Intent::Login(field) => self.login_intent(field),
        }
    }

    /// Dispatch `action` if someone is signed in, otherwise show a hint
    fn request(&mut self, action: UserAction) {
        if self.user.is_signed_in() {
            self.dispatch(action);
        } else {
            self.status = Some(SIGN_IN_HINT.to_string());
        }
    }

    fn login_intent(&mut self, field: LoginField) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        match field {
            LoginField::Email => login.focus(LoginField::Password),
            LoginField::Password | LoginField::Submit => {
                if self.user.status() == SessionStatus::SigningIn {
                    return;
                }
                match login.credentials() {
                    Some((email, password)) => {
                        self.user.apply(UserEvent::SigningIn);
                        self.commands.push(Command::Login { email, password });
                    }
                    None => self.status = Some("Enter your email and password.".to_string()),
                }
            }
            LoginField::Guest => self.reset_to(Route::Home),
        }
    }

    // -------------------------------------------------------------------------
    // Command results
    // -------------------------------------------------------------------------

    /// Apply a command result to whichever screen is waiting for it
    pub fn apply_event(&mut self, event: AppEvent) {
        let event = match event {
            AppEvent::User(user_event) => return self.apply_user_event(user_event),
            other => other,
        };
        let is_catalog = matches!(event, AppEvent::Catalog(..));

        let target = std::iter::once(&mut self.screen)
            .chain(self.nav_stack.iter_mut())
            .find(|screen| screen.accepts(&event));
        let Some(screen) = target else {
            tracing::debug!(event = event.name(), "dropping stale response");
            return;
        };
        screen.apply(event);

        if is_catalog {
            let featured = std::iter::once(&self.screen)
                .chain(self.nav_stack.iter())
                .find_map(|screen| match screen {
                    Screen::Home(home) => Some(home.featured().len()),
                    _ => None,
                })
                .unwrap_or(0);
            self.banner.reset(featured);
        }
        self.sync_banner();
    }

    fn apply_user_event(&mut self, event: UserEvent) {
        let refresh = match &event {
            UserEvent::LikesUpdated(_) => Some(ShelfKind::MyLikes),
            UserEvent::WatchlistUpdated(_) => Some(ShelfKind::MyWatchlist),
            _ => None,
        };
        let signed_in = match &event {
            UserEvent::LoggedIn(user) => Some(Session::from_user(user)),
            _ => None,
        };
        if let UserEvent::ActionFailed(message) = &event {
            self.status = Some(message.clone());
        }
        self.user.apply(event);

        if let Some(session) = signed_in {
            self.commands.push(Command::SaveSession(Some(session)));
            if matches!(self.screen, Screen::Login(_)) {
                self.reset_to(Route::Home);
                return;
            }
        }

        let (user, commands) = (&self.user, &mut self.commands);
        for screen in std::iter::once(&mut self.screen).chain(self.nav_stack.iter_mut()) {
            if let Screen::Home(home) = screen {
                match refresh {
                    Some(kind) => home.refresh_personal(kind, user, commands),
                    None => home.sync_user(user, commands),
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Hints live until the next keypress
        self.status = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.overlay.is_some() {
            return self.handle_overlay_key(key);
        }
        if self.is_editing() && self.handle_editing_key(key) {
            return true;
        }
        self.handle_normal_key(key)
    }

    /// Keys typed into the focused text field
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Login(login) = &mut self.screen else {
            return false;
        };
        let Some(input) = login.active_input() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.cursor_left(),
            KeyCode::Right => input.cursor_right(),
            KeyCode::Home => input.cursor_home(),
            KeyCode::End => input.cursor_end(),
            _ => return false,
        }
        true
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => self.page_highlights(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.page_highlights(Direction::Down),
            _ => false,
        }
    }

    fn page_highlights(&mut self, direction: Direction) -> bool {
        match &mut self.overlay {
            Some(Overlay::Highlights(viewer)) => viewer.navigate(direction),
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let direction = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            return self.screen.navigate(direction);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('L') => {
                self.sign_out();
                true
            }
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Enter => {
                if let Some(intent) = self.screen.confirm() {
                    self.perform(intent);
                }
                true
            }
            _ => false,
        }
    }
}

impl ActionDispatcher for App {
    fn dispatch(&mut self, action: UserAction) {
        let Some(token) = self.user.token().map(str::to_string) else {
            tracing::debug!(action = action.name(), "no session, action dropped");
            return;
        };
        tracing::info!(
            action = action.name(),
            content_id = action.content_id(),
            "dispatching user action"
        );
        self.commands.push(Command::User { action, token });
    }
}
