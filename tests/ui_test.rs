//! UI rendering tests
//!
//! Renders whole screens into a TestBackend and checks the text a viewer
//! would see: load states, inline errors and the user-dependent labels.

use std::time::Duration;

use ratatui::{backend::TestBackend, Terminal};

use playmood::api::ApiError;
use playmood::app::{App, AppEvent, Command, Route};
use playmood::focus::FetchTicket;
use playmood::models::{Content, User};
use playmood::store::UserEvent;
use playmood::ui::{self, theme::contrast_ratio, Theme};

const INTERVAL: Duration = Duration::from_secs(5);

fn draw(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn user() -> User {
    User {
        id: "u1".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        token: "tok".into(),
        likes: vec![],
        watchlist: vec!["c1".into()],
    }
}

fn content(id: &str) -> Content {
    Content {
        id: id.into(),
        title: "Backstage Milan".into(),
        description: "Two days behind the runway.".into(),
        video: "https://cdn.example/c1.mp4".into(),
        thumbnail: String::new(),
        category: "Fashion Show".into(),
    }
}

fn ticket(commands: &[Command], pick: fn(&Command) -> Option<&FetchTicket<String>>) -> FetchTicket<String> {
    commands.iter().find_map(pick).cloned().unwrap()
}

fn content_ticket(command: &Command) -> Option<&FetchTicket<String>> {
    match command {
        Command::LoadContent(t) => Some(t),
        _ => None,
    }
}

fn channel_ticket(command: &Command) -> Option<&FetchTicket<String>> {
    match command {
        Command::LoadChannel(t) => Some(t),
        _ => None,
    }
}

// =============================================================================
// Login
// =============================================================================

#[test]
fn test_login_form() {
    let app = App::new(None, INTERVAL);
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("SIGN IN"));
    assert!(screen.contains("Email"));
    assert!(screen.contains("LOGIN"));
    assert!(screen.contains("BROWSE AS GUEST"));
    assert!(screen.contains("guest"));
}

#[test]
fn test_login_error_and_masked_password() {
    let mut app = App::new(None, INTERVAL);
    app.user.apply(UserEvent::LoginFailed("Invalid email or password.".into()));
    let Some(login) = app.login() else {
        panic!("expected login screen");
    };
    assert!(login.password.is_empty());

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Invalid email or password."));
}

#[test]
fn test_login_signing_in_label() {
    let mut app = App::new(None, INTERVAL);
    app.user.apply(UserEvent::SigningIn);
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Signing in..."));
}

// =============================================================================
// Home
// =============================================================================

#[test]
fn test_home_shows_loading_rows() {
    let app = App::new(Some(user()), INTERVAL);
    let screen = draw(&app, 120, 40);
    assert!(screen.contains("PLAYMOOD"));
    assert!(screen.contains("Ana"));
    assert!(screen.contains("Channels"));
    assert!(screen.contains("Top 10"));
    assert!(screen.contains("Loading..."));
    assert!(screen.contains("HOME"));
}

#[test]
fn test_home_small_terminal() {
    let app = App::new(Some(user()), INTERVAL);
    let screen = draw(&app, 40, 12);
    assert!(screen.contains("HOME"));
}

// =============================================================================
// Movie
// =============================================================================

#[test]
fn test_movie_labels_follow_user() {
    let mut app = App::new(Some(user()), INTERVAL);
    app.take_commands();
    app.navigate(Route::Movie {
        content_id: "c1".into(),
    });
    let t = ticket(&app.take_commands(), content_ticket);
    app.apply_event(AppEvent::Content(t, Ok(Some(content("c1")))));

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("Backstage Milan"));
    assert!(screen.contains("Fashion Show"));
    assert!(screen.contains(" LIKE "));
    assert!(screen.contains("REMOVE FROM WATCHLIST"));

    app.apply_event(AppEvent::User(UserEvent::WatchlistUpdated(vec![])));
    let screen = draw(&app, 120, 30);
    assert!(screen.contains("ADD TO WATCHLIST"));
}

#[test]
fn test_movie_not_found() {
    let mut app = App::new(Some(user()), INTERVAL);
    app.take_commands();
    app.navigate(Route::Movie {
        content_id: "nope".into(),
    });
    let t = ticket(&app.take_commands(), content_ticket);
    app.apply_event(AppEvent::Content(t, Ok(None)));

    let screen = draw(&app, 100, 30);
    assert!(screen.contains(ui::movie::CONTENT_NOT_FOUND));
}

#[test]
fn test_sign_in_hint_in_status_bar() {
    let mut app = App::new(None, INTERVAL);
    app.reset_to(Route::Home);
    app.take_commands();
    app.navigate(Route::Movie {
        content_id: "c1".into(),
    });
    let t = ticket(&app.take_commands(), content_ticket);
    app.apply_event(AppEvent::Content(t, Ok(Some(content("c1")))));
    app.perform(playmood::app::Intent::Movie(playmood::app::MovieButton::Like));

    let screen = draw(&app, 120, 30);
    assert!(screen.contains(playmood::app::SIGN_IN_HINT));
}

// =============================================================================
// Channel
// =============================================================================

#[test]
fn test_channel_error_inline() {
    let mut app = App::new(Some(user()), INTERVAL);
    app.take_commands();
    app.navigate(Route::Channel {
        creator_id: "cr1".into(),
    });
    let t = ticket(&app.take_commands(), channel_ticket);
    app.apply_event(AppEvent::Channel(t, Err(ApiError::ServerError(500))));

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("Failed to load creator data. Please try again later."));
    assert!(screen.contains("Highlights"));
    assert!(screen.contains("CHANNEL"));
}

#[test]
fn test_channel_not_found() {
    let mut app = App::new(Some(user()), INTERVAL);
    app.take_commands();
    app.navigate(Route::Channel {
        creator_id: "ghost".into(),
    });
    let t = ticket(&app.take_commands(), channel_ticket);
    app.apply_event(AppEvent::Channel(t, Ok(None)));

    let screen = draw(&app, 120, 30);
    assert!(screen.contains(ui::channel::CREATOR_NOT_FOUND));
}

#[test]
fn test_channel_empty_sections_have_their_own_text() {
    let mut app = App::new(Some(user()), INTERVAL);
    app.take_commands();
    app.navigate(Route::Channel {
        creator_id: "cr1".into(),
    });
    let commands = app.take_commands();
    let highlights = ticket(&commands, |c| match c {
        Command::LoadHighlights(t) => Some(t),
        _ => None,
    });
    app.apply_event(AppEvent::Highlights(highlights, Ok(vec![])));

    let screen = draw(&app, 120, 30);
    assert!(screen.contains("No highlights yet."));
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_text_contrast_on_background() {
    for color in [Theme::TEXT, Theme::BRAND, Theme::ERROR] {
        let ratio = contrast_ratio(color, Theme::BACKGROUND).unwrap();
        assert!(ratio >= 4.5, "{:?} contrast {:.2}", color, ratio);
    }
}
