//! Focus-driven navigable lists
//!
//! Every slider, grid, tab bar and button row in the client is a
//! [`FocusableList`]: items in a fixed order, at most one focused index, and a
//! single handler that turns a confirm into an action. Lists fed by the
//! network are wrapped in a [`Section`] which adds the load lifecycle and the
//! stale-response guard.

pub mod list;
pub mod section;
pub mod selection;
pub mod state;

pub use list::{FocusRegion, FocusableList, RenderedItem};
pub use section::{ContextGuard, FetchTicket, Phase, Record, RecordPhase, Section};
pub use selection::{ConfirmTicket, ListId, SelectionDispatcher, SelectionEvent, SelectionHandler};
pub use state::{Direction, FocusPolicy, FocusState, ListLayout};

/// Item that can live in a focusable list
pub trait Navigable {
    /// Stable identifier used as render key and in selection events
    fn key(&self) -> &str;
}

impl Navigable for String {
    fn key(&self) -> &str {
        self
    }
}

impl Navigable for &'static str {
    fn key(&self) -> &str {
        self
    }
}
