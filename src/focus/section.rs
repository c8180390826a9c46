//! Load lifecycle for lists fed by the network
//!
//! A [`Section`] couples a [`FocusableList`] with the state machine a remote
//! data source goes through:
//!
//! ```text
//! INIT --fetch started--> LOADING --ok(empty)--> EMPTY
//!                         LOADING --ok(items)--> READY
//!                         LOADING --failure----> ERROR
//! READY | EMPTY | ERROR --context changed--> INIT
//! ```
//!
//! Every fetch carries a [`FetchTicket`] naming the context it was started
//! for. Results whose context is no longer active, or that were superseded by
//! a newer fetch, are dropped by the [`ContextGuard`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::list::FocusableList;
use super::Navigable;

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

/// Identifies one fetch and the context it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<C> {
    pub context: C,
    /// Process-unique request number
    pub request: u64,
}

/// Stale-response guard keyed on the active context
#[derive(Debug, Clone)]
pub struct ContextGuard<C> {
    active: Option<C>,
    pending: Option<u64>,
}

impl<C> Default for ContextGuard<C> {
    fn default() -> Self {
        Self {
            active: None,
            pending: None,
        }
    }
}

impl<C: Clone + PartialEq> ContextGuard<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&C> {
        self.active.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Make `context` the active one. Returns `true` if it changed, in which
    /// case any fetch in flight for the previous context is abandoned.
    pub fn switch_to(&mut self, context: C) -> bool {
        if self.active.as_ref() == Some(&context) {
            return false;
        }
        self.active = Some(context);
        self.pending = None;
        true
    }

    /// Forget the active context entirely
    pub fn clear(&mut self) {
        self.active = None;
        self.pending = None;
    }

    /// Start a fetch for the active context; supersedes earlier ones
    pub fn begin(&mut self) -> Option<FetchTicket<C>> {
        let context = self.active.clone()?;
        let request = NEXT_REQUEST.fetch_add(1, Ordering::Relaxed);
        self.pending = Some(request);
        Some(FetchTicket { context, request })
    }

    /// Would a result for `ticket` be applied right now?
    pub fn accepts(&self, ticket: &FetchTicket<C>) -> bool {
        self.active.as_ref() == Some(&ticket.context) && self.pending == Some(ticket.request)
    }

    /// Consume `ticket` if it is current. A ticket settles at most once.
    pub fn settle(&mut self, ticket: &FetchTicket<C>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.pending = None;
        true
    }
}

/// Visible state of a network-fed section
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet for the current context
    #[default]
    Init,
    Loading,
    /// Loaded, zero items
    Empty,
    /// Loaded, at least one item
    Ready,
    /// Load failed; carries the message shown inline
    Error(String),
}

impl Phase {
    /// Phase after a successful load of `len` items
    pub fn loaded(len: usize) -> Self {
        if len == 0 {
            Phase::Empty
        } else {
            Phase::Ready
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Focusable list plus its load lifecycle
#[derive(Debug)]
pub struct Section<C, T, A> {
    guard: ContextGuard<C>,
    phase: Phase,
    list: FocusableList<T, A>,
    /// Inline message shown when a load fails
    error_message: &'static str,
}

impl<C, T, A> Section<C, T, A>
where
    C: Clone + PartialEq + fmt::Debug,
    T: Navigable,
{
    pub fn new(list: FocusableList<T, A>, error_message: &'static str) -> Self {
        Self {
            guard: ContextGuard::new(),
            phase: Phase::Init,
            list,
            error_message,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn context(&self) -> Option<&C> {
        self.guard.active()
    }

    pub fn list(&self) -> &FocusableList<T, A> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut FocusableList<T, A> {
        &mut self.list
    }

    /// Would a result for `ticket` be applied?
    pub fn accepts(&self, ticket: &FetchTicket<C>) -> bool {
        self.guard.accepts(ticket)
    }

    /// Drop the context and everything loaded for it
    pub fn reset(&mut self) {
        self.guard.clear();
        self.list.clear();
        self.phase = Phase::Init;
    }

    /// Switch to another owning context; old data is discarded
    pub fn switch_context(&mut self, context: C) {
        if self.guard.switch_to(context) {
            self.list.clear();
            self.phase = Phase::Init;
        }
    }

    /// Move to LOADING for the active context. Items from an earlier load
    /// are dropped so nothing hidden behind the loading line stays focusable.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket<C>> {
        let ticket = self.guard.begin()?;
        if !self.list.is_empty() {
            self.list.clear();
        }
        self.phase = Phase::Loading;
        tracing::debug!(context = ?ticket.context, request = ticket.request, "section fetch started");
        Some(ticket)
    }

    /// Switch to `context` (if needed) and start fetching it
    pub fn load(&mut self, context: C) -> Option<FetchTicket<C>> {
        self.switch_context(context);
        self.begin_fetch()
    }

    /// Apply a fetch result. Returns `false` if the result was stale.
    pub fn resolve<E: fmt::Display>(&mut self, ticket: &FetchTicket<C>, result: Result<Vec<T>, E>) -> bool {
        if !self.guard.settle(ticket) {
            tracing::debug!(
                context = ?ticket.context,
                request = ticket.request,
                "dropping stale section response"
            );
            return false;
        }
        match result {
            Ok(items) => {
                self.phase = Phase::loaded(items.len());
                self.list.replace(items);
            }
            Err(e) => {
                tracing::warn!(context = ?ticket.context, error = %e, "section load failed");
                self.list.clear();
                self.phase = Phase::Error(self.error_message.to_string());
            }
        }
        true
    }
}

/// Load lifecycle of a single record (channel page, content detail)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordPhase<T> {
    #[default]
    Init,
    Loading,
    Ready(T),
    /// The server reported the record does not exist
    Missing,
    Error(String),
}

/// Network-fed single record guarded like a [`Section`]
#[derive(Debug)]
pub struct Record<C, T> {
    guard: ContextGuard<C>,
    phase: RecordPhase<T>,
    error_message: &'static str,
}

impl<C, T> Record<C, T>
where
    C: Clone + PartialEq + fmt::Debug,
{
    pub fn new(error_message: &'static str) -> Self {
        Self {
            guard: ContextGuard::new(),
            phase: RecordPhase::Init,
            error_message,
        }
    }

    pub fn phase(&self) -> &RecordPhase<T> {
        &self.phase
    }

    pub fn context(&self) -> Option<&C> {
        self.guard.active()
    }

    pub fn value(&self) -> Option<&T> {
        match &self.phase {
            RecordPhase::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn accepts(&self, ticket: &FetchTicket<C>) -> bool {
        self.guard.accepts(ticket)
    }

    /// Switch context (if needed) and start fetching
    pub fn load(&mut self, context: C) -> Option<FetchTicket<C>> {
        if self.guard.switch_to(context) {
            self.phase = RecordPhase::Init;
        }
        let ticket = self.guard.begin()?;
        self.phase = RecordPhase::Loading;
        Some(ticket)
    }

    /// Apply a result where `Ok(None)` means "not found"
    pub fn resolve<E: fmt::Display>(&mut self, ticket: &FetchTicket<C>, result: Result<Option<T>, E>) -> bool {
        if !self.guard.settle(ticket) {
            tracing::debug!(context = ?ticket.context, request = ticket.request, "dropping stale record response");
            return false;
        }
        self.phase = match result {
            Ok(Some(value)) => RecordPhase::Ready(value),
            Ok(None) => RecordPhase::Missing,
            Err(e) => {
                tracing::warn!(context = ?ticket.context, error = %e, "record load failed");
                RecordPhase::Error(self.error_message.to_string())
            }
        };
        true
    }
}
