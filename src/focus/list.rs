//! Focusable list
//!
//! The generic list behind every slider, grid, tab bar and button row: an
//! ordered item source, its focus state, and its selection dispatcher.

use super::selection::{ConfirmTicket, ListId, ListSnapshot, SelectionDispatcher, SelectionHandler};
use super::state::{Direction, FocusPolicy, FocusState, ListLayout};
use super::Navigable;

/// One item as handed to a render template
#[derive(Debug, Clone, Copy)]
pub struct RenderedItem<'a, T> {
    pub index: usize,
    /// Stable render key (the item's identifier)
    pub key: &'a str,
    pub item: &'a T,
    pub focused: bool,
}

/// Ordered, focusable, selectable list of `T` producing actions `A`
#[derive(Debug)]
pub struct FocusableList<T, A> {
    id: ListId,
    items: Vec<T>,
    focus: FocusState,
    layout: ListLayout,
    /// Bumped on every wholesale replacement
    generation: u64,
    dispatcher: SelectionDispatcher<T, A>,
}

impl<T: Navigable, A> FocusableList<T, A> {
    /// Empty list whose confirms go to `handler`
    pub fn new(policy: FocusPolicy, handler: SelectionHandler<T, A>) -> Self {
        Self::with_dispatcher(policy, SelectionDispatcher::new(handler))
    }

    /// Empty list that only tracks focus (confirms do nothing)
    pub fn inert(policy: FocusPolicy) -> Self {
        Self::with_dispatcher(policy, SelectionDispatcher::inert())
    }

    fn with_dispatcher(policy: FocusPolicy, dispatcher: SelectionDispatcher<T, A>) -> Self {
        Self {
            id: ListId::new(),
            items: Vec::new(),
            focus: FocusState::new(policy),
            layout: ListLayout::Row,
            generation: 0,
            dispatcher,
        }
    }

    pub fn with_layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Start with `items` already loaded
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.replace(items);
        self
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub fn focused_item(&self) -> Option<&T> {
        self.focus.focused().and_then(|i| self.items.get(i))
    }

    /// Position of the item with `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Replace the whole source. Focus starts over and outstanding confirm
    /// tickets become invalid.
    pub fn replace(&mut self, items: Vec<T>) {
        self.generation += 1;
        self.focus.reset(items.len());
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn on_enter_focus(&mut self, index: usize) -> bool {
        self.focus.on_enter_focus(index)
    }

    pub fn on_exit_focus(&mut self, index: usize) {
        self.focus.on_exit_focus(index);
    }

    /// Focus leaves the list entirely
    pub fn blur(&mut self) {
        if let Some(index) = self.focus.focused() {
            self.focus.on_exit_focus(index);
        }
    }

    /// Focus comes back into the list; returns whether anything took it
    pub fn resume(&mut self) -> bool {
        self.focus.resume().is_some()
    }

    /// Directional input; `false` means the move leaves this list
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.focus.navigate(self.layout, direction)
    }

    /// Ticket for confirming whatever is focused right now
    pub fn ticket(&self) -> Option<ConfirmTicket> {
        self.focus.focused().map(|index| self.ticket_at(index))
    }

    /// Ticket for confirming the item at `index` of the current generation
    pub fn ticket_at(&self, index: usize) -> ConfirmTicket {
        ConfirmTicket {
            list: self.id,
            generation: self.generation,
            index,
        }
    }

    /// Dispatch a previously captured confirm
    pub fn confirm(&self, ticket: ConfirmTicket) -> Option<A> {
        self.dispatcher.on_confirm(
            ticket,
            ListSnapshot {
                id: self.id,
                generation: self.generation,
                items: &self.items,
            },
        )
    }

    /// Confirm the focused item
    pub fn confirm_focused(&self) -> Option<A> {
        self.ticket().and_then(|ticket| self.confirm(ticket))
    }

    /// Items in display order with their focus flag
    pub fn rendered(&self) -> impl Iterator<Item = RenderedItem<'_, T>> + '_ {
        self.items.iter().enumerate().map(move |(index, item)| RenderedItem {
            index,
            key: item.key(),
            item,
            focused: self.focus.is_focused(index),
        })
    }
}

/// Object-safe view of a list, for screens that stack lists of
/// different item types into one vertical focus order
pub trait FocusRegion<A> {
    fn navigate(&mut self, direction: Direction) -> bool;
    fn blur(&mut self);
    fn resume(&mut self) -> bool;
    fn confirm_focused(&self) -> Option<A>;
    fn is_empty(&self) -> bool;
}

impl<T: Navigable, A> FocusRegion<A> for FocusableList<T, A> {
    fn navigate(&mut self, direction: Direction) -> bool {
        FocusableList::navigate(self, direction)
    }

    fn blur(&mut self) {
        FocusableList::blur(self)
    }

    fn resume(&mut self) -> bool {
        FocusableList::resume(self)
    }

    fn confirm_focused(&self) -> Option<A> {
        FocusableList::confirm_focused(self)
    }

    fn is_empty(&self) -> bool {
        FocusableList::is_empty(self)
    }
}
