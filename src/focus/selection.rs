//! Selection dispatcher
//!
//! Turns a confirm (Enter / OK on the remote) on a list item into exactly one
//! action value. The confirm is described by a [`ConfirmTicket`] captured
//! from the list; the ticket is checked against the list as it is *now*, so a
//! confirm that raced with a reload is dropped instead of acting on the wrong
//! item.

use std::fmt;
use uuid::Uuid;

use super::Navigable;

/// Identity of one list instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(Uuid);

impl ListId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// A confirmed selection, produced once per physical confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Stable key of the selected item
    pub key: String,
    /// List the item was selected from
    pub list: ListId,
    /// Position of the item at confirm time
    pub index: usize,
}

/// Pending confirm captured from a list at input time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmTicket {
    pub list: ListId,
    /// List generation the index refers to
    pub generation: u64,
    pub index: usize,
}

/// Maps a selected item to the action it triggers
pub type SelectionHandler<T, A> = fn(&T, &SelectionEvent) -> A;

/// Current contents of a list as seen by the dispatcher
#[derive(Debug, Clone, Copy)]
pub struct ListSnapshot<'a, T> {
    pub id: ListId,
    pub generation: u64,
    pub items: &'a [T],
}

/// Dispatches confirms to the list's single registered handler
pub struct SelectionDispatcher<T, A> {
    handler: Option<SelectionHandler<T, A>>,
}

impl<T, A> SelectionDispatcher<T, A> {
    pub fn new(handler: SelectionHandler<T, A>) -> Self {
        Self {
            handler: Some(handler),
        }
    }

    /// Dispatcher for display-only lists; confirms produce nothing
    pub fn inert() -> Self {
        Self { handler: None }
    }

    pub fn is_inert(&self) -> bool {
        self.handler.is_none()
    }
}

impl<T: Navigable, A> SelectionDispatcher<T, A> {
    /// Resolve `ticket` against the current list and run the handler.
    ///
    /// Returns `None` when the ticket belongs to another list, to an older
    /// generation of this list, or points past the end.
    pub fn on_confirm(&self, ticket: ConfirmTicket, current: ListSnapshot<'_, T>) -> Option<A> {
        if ticket.list != current.id || ticket.generation != current.generation {
            tracing::debug!(
                list = %current.id,
                ticket_generation = ticket.generation,
                generation = current.generation,
                "dropping confirm for replaced list"
            );
            return None;
        }
        let Some(item) = current.items.get(ticket.index) else {
            tracing::debug!(list = %current.id, index = ticket.index, "dropping confirm past end of list");
            return None;
        };
        let handler = self.handler?;
        let event = SelectionEvent {
            key: item.key().to_string(),
            list: current.id,
            index: ticket.index,
        };
        tracing::debug!(list = %event.list, key = %event.key, "selection confirmed");
        Some(handler(item, &event))
    }
}

impl<T, A> Clone for SelectionDispatcher<T, A> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler,
        }
    }
}

impl<T, A> fmt::Debug for SelectionDispatcher<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionDispatcher")
            .field("inert", &self.handler.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item(&'static str);

    impl Navigable for Item {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn key_of(item: &Item, _: &SelectionEvent) -> String {
        item.0.to_string()
    }

    #[test]
    fn test_confirm_runs_handler_for_live_item() {
        let dispatcher = SelectionDispatcher::new(key_of as SelectionHandler<Item, String>);
        let id = ListId::new();
        let items = [Item("a"), Item("b")];
        let ticket = ConfirmTicket {
            list: id,
            generation: 1,
            index: 1,
        };
        let snapshot = ListSnapshot {
            id,
            generation: 1,
            items: &items,
        };
        assert_eq!(dispatcher.on_confirm(ticket, snapshot), Some("b".to_string()));
    }

    #[test]
    fn test_confirm_drops_older_generation() {
        let dispatcher = SelectionDispatcher::new(key_of as SelectionHandler<Item, String>);
        let id = ListId::new();
        let items = [Item("a"), Item("b")];
        let ticket = ConfirmTicket {
            list: id,
            generation: 1,
            index: 0,
        };
        let snapshot = ListSnapshot {
            id,
            generation: 2,
            items: &items,
        };
        assert_eq!(dispatcher.on_confirm(ticket, snapshot), None);
    }

    #[test]
    fn test_confirm_drops_foreign_list() {
        let dispatcher = SelectionDispatcher::new(key_of as SelectionHandler<Item, String>);
        let items = [Item("a")];
        let ticket = ConfirmTicket {
            list: ListId::new(),
            generation: 0,
            index: 0,
        };
        let snapshot = ListSnapshot {
            id: ListId::new(),
            generation: 0,
            items: &items,
        };
        assert_eq!(dispatcher.on_confirm(ticket, snapshot), None);
    }

    #[test]
    fn test_inert_dispatcher_produces_nothing() {
        let dispatcher: SelectionDispatcher<Item, String> = SelectionDispatcher::inert();
        let id = ListId::new();
        let items = [Item("a")];
        let ticket = ConfirmTicket {
            list: id,
            generation: 0,
            index: 0,
        };
        let snapshot = ListSnapshot {
            id,
            generation: 0,
            items: &items,
        };
        assert!(dispatcher.is_inert());
        assert_eq!(dispatcher.on_confirm(ticket, snapshot), None);
    }

    #[test]
    fn test_list_id_display_is_short() {
        assert_eq!(ListId::new().to_string().len(), 8);
    }
}
