//! Focus state controller
//!
//! Tracks the single focused index of one navigable list. `None` is the
//! "nothing focused" state (the `-1` of a TV focus engine); `raw()` exposes
//! that signed form for callers that want it.

/// What a freshly loaded list does with focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPolicy {
    /// Nothing is focused until the user moves into the list
    #[default]
    Unfocused,
    /// First item is pre-focused so a remote can act without a focus hop
    FirstItem,
}

/// Spatial arrangement of a list, used to interpret directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListLayout {
    /// Horizontal slider: Left/Right move, Up/Down leave the list
    #[default]
    Row,
    /// Vertical list: Up/Down move, Left/Right leave the list
    Column,
    /// Wrapped grid with a fixed column count
    Grid { columns: usize },
}

/// Remote-control direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Focus state for one list instance
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    focused: Option<usize>,
    /// Last index that lost focus, used when focus comes back to the list
    resume: Option<usize>,
    len: usize,
    policy: FocusPolicy,
}

impl FocusState {
    pub fn new(policy: FocusPolicy) -> Self {
        Self {
            focused: None,
            resume: None,
            len: 0,
            policy,
        }
    }

    pub fn policy(&self) -> FocusPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Currently focused index
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focus index in signed form, `-1` when nothing is focused
    pub fn raw(&self) -> isize {
        self.focused.map(|i| i as isize).unwrap_or(-1)
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == Some(index)
    }

    /// Give focus to `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether the index was accepted. Calling it again with the
    /// focused index is a no-op.
    pub fn on_enter_focus(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.focused = Some(index);
        true
    }

    /// Drop focus from `index`, but only if it is the focused one.
    ///
    /// A blur for an index that no longer holds focus (for example one
    /// granted before the list was reloaded) leaves the current focus alone.
    pub fn on_exit_focus(&mut self, index: usize) {
        if self.focused == Some(index) {
            self.focused = None;
            self.resume = Some(index);
        }
    }

    /// Start over for a list of `len` items (reload or context change)
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.resume = None;
        self.focused = self.initial();
    }

    /// Update the length without a reload; a focus past the end is reset
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = self.initial();
        }
        if self.resume.is_some_and(|i| i >= len) {
            self.resume = None;
        }
    }

    /// Bring focus back into the list, preferring the last blurred index
    pub fn resume(&mut self) -> Option<usize> {
        if self.focused.is_some() {
            return self.focused;
        }
        if self.len == 0 {
            return None;
        }
        let index = self.resume.filter(|&i| i < self.len).unwrap_or(0);
        self.focused = Some(index);
        self.focused
    }

    /// Move focus by `delta`, clamped to the list bounds.
    ///
    /// Returns `false` when focus could not move (empty list, or already at
    /// the edge in that direction). Moving while nothing is focused lands on
    /// the first item.
    pub fn move_by(&mut self, delta: isize) -> bool {
        if self.len == 0 {
            return false;
        }
        let Some(current) = self.focused else {
            self.focused = Some(0);
            return true;
        };
        let target = (current as isize + delta).clamp(0, self.len as isize - 1) as usize;
        if target == current {
            return false;
        }
        self.focused = Some(target);
        true
    }

    /// Jump to first item
    pub fn first(&mut self) {
        if self.len > 0 {
            self.focused = Some(0);
        }
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.focused = Some(self.len - 1);
        }
    }

    /// Interpret a direction for the given layout.
    ///
    /// Returns `false` when the direction leaves the list, so the owning
    /// screen can hand focus to a neighbouring region.
    pub fn navigate(&mut self, layout: ListLayout, direction: Direction) -> bool {
        match (layout, direction) {
            (ListLayout::Row, Direction::Left) | (ListLayout::Column, Direction::Up) => {
                self.move_by(-1)
            }
            (ListLayout::Row, Direction::Right) | (ListLayout::Column, Direction::Down) => {
                self.move_by(1)
            }
            (ListLayout::Row, _) | (ListLayout::Column, _) => false,
            (ListLayout::Grid { columns }, direction) => self.navigate_grid(columns.max(1), direction),
        }
    }

    fn navigate_grid(&mut self, columns: usize, direction: Direction) -> bool {
        if self.len == 0 {
            return false;
        }
        let Some(current) = self.focused else {
            self.focused = Some(0);
            return true;
        };
        let column = current % columns;
        let target = match direction {
            Direction::Left if column > 0 => current - 1,
            Direction::Right if column + 1 < columns && current + 1 < self.len => current + 1,
            Direction::Up if current >= columns => current - columns,
            Direction::Down => {
                let row_start = current - column + columns;
                if row_start >= self.len {
                    return false;
                }
                // Partially filled last row: land on its last item
                (current + columns).min(self.len - 1)
            }
            _ => return false,
        };
        self.focused = Some(target);
        true
    }

    fn initial(&self) -> Option<usize> {
        match self.policy {
            FocusPolicy::FirstItem if self.len > 0 => Some(0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(len: usize, policy: FocusPolicy) -> FocusState {
        let mut state = FocusState::new(policy);
        state.reset(len);
        state
    }

    #[test]
    fn test_enter_focus_moves_single_focus() {
        let mut focus = loaded(5, FocusPolicy::Unfocused);
        assert!(focus.on_enter_focus(1));
        assert!(focus.on_enter_focus(3));

        let focused: Vec<usize> = (0..5).filter(|&i| focus.is_focused(i)).collect();
        assert_eq!(focused, vec![3]);
    }

    #[test]
    fn test_enter_focus_idempotent() {
        let mut focus = loaded(3, FocusPolicy::Unfocused);
        assert!(focus.on_enter_focus(2));
        assert!(focus.on_enter_focus(2));
        assert_eq!(focus.focused(), Some(2));
    }

    #[test]
    fn test_enter_focus_rejects_out_of_range() {
        let mut focus = loaded(3, FocusPolicy::Unfocused);
        focus.on_enter_focus(1);
        assert!(!focus.on_enter_focus(3));
        assert!(!focus.on_enter_focus(usize::MAX));
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn test_stale_exit_is_noop() {
        let mut focus = loaded(4, FocusPolicy::Unfocused);
        focus.on_enter_focus(0);
        focus.on_enter_focus(2);

        // Blur for the item that lost focus earlier arrives late
        focus.on_exit_focus(0);
        assert_eq!(focus.focused(), Some(2));

        focus.on_exit_focus(2);
        assert_eq!(focus.focused(), None);
        assert_eq!(focus.raw(), -1);
    }

    #[test]
    fn test_shrink_resets_dangling_focus() {
        let mut focus = loaded(10, FocusPolicy::Unfocused);
        focus.on_enter_focus(8);
        focus.set_len(5);
        assert_eq!(focus.focused(), None);

        let mut pre = loaded(10, FocusPolicy::FirstItem);
        pre.on_enter_focus(8);
        pre.set_len(5);
        assert_eq!(pre.focused(), Some(0));
    }

    #[test]
    fn test_shrink_keeps_valid_focus() {
        let mut focus = loaded(10, FocusPolicy::Unfocused);
        focus.on_enter_focus(2);
        focus.set_len(5);
        assert_eq!(focus.focused(), Some(2));
    }

    #[test]
    fn test_reset_applies_policy() {
        assert_eq!(loaded(3, FocusPolicy::FirstItem).focused(), Some(0));
        assert_eq!(loaded(0, FocusPolicy::FirstItem).focused(), None);
        assert_eq!(loaded(3, FocusPolicy::Unfocused).focused(), None);
    }

    #[test]
    fn test_move_by_clamps_and_reports_edges() {
        let mut focus = loaded(3, FocusPolicy::Unfocused);
        assert!(focus.move_by(1));
        assert_eq!(focus.focused(), Some(0));
        assert!(focus.move_by(1));
        assert!(focus.move_by(1));
        assert!(!focus.move_by(1));
        assert_eq!(focus.focused(), Some(2));
        assert!(!loaded(0, FocusPolicy::Unfocused).move_by(1));
    }

    #[test]
    fn test_resume_returns_to_last_blurred() {
        let mut focus = loaded(5, FocusPolicy::Unfocused);
        focus.on_enter_focus(3);
        focus.on_exit_focus(3);
        assert_eq!(focus.resume(), Some(3));

        focus.reset(5);
        assert_eq!(focus.resume(), Some(0));
    }

    #[test]
    fn test_row_layout_leaves_vertically() {
        let mut focus = loaded(3, FocusPolicy::FirstItem);
        assert!(!focus.navigate(ListLayout::Row, Direction::Up));
        assert!(!focus.navigate(ListLayout::Row, Direction::Left));
        assert!(focus.navigate(ListLayout::Row, Direction::Right));
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn test_grid_navigation() {
        let grid = ListLayout::Grid { columns: 3 };
        let mut focus = loaded(7, FocusPolicy::FirstItem);

        // 0 1 2
        // 3 4 5
        // 6
        assert!(!focus.navigate(grid, Direction::Up));
        assert!(focus.navigate(grid, Direction::Right));
        assert!(focus.navigate(grid, Direction::Right));
        assert!(!focus.navigate(grid, Direction::Right));
        assert_eq!(focus.focused(), Some(2));

        assert!(focus.navigate(grid, Direction::Down));
        assert_eq!(focus.focused(), Some(5));
        assert!(focus.navigate(grid, Direction::Down));
        assert_eq!(focus.focused(), Some(6));
        assert!(!focus.navigate(grid, Direction::Down));

        assert!(focus.navigate(grid, Direction::Up));
        assert_eq!(focus.focused(), Some(3));
        assert!(!focus.navigate(grid, Direction::Left));
    }
}
