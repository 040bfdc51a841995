//! Type definitions for the commit selection list.
//!
//! This module defines the state the selection UI keeps between key presses
//! and the actions a key press can end the selection with.

use indexmap::IndexSet;

/// How the user left the selection list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListAction {
    Confirm,
    Cancel,
}

/// Direction to move the focus in the selection list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the list when there are more rows than fit
/// on screen or in the configured page size.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

impl ViewportState {
    /// Viewport for a terminal of the given size, capped at `page_size` rows.
    ///
    /// Two terminal rows are reserved for the header and the filter line.
    #[must_use]
    pub fn for_terminal(width: u16, height: u16, page_size: u16) -> Self {
        Self {
            offset: 0,
            height: height.saturating_sub(2).min(page_size).max(1),
            width,
        }
    }
}

/// Complete UI state for the commit selection list.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the focused row among the visible rows
    pub focused: usize,
    /// Choice indexes the user ticked, in the order they were ticked
    pub selected: IndexSet<usize>,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether typed characters currently edit the filter
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

impl UiState {
    #[must_use]
    pub fn new(viewport: ViewportState) -> Self {
        Self {
            focused: 0,
            selected: IndexSet::new(),
            viewport,
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}
