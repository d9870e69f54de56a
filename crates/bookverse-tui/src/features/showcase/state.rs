//! Showcase view state: filter criteria and list selection.

use bookverse_core::catalog::{self, Book, CATEGORY_ALL, FilterCriteria};

/// State for the showcase view.
///
/// The criteria are ephemeral: they live and die with this view and are
/// never sent to the backend.
#[derive(Debug, Default)]
pub struct ShowcaseState {
    /// Active filter criteria.
    pub criteria: FilterCriteria,
    /// Selected index into the visible (filtered) list.
    pub selected: usize,
    /// Whether keystrokes currently feed the search query.
    pub searching: bool,
}

impl ShowcaseState {
    /// Recomputes the visible subset of `books` under the active criteria.
    ///
    /// Total recomputation on every call; order preserved.
    pub fn visible_books<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        catalog::filter_books(books, &self.criteria)
    }

    /// Clamps the selection after the visible list changed.
    pub fn clamp_selection(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.selected = 0;
        } else if self.selected >= visible_len {
            self.selected = visible_len - 1;
        }
    }

    /// Steps the category criterion through the option list.
    pub fn cycle_category(&mut self, options: &[String], forward: bool) {
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|c| *c == self.criteria.category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.criteria.category = options[next].clone();
        self.selected = 0;
    }

    /// Resets every criterion to the identity filter.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.selected = 0;
        debug_assert_eq!(self.criteria.category, CATEGORY_ALL);
    }
}
