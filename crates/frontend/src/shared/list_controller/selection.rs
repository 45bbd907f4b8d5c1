//! Selected row ids plus the "all matching rows, across pages" flag.

/// Rows with a non-positive id are never selectable
pub fn is_valid_id(id: i64) -> bool {
    id > 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllOutcome {
    /// Everything visible was already selected; selection emptied
    Cleared,
    /// Every valid row of the page selected
    PageSelected,
    /// Page selected and the across-pages flag raised
    AcrossPages,
    /// The page had no selectable rows
    Nothing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    selected: Vec<i64>,
    across_pages: bool,
    /// Every id matching the filter, once collected by a second fetch
    materialized: Option<Vec<i64>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[i64] {
        &self.selected
    }

    pub fn contains(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_across_pages(&self) -> bool {
        self.across_pages
    }

    /// Anything a bulk action could act on
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty() || self.across_pages
    }

    pub fn materialized(&self) -> Option<&[i64]> {
        self.materialized.as_deref()
    }

    /// Selecting or deselecting a single row always demotes to page-local selection.
    pub fn toggle(&mut self, id: i64) {
        if let Some(pos) = self.selected.iter().position(|x| *x == id) {
            self.selected.remove(pos);
        } else if is_valid_id(id) {
            self.selected.push(id);
        }
        self.demote_to_page();
    }

    pub fn all_on_page_selected(&self, page_ids: &[i64]) -> bool {
        let mut valid = page_ids.iter().filter(|id| is_valid_id(**id)).peekable();
        valid.peek().is_some() && valid.all(|id| self.contains(*id))
    }

    pub fn select_all(&mut self, page_ids: &[i64], allow_across: bool) -> SelectAllOutcome {
        if self.all_on_page_selected(page_ids) {
            self.clear();
            return SelectAllOutcome::Cleared;
        }

        if !page_ids.iter().any(|id| is_valid_id(*id)) {
            return SelectAllOutcome::Nothing;
        }
        // Rows picked on other pages stay selected
        for id in page_ids.iter().copied().filter(|id| is_valid_id(*id)) {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
        self.materialized = None;
        if allow_across {
            self.across_pages = true;
            SelectAllOutcome::AcrossPages
        } else {
            self.across_pages = false;
            SelectAllOutcome::PageSelected
        }
    }

    /// Store the full id set of an across-pages selection. Ignored once demoted.
    pub fn set_materialized(&mut self, ids: Vec<i64>) -> bool {
        if !self.across_pages {
            return false;
        }
        self.materialized = Some(ids.into_iter().filter(|id| is_valid_id(*id)).collect());
        true
    }

    /// Keep the visible ids, drop the across-pages scope.
    pub fn demote_to_page(&mut self) {
        self.across_pages = false;
        self.materialized = None;
    }

    /// A row was deleted on its own
    pub fn remove(&mut self, id: i64) {
        self.selected.retain(|x| *x != id);
        self.demote_to_page();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.demote_to_page();
    }
}
