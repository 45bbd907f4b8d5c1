use contracts::shared::list::ListMeta;

/// Paging state of one list. `page` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub loading: bool,
    /// Rows on the page last fetched
    pub item_count: usize,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            total_pages: 0,
            loading: false,
            item_count: 0,
        }
    }

    pub fn can_prev(&self) -> bool {
        !self.loading && self.page > 1
    }

    pub fn can_next(&self) -> bool {
        !self.loading && self.page < self.total_pages
    }

    /// Move to `page`, clamped to the known range. Returns `true` if it changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages.max(1));
        let changed = target != self.page;
        self.page = target;
        changed
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
        self.page = 1;
    }

    pub fn apply(&mut self, meta: ListMeta, item_count: usize) {
        self.total = meta.total;
        self.total_pages = meta.total_pages;
        self.item_count = item_count;
    }

    /// An empty page past the first one: step back instead of showing nothing.
    pub fn should_step_back(&self) -> bool {
        self.item_count == 0 && self.page > 1
    }

    /// One page earlier, or straight to the last page the server reported.
    pub fn step_back(&mut self) {
        self.page = self
            .page
            .saturating_sub(1)
            .min(self.total_pages.max(1))
            .max(1);
    }

    /// "21–40 of 57"
    pub fn range_label(&self) -> String {
        if self.total == 0 || self.item_count == 0 {
            return "0 of 0".to_string();
        }
        let start = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        let end = start + self.item_count as u64 - 1;
        format!("{}–{} of {}", start, end, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(page: u32, total: u64, total_pages: u32, items: usize) -> PageState {
        let mut state = PageState::new(20);
        state.page = page;
        state.apply(ListMeta { total, total_pages }, items);
        state
    }

    #[test]
    fn boundaries_disable_prev_and_next() {
        let first = loaded(1, 57, 3, 20);
        assert!(!first.can_prev());
        assert!(first.can_next());

        let last = loaded(3, 57, 3, 17);
        assert!(last.can_prev());
        assert!(!last.can_next());
    }

    #[test]
    fn in_flight_fetch_disables_both() {
        let mut middle = loaded(2, 57, 3, 20);
        middle.loading = true;
        assert!(!middle.can_prev());
        assert!(!middle.can_next());
    }

    #[test]
    fn go_to_clamps_to_known_pages() {
        let mut state = loaded(1, 57, 3, 20);
        assert!(state.go_to(9));
        assert_eq!(state.page, 3);
        assert!(!state.go_to(3));
        state.go_to(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_page_after_first_steps_back() {
        let mut state = loaded(3, 40, 2, 0);
        assert!(state.should_step_back());
        state.step_back();
        assert_eq!(state.page, 2);

        assert!(!loaded(1, 0, 0, 0).should_step_back());
    }

    #[test]
    fn page_far_past_the_end_jumps_to_last_page() {
        let mut state = loaded(500, 40, 2, 0);
        state.step_back();
        assert_eq!(state.page, 2);

        let mut emptied = loaded(7, 0, 0, 0);
        emptied.step_back();
        assert_eq!(emptied.page, 1);
    }

    #[test]
    fn range_label_counts_rows() {
        assert_eq!(loaded(2, 57, 3, 20).range_label(), "21–40 of 57");
        assert_eq!(loaded(1, 0, 0, 0).range_label(), "0 of 0");
    }
}
