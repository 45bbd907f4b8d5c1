//! One controller per list screen, generic over the entity.
//!
//! Every network call is split into `begin_*` (decides whether to send and
//! what) and `finish_*` (folds the response back in). Requests are numbered so
//! that a late answer to an outdated query never overwrites a newer one.

use super::bulk_gate::{BulkActionGate, BulkDeletePlan, Confirmation, GateRefusal};
use super::entity::{BulkStrategy, ListEntity};
use super::filter_draft::FilterDraft;
use super::pagination::PageState;
use super::query_sync::{self, LIMIT_KEY, PAGE_KEY};
use super::selection::{SelectAllOutcome, SelectionTracker};
use crate::shared::api_error::ApiError;
use crate::shared::config::ListConfig;
use contracts::shared::export::{ExportFormat, ExportRequest};
use contracts::shared::filters::{FilterField, TeaFilters};
use contracts::shared::list::{DeleteResponse, ListResponse};
use contracts::system::auth::UserInfo;
use std::collections::BTreeMap;

/// Parameters of one list request
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filters: TeaFilters,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    pub fn to_query_string(&self) -> String {
        query_sync::to_query_string(&self.filters, self.page, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied,
    /// Answer to an outdated request, dropped
    Stale,
    /// Page came back empty past page 1; fetch again one page earlier
    StepBack,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectAllAction {
    Done(SelectAllOutcome),
    /// Across-pages selection needs every matching id: run this query
    Materialize(u64, ListQuery),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListController<E: ListEntity> {
    config: ListConfig,
    items: Vec<E>,
    pub draft: FilterDraft,
    filters: TeaFilters,
    pub page: PageState,
    pub selection: SelectionTracker,
    pub gate: BulkActionGate,
    fetch_seq: u64,
    materialize_seq: u64,
}

impl<E: ListEntity> Default for ListController<E> {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl<E: ListEntity> ListController<E> {
    pub fn new(config: ListConfig) -> Self {
        let page = PageState::new(config.default_page_size);
        Self {
            config,
            items: Vec::new(),
            draft: FilterDraft::new(E::FILTER_FIELDS),
            filters: TeaFilters::default(),
            page,
            selection: SelectionTracker::new(),
            gate: BulkActionGate::default(),
            fetch_seq: 0,
            materialize_seq: 0,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Committed filters
    pub fn filters(&self) -> &TeaFilters {
        &self.filters
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            filters: self.filters.restrict(E::FILTER_FIELDS),
            page: self.page.page,
            limit: self.page.limit,
        }
    }

    /// Query string the address bar should show
    pub fn url_query(&self) -> String {
        self.query().to_query_string()
    }

    /// Take filters and paging from `location.search`.
    ///
    /// Values go through the filter draft, so the address bar cannot commit
    /// anything the form would refuse. Returns the keys that were ignored.
    pub fn restore_from_query(&mut self, search: &str) -> Vec<String> {
        let parsed = query_sync::parse_query(search);
        let mut rejected = parsed.malformed;
        let mut draft = FilterDraft::new(E::FILTER_FIELDS);

        for (key, value) in parsed.params {
            if key == PAGE_KEY {
                match value.parse::<u32>() {
                    Ok(page) if page >= 1 => self.page.page = page,
                    _ => rejected.push(key),
                }
                continue;
            }
            if key == LIMIT_KEY {
                match value.parse::<u32>() {
                    Ok(limit) if self.config.is_allowed_page_size(limit) => self.page.limit = limit,
                    _ => rejected.push(key),
                }
                continue;
            }
            match FilterField::from_key(&key) {
                Some(field) if draft.set(field, &value) => {}
                _ => rejected.push(key),
            }
        }

        let invalid: Vec<FilterField> = draft.errors().keys().copied().collect();
        for field in invalid {
            rejected.push(field.key().to_string());
            draft.set(field, "");
        }

        self.filters = draft.to_filters().unwrap_or_default();
        self.draft = draft;
        rejected.sort();
        rejected
    }

    /// Start a page fetch. Nothing is sent until the user is known.
    pub fn begin_fetch(&mut self, user: Option<&UserInfo>) -> Option<(u64, ListQuery)> {
        if user.is_none() {
            log::debug!("{}: user not resolved, fetch skipped", E::TITLE);
            return None;
        }
        self.fetch_seq += 1;
        self.page.loading = true;
        Some((self.fetch_seq, self.query()))
    }

    pub fn finish_fetch(
        &mut self,
        seq: u64,
        result: Result<ListResponse<E>, ApiError>,
    ) -> FetchOutcome {
        if seq != self.fetch_seq {
            return FetchOutcome::Stale;
        }
        self.page.loading = false;
        match result {
            Ok(response) => {
                self.page.apply(response.meta, response.data.len());
                self.items = response.data;
                if self.page.should_step_back() {
                    self.page.step_back();
                    FetchOutcome::StepBack
                } else {
                    FetchOutcome::Applied
                }
            }
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Commit the draft: back to page 1, selection dropped.
    pub fn apply_draft(&mut self) -> Result<(), BTreeMap<FilterField, String>> {
        self.filters = self.draft.to_filters()?;
        self.page.page = 1;
        self.selection.clear();
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.draft.clear();
        self.filters = TeaFilters::default();
        self.page.page = 1;
        self.selection.clear();
    }

    pub fn go_to_page(&mut self, page: u32) -> bool {
        self.page.go_to(page)
    }

    pub fn set_page_size(&mut self, limit: u32) -> bool {
        if !self.config.is_allowed_page_size(limit) || limit == self.page.limit {
            return false;
        }
        self.page.set_limit(limit);
        true
    }

    pub fn page_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id()).collect()
    }

    pub fn toggle(&mut self, id: i64) {
        self.selection.toggle(id);
    }

    pub fn all_on_page_selected(&self) -> bool {
        self.selection.all_on_page_selected(&self.page_ids())
    }

    pub fn select_all(&mut self) -> SelectAllAction {
        let outcome = self
            .selection
            .select_all(&self.page_ids(), E::BULK_STRATEGY.supports_across_pages());
        let materialize = E::BULK_STRATEGY == BulkStrategy::MaterializeIds;
        if outcome == SelectAllOutcome::AcrossPages && materialize {
            self.materialize_seq += 1;
            let query = ListQuery {
                filters: self.filters.restrict(E::FILTER_FIELDS),
                page: 1,
                limit: self.config.select_all_limit,
            };
            return SelectAllAction::Materialize(self.materialize_seq, query);
        }
        SelectAllAction::Done(outcome)
    }

    /// Store the collected ids. `Ok(false)` when the answer no longer applies.
    pub fn finish_materialize(
        &mut self,
        seq: u64,
        result: Result<ListResponse<E>, ApiError>,
    ) -> Result<bool, ApiError> {
        if seq != self.materialize_seq {
            return Ok(false);
        }
        match result {
            Ok(response) => {
                if response.meta.total > response.data.len() as u64 {
                    log::warn!(
                        "{}: {} of {} matching ids collected",
                        E::TITLE,
                        response.data.len(),
                        response.meta.total
                    );
                }
                let ids = response.data.iter().map(|item| item.id()).collect();
                Ok(self.selection.set_materialized(ids))
            }
            Err(e) => {
                self.selection.demote_to_page();
                Err(e)
            }
        }
    }

    pub fn request_bulk_delete(
        &mut self,
        user: Option<&UserInfo>,
    ) -> Result<Confirmation, GateRefusal> {
        let filters = self.filters.restrict(E::FILTER_FIELDS);
        self.gate.request(
            &self.selection,
            user,
            E::BULK_STRATEGY,
            &filters,
            self.page.total,
        )
    }

    pub fn cancel_bulk_delete(&mut self) {
        self.gate.cancel();
    }

    pub fn confirm_bulk_delete(&mut self) -> Option<BulkDeletePlan> {
        self.gate.confirm()
    }

    /// Stage the delete of one row from its action button.
    pub fn request_row_delete(
        &mut self,
        id: i64,
        user: Option<&UserInfo>,
    ) -> Result<Confirmation, GateRefusal> {
        self.gate.request_row(id, user)
    }

    /// Release the gate. On success the deleted ids leave the selection and
    /// the caller refetches.
    pub fn finish_bulk_delete(
        &mut self,
        result: Result<DeleteResponse, ApiError>,
    ) -> Result<u64, ApiError> {
        let plan = self.gate.finish();
        let response = result?;
        match plan {
            Some(BulkDeletePlan::Row(id)) => self.item_deleted(id),
            _ => self.selection.clear(),
        }
        Ok(response.deleted_count)
    }

    /// A single row was deleted outside the bulk flow
    pub fn item_deleted(&mut self, id: i64) {
        self.selection.remove(id);
    }

    /// Size of the selection a bulk action would hit
    pub fn selected_count(&self) -> usize {
        self.selection
            .materialized()
            .map_or(self.selection.len(), <[i64]>::len)
    }

    /// Server export of the selected ids, or of the whole filter result.
    pub fn export_request(&self, format: ExportFormat) -> ExportRequest {
        if self.selection.is_across_pages() || self.selection.is_empty() {
            ExportRequest::by_filter(self.filters.restrict(E::FILTER_FIELDS), format)
        } else {
            ExportRequest::by_ids(self.selection.ids().to_vec(), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::Grade;
    use contracts::shared::list::ListMeta;
    use contracts::system::auth::Role;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Lot {
        id: i64,
    }

    impl ListEntity for Lot {
        const API_PATH: &'static str = "/api/lots";
        const TITLE: &'static str = "Lots";
        const FILTER_FIELDS: &'static [FilterField] =
            &[FilterField::Grade, FilterField::MinWeight, FilterField::MaxWeight];
        const BULK_STRATEGY: BulkStrategy = BulkStrategy::ServerFilter;

        fn id(&self) -> i64 {
            self.id
        }

        fn columns() -> &'static [&'static str] {
            &["ID"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string()]
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Priced {
        id: i64,
    }

    impl ListEntity for Priced {
        const API_PATH: &'static str = "/api/priced";
        const TITLE: &'static str = "Priced";
        const FILTER_FIELDS: &'static [FilterField] = &[FilterField::Grade];
        const BULK_STRATEGY: BulkStrategy = BulkStrategy::MaterializeIds;

        fn id(&self) -> i64 {
            self.id
        }

        fn columns() -> &'static [&'static str] {
            &["ID"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string()]
        }
    }

    fn admin() -> UserInfo {
        UserInfo {
            id: 1,
            username: "admin".into(),
            email: None,
            role: Role::Admin,
        }
    }

    fn page_of<T>(data: Vec<T>, total: u64, total_pages: u32) -> ListResponse<T> {
        ListResponse {
            data,
            meta: ListMeta { total, total_pages },
        }
    }

    fn lots(ids: &[i64]) -> Vec<Lot> {
        ids.iter().map(|id| Lot { id: *id }).collect()
    }

    fn loaded(ids: &[i64], page: u32, total: u64, total_pages: u32) -> ListController<Lot> {
        let mut ctrl = ListController::<Lot>::default();
        ctrl.page.page = page;
        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        ctrl.finish_fetch(seq, Ok(page_of(lots(ids), total, total_pages)));
        ctrl
    }

    #[test]
    fn fetch_waits_for_user() {
        let mut ctrl = ListController::<Lot>::default();
        assert!(ctrl.begin_fetch(None).is_none());
        assert!(!ctrl.page.loading);

        let (_, query) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert!(ctrl.page.loading);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 25);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut ctrl = ListController::<Lot>::default();
        let (old, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        let (new, _) = ctrl.begin_fetch(Some(&admin())).unwrap();

        assert_eq!(
            ctrl.finish_fetch(new, Ok(page_of(lots(&[1, 2]), 2, 1))),
            FetchOutcome::Applied
        );
        assert_eq!(
            ctrl.finish_fetch(old, Ok(page_of(lots(&[9]), 1, 1))),
            FetchOutcome::Stale
        );
        assert_eq!(ctrl.page_ids(), vec![1, 2]);
    }

    #[test]
    fn failed_fetch_keeps_previous_rows() {
        let mut ctrl = loaded(&[1, 2], 1, 2, 1);
        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        let outcome = ctrl.finish_fetch(seq, Err(ApiError::Network("offline".into())));
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!ctrl.page.loading);
        assert_eq!(ctrl.page_ids(), vec![1, 2]);
    }

    #[test]
    fn successful_bulk_delete_clears_selection() {
        let mut ctrl = loaded(&[1, 2, 3], 1, 60, 3);
        ctrl.select_all();
        assert!(ctrl.selection.is_across_pages());

        let confirmation = ctrl.request_bulk_delete(Some(&admin())).unwrap();
        assert_eq!(confirmation.count, 60);
        assert!(matches!(
            ctrl.confirm_bulk_delete(),
            Some(BulkDeletePlan::ByFilter(_))
        ));
        assert!(ctrl.gate.is_busy());

        let deleted = ctrl.finish_bulk_delete(Ok(DeleteResponse { deleted_count: 60 }));
        assert_eq!(deleted, Ok(60));
        assert!(ctrl.selection.is_empty());
        assert!(!ctrl.selection.is_across_pages());
        assert!(!ctrl.gate.is_busy());
    }

    #[test]
    fn failed_bulk_delete_keeps_selection() {
        let mut ctrl = loaded(&[1, 2, 3], 1, 3, 1);
        ctrl.toggle(2);
        ctrl.request_bulk_delete(Some(&admin())).unwrap();
        ctrl.confirm_bulk_delete();
        let result = ctrl.finish_bulk_delete(Err(ApiError::Timeout));
        assert_eq!(result, Err(ApiError::Timeout));
        assert_eq!(ctrl.selection.ids(), &[2]);
        assert!(!ctrl.gate.is_busy());
    }

    #[test]
    fn row_delete_keeps_the_rest_of_the_selection() {
        let mut ctrl = loaded(&[1, 2, 3], 1, 60, 3);
        ctrl.select_all();
        assert!(ctrl.selection.is_across_pages());

        let confirmation = ctrl.request_row_delete(2, Some(&admin())).unwrap();
        assert_eq!(confirmation.plan, BulkDeletePlan::Row(2));
        assert_eq!(ctrl.confirm_bulk_delete(), Some(BulkDeletePlan::Row(2)));

        let deleted = ctrl.finish_bulk_delete(Ok(DeleteResponse { deleted_count: 1 }));
        assert_eq!(deleted, Ok(1));
        assert_eq!(ctrl.selection.ids(), &[1, 3]);
        assert!(!ctrl.selection.is_across_pages());
        assert!(!ctrl.gate.is_busy());
    }

    #[test]
    fn failed_row_delete_leaves_selection_alone() {
        let mut ctrl = loaded(&[1, 2], 1, 2, 1);
        ctrl.toggle(2);
        ctrl.request_row_delete(2, Some(&admin())).unwrap();
        ctrl.confirm_bulk_delete();
        assert!(ctrl.finish_bulk_delete(Err(ApiError::Timeout)).is_err());
        assert_eq!(ctrl.selection.ids(), &[2]);
    }

    #[test]
    fn empty_page_after_delete_steps_back() {
        let mut ctrl = loaded(&[41, 42], 3, 42, 3);
        ctrl.toggle(41);
        ctrl.toggle(42);
        ctrl.request_bulk_delete(Some(&admin())).unwrap();
        ctrl.confirm_bulk_delete();
        ctrl.finish_bulk_delete(Ok(DeleteResponse { deleted_count: 2 }))
            .unwrap();

        let (seq, query) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(
            ctrl.finish_fetch(seq, Ok(page_of(Vec::new(), 40, 2))),
            FetchOutcome::StepBack
        );
        assert_eq!(ctrl.page.page, 2);

        let (seq, query) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(
            ctrl.finish_fetch(seq, Ok(page_of(lots(&[21, 22]), 40, 2))),
            FetchOutcome::Applied
        );
    }

    #[test]
    fn empty_first_page_stays() {
        let mut ctrl = ListController::<Lot>::default();
        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert_eq!(
            ctrl.finish_fetch(seq, Ok(page_of(Vec::new(), 0, 0))),
            FetchOutcome::Applied
        );
        assert_eq!(ctrl.page.page, 1);
    }

    #[test]
    fn applying_draft_resets_page_and_selection() {
        let mut ctrl = loaded(&[1, 2], 2, 30, 3);
        ctrl.toggle(1);
        ctrl.draft.set(FilterField::Grade, "bop");
        ctrl.apply_draft().unwrap();
        assert_eq!(ctrl.page.page, 1);
        assert!(ctrl.selection.is_empty());
        assert_eq!(ctrl.filters().grade, Some(Grade::Bop));
    }

    #[test]
    fn invalid_draft_is_not_applied() {
        let mut ctrl = ListController::<Lot>::default();
        ctrl.draft.set(FilterField::MinWeight, "heavy");
        assert!(ctrl.apply_draft().is_err());
        assert!(ctrl.filters().is_empty());
    }

    #[test]
    fn restores_from_address_bar() {
        let mut ctrl = ListController::<Lot>::default();
        let rejected =
            ctrl.restore_from_query("?grade=FBOP&minWeight=abc&lotNo=7&page=4&limit=50&foo=1");
        assert_eq!(rejected, vec!["foo", "lotNo", "minWeight"]);
        assert_eq!(ctrl.filters().grade, Some(Grade::Fbop));
        assert_eq!(ctrl.filters().min_weight, None);
        assert_eq!(ctrl.page.page, 4);
        assert_eq!(ctrl.page.limit, 50);
        assert_eq!(ctrl.draft.value(FilterField::Grade), "FBOP");
        assert!(ctrl.draft.can_apply());
    }

    #[test]
    fn nested_parameter_keeps_other_filters() {
        let mut ctrl = ListController::<Lot>::default();
        let rejected = ctrl.restore_from_query("?grade=BOP&minWeight=9&x[a]=1");
        assert_eq!(rejected, vec!["x[a]"]);
        assert_eq!(ctrl.filters().grade, Some(Grade::Bop));
        assert_eq!(ctrl.filters().min_weight, Some(9.0));
    }

    #[test]
    fn deep_link_past_the_end_needs_one_extra_fetch() {
        let mut ctrl = ListController::<Lot>::default();
        assert!(ctrl.restore_from_query("?page=500").is_empty());

        let (seq, query) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert_eq!(query.page, 500);
        assert_eq!(
            ctrl.finish_fetch(seq, Ok(page_of(Vec::new(), 40, 2))),
            FetchOutcome::StepBack
        );
        assert_eq!(ctrl.page.page, 2);

        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        assert_eq!(
            ctrl.finish_fetch(seq, Ok(page_of(lots(&[21, 22]), 40, 2))),
            FetchOutcome::Applied
        );
    }

    #[test]
    fn url_query_round_trips() {
        let mut ctrl = ListController::<Lot>::default();
        ctrl.draft.set(FilterField::MaxWeight, "80");
        ctrl.apply_draft().unwrap();
        let url = ctrl.url_query();
        assert_eq!(url, "limit=25&maxWeight=80&page=1");

        let mut restored = ListController::<Lot>::default();
        assert!(restored.restore_from_query(&url).is_empty());
        assert_eq!(restored.query(), ctrl.query());
    }

    #[test]
    fn page_size_must_be_offered() {
        let mut ctrl = loaded(&[1], 3, 100, 4);
        assert!(!ctrl.set_page_size(33));
        assert!(ctrl.set_page_size(100));
        assert_eq!(ctrl.page.page, 1);
        assert_eq!(ctrl.page.limit, 100);
    }

    #[test]
    fn materialize_strategy_requests_every_id() {
        let mut ctrl = ListController::<Priced>::default();
        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        ctrl.finish_fetch(
            seq,
            Ok(page_of(vec![Priced { id: 1 }, Priced { id: 2 }], 4, 2)),
        );

        let SelectAllAction::Materialize(seq, query) = ctrl.select_all() else {
            panic!("expected a materialize query");
        };
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10_000);

        let all = (1..=4).map(|id| Priced { id }).collect();
        assert_eq!(ctrl.finish_materialize(seq, Ok(page_of(all, 4, 1))), Ok(true));
        assert_eq!(ctrl.selection.len(), 2);
        assert_eq!(ctrl.selected_count(), 4);
        let confirmation = ctrl.request_bulk_delete(Some(&admin())).unwrap();
        assert_eq!(confirmation.count, 4);
        assert_eq!(confirmation.plan, BulkDeletePlan::ByIds(vec![1, 2, 3, 4]));
    }

    #[test]
    fn materialize_failure_demotes_selection() {
        let mut ctrl = ListController::<Priced>::default();
        let (seq, _) = ctrl.begin_fetch(Some(&admin())).unwrap();
        ctrl.finish_fetch(seq, Ok(page_of(vec![Priced { id: 1 }], 3, 3)));
        let SelectAllAction::Materialize(seq, _) = ctrl.select_all() else {
            panic!("expected a materialize query");
        };
        assert!(ctrl.finish_materialize(seq, Err(ApiError::Timeout)).is_err());
        assert!(!ctrl.selection.is_across_pages());
        assert_eq!(ctrl.selection.ids(), &[1]);
    }

    #[test]
    fn export_uses_ids_or_filters() {
        let mut ctrl = loaded(&[1, 2], 1, 2, 1);
        assert!(ctrl.export_request(ExportFormat::Csv).filters.is_some());
        ctrl.toggle(2);
        let req = ctrl.export_request(ExportFormat::Xlsx);
        assert_eq!(req.ids, Some(vec![2]));
    }
}
