//! Confirmation-gated bulk delete.

use super::entity::BulkStrategy;
use super::selection::{is_valid_id, SelectionTracker};
use contracts::shared::filters::TeaFilters;
use contracts::system::auth::UserInfo;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum BulkDeletePlan {
    ByIds(Vec<i64>),
    ByFilter(TeaFilters),
    /// One row deleted from its own action button
    Row(i64),
}

/// What the confirmation dialog shows and what runs on confirm
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub count: u64,
    pub plan: BulkDeletePlan,
}

impl Confirmation {
    pub fn message(&self) -> String {
        let noun = if self.count == 1 { "record" } else { "records" };
        match self.plan {
            BulkDeletePlan::ByIds(_) => {
                format!("Delete {} selected {}? This cannot be undone.", self.count, noun)
            }
            BulkDeletePlan::ByFilter(_) => format!(
                "Delete all {} {} matching the current filters? This cannot be undone.",
                self.count, noun
            ),
            BulkDeletePlan::Row(id) => format!("Delete record #{}? This cannot be undone.", id),
        }
    }
}

/// Why a bulk delete was refused before any request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRefusal {
    #[error("A bulk operation is already running")]
    Busy,
    #[error("Nothing is selected")]
    NothingSelected,
    #[error("You are not signed in")]
    Unauthenticated,
    #[error("Only admins can delete records")]
    Forbidden,
    #[error("Still collecting the matching records, try again in a moment")]
    SelectionNotReady,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkActionGate {
    /// Plan sent to the server and not answered yet
    running: Option<BulkDeletePlan>,
    pending: Option<Confirmation>,
}

impl BulkActionGate {
    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    pub fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    /// Check preconditions and stage a confirmation.
    pub fn request(
        &mut self,
        selection: &SelectionTracker,
        user: Option<&UserInfo>,
        strategy: BulkStrategy,
        filters: &TeaFilters,
        total: u64,
    ) -> Result<Confirmation, GateRefusal> {
        if self.is_busy() {
            return Err(GateRefusal::Busy);
        }
        if !selection.has_selection() {
            return Err(GateRefusal::NothingSelected);
        }
        admin_only(user)?;

        let confirmation = match (selection.is_across_pages(), strategy) {
            (true, BulkStrategy::ServerFilter) => Confirmation {
                count: total,
                plan: BulkDeletePlan::ByFilter(filters.clone()),
            },
            (true, BulkStrategy::MaterializeIds) => {
                let ids = selection
                    .materialized()
                    .ok_or(GateRefusal::SelectionNotReady)?
                    .to_vec();
                Confirmation {
                    count: ids.len() as u64,
                    plan: BulkDeletePlan::ByIds(ids),
                }
            }
            _ => Confirmation {
                count: selection.len() as u64,
                plan: BulkDeletePlan::ByIds(selection.ids().to_vec()),
            },
        };

        self.pending = Some(confirmation.clone());
        Ok(confirmation)
    }

    /// Stage the delete of a single row, independent of the selection.
    pub fn request_row(
        &mut self,
        id: i64,
        user: Option<&UserInfo>,
    ) -> Result<Confirmation, GateRefusal> {
        if self.is_busy() {
            return Err(GateRefusal::Busy);
        }
        if !is_valid_id(id) {
            return Err(GateRefusal::NothingSelected);
        }
        admin_only(user)?;

        let confirmation = Confirmation {
            count: 1,
            plan: BulkDeletePlan::Row(id),
        };
        self.pending = Some(confirmation.clone());
        Ok(confirmation)
    }

    /// User confirmed: hand out the plan and become busy.
    pub fn confirm(&mut self) -> Option<BulkDeletePlan> {
        if self.is_busy() {
            return None;
        }
        let confirmation = self.pending.take()?;
        self.running = Some(confirmation.plan.clone());
        Some(confirmation.plan)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Release the gate, returning the plan that was running.
    pub fn finish(&mut self) -> Option<BulkDeletePlan> {
        self.running.take()
    }
}

fn admin_only(user: Option<&UserInfo>) -> Result<(), GateRefusal> {
    let user = user.ok_or(GateRefusal::Unauthenticated)?;
    if !user.is_admin() {
        return Err(GateRefusal::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::Role;

    fn admin() -> UserInfo {
        UserInfo {
            id: 1,
            username: "admin".into(),
            email: None,
            role: Role::Admin,
        }
    }

    fn selected(ids: &[i64]) -> SelectionTracker {
        let mut s = SelectionTracker::new();
        for id in ids {
            s.toggle(*id);
        }
        s
    }

    #[test]
    fn refuses_without_selection_or_user() {
        let mut gate = BulkActionGate::default();
        let filters = TeaFilters::default();
        let strategy = BulkStrategy::ServerFilter;
        assert_eq!(
            gate.request(&SelectionTracker::new(), Some(&admin()), strategy, &filters, 0),
            Err(GateRefusal::NothingSelected)
        );
        assert_eq!(
            gate.request(&selected(&[3]), None, strategy, &filters, 0),
            Err(GateRefusal::Unauthenticated)
        );
        let user = UserInfo {
            role: Role::User,
            ..admin()
        };
        assert_eq!(
            gate.request(&selected(&[3]), Some(&user), strategy, &filters, 0),
            Err(GateRefusal::Forbidden)
        );
    }

    #[test]
    fn page_selection_deletes_by_ids() {
        let mut gate = BulkActionGate::default();
        let filters = TeaFilters::default();
        let conf = gate
            .request(&selected(&[3, 8]), Some(&admin()), BulkStrategy::ServerFilter, &filters, 120)
            .unwrap();
        assert_eq!(conf.count, 2);
        assert_eq!(conf.plan, BulkDeletePlan::ByIds(vec![3, 8]));
        assert_eq!(conf.message(), "Delete 2 selected records? This cannot be undone.");
    }

    #[test]
    fn across_pages_uses_server_total() {
        let mut selection = SelectionTracker::new();
        selection.select_all(&[1, 2, 3], true);
        let mut gate = BulkActionGate::default();
        let filters = TeaFilters::default();
        let conf = gate
            .request(&selection, Some(&admin()), BulkStrategy::ServerFilter, &filters, 340)
            .unwrap();
        assert_eq!(conf.count, 340);
        assert!(matches!(conf.plan, BulkDeletePlan::ByFilter(_)));
    }

    #[test]
    fn materialized_ids_required_before_confirming() {
        let mut selection = SelectionTracker::new();
        selection.select_all(&[1, 2], true);
        let mut gate = BulkActionGate::default();
        let filters = TeaFilters::default();
        assert_eq!(
            gate.request(&selection, Some(&admin()), BulkStrategy::MaterializeIds, &filters, 4),
            Err(GateRefusal::SelectionNotReady)
        );
        selection.set_materialized(vec![1, 2, 3, 4]);
        let conf = gate
            .request(&selection, Some(&admin()), BulkStrategy::MaterializeIds, &filters, 4)
            .unwrap();
        assert_eq!(conf.plan, BulkDeletePlan::ByIds(vec![1, 2, 3, 4]));
    }

    #[test]
    fn only_one_delete_in_flight() {
        let mut gate = BulkActionGate::default();
        let selection = selected(&[5]);
        let filters = TeaFilters::default();
        gate.request(&selection, Some(&admin()), BulkStrategy::PageOnly, &filters, 1)
            .unwrap();
        assert!(gate.confirm().is_some());
        assert!(gate.is_busy());
        assert_eq!(
            gate.request(&selection, Some(&admin()), BulkStrategy::PageOnly, &filters, 1),
            Err(GateRefusal::Busy)
        );
        assert_eq!(gate.request_row(5, Some(&admin())), Err(GateRefusal::Busy));
        assert!(gate.confirm().is_none());
        assert_eq!(gate.finish(), Some(BulkDeletePlan::ByIds(vec![5])));
        assert!(!gate.is_busy());
    }

    #[test]
    fn cancel_drops_pending_confirmation() {
        let mut gate = BulkActionGate::default();
        let filters = TeaFilters::default();
        gate.request(&selected(&[5]), Some(&admin()), BulkStrategy::PageOnly, &filters, 1)
            .unwrap();
        gate.cancel();
        assert!(gate.pending().is_none());
        assert!(gate.confirm().is_none());
    }

    #[test]
    fn row_delete_needs_admin_but_no_selection() {
        let mut gate = BulkActionGate::default();
        let user = UserInfo {
            role: Role::User,
            ..admin()
        };
        assert_eq!(gate.request_row(9, Some(&user)), Err(GateRefusal::Forbidden));
        assert_eq!(gate.request_row(9, None), Err(GateRefusal::Unauthenticated));
        assert_eq!(gate.request_row(0, Some(&admin())), Err(GateRefusal::NothingSelected));

        let conf = gate.request_row(9, Some(&admin())).unwrap();
        assert_eq!(conf.count, 1);
        assert_eq!(conf.message(), "Delete record #9? This cannot be undone.");
        assert_eq!(gate.confirm(), Some(BulkDeletePlan::Row(9)));
        assert!(gate.is_busy());
    }
}
