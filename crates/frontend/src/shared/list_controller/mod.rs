//! Filtered list controller.
//!
//! Pure state machines behind every list screen: filter draft, URL query
//! sync, pagination, selection and the bulk-delete gate. Nothing here touches
//! the network or the DOM; the UI feeds responses in and reads decisions out.

pub mod bulk_gate;
pub mod controller;
pub mod entity;
pub mod filter_draft;
pub mod pagination;
pub mod query_sync;
pub mod selection;

pub use bulk_gate::{BulkActionGate, BulkDeletePlan, Confirmation, GateRefusal};
pub use controller::{FetchOutcome, ListController, ListQuery, SelectAllAction};
pub use entity::{BulkStrategy, ListEntity};
pub use filter_draft::{FieldKind, FilterDraft, ANY};
pub use pagination::PageState;
pub use query_sync::{DebounceTicket, Debouncer};
pub use selection::{SelectAllOutcome, SelectionTracker};
