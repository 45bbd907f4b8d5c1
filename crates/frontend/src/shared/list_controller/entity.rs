use crate::shared::csv_check::CsvSchema;
use contracts::shared::filters::FilterField;
use serde::{de::DeserializeOwned, Serialize};

/// How "select all across pages" is carried out for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStrategy {
    /// Only rows of the current page can be selected
    PageOnly,
    /// Bulk delete goes to the delete-all-by-filter endpoint
    ServerFilter,
    /// A second fetch with a large limit collects every matching id
    MaterializeIds,
}

impl BulkStrategy {
    pub fn supports_across_pages(&self) -> bool {
        !matches!(self, BulkStrategy::PageOnly)
    }
}

/// A record type shown by the generic list screen.
pub trait ListEntity:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection endpoint, e.g. `/api/catalog`
    const API_PATH: &'static str;
    const TITLE: &'static str;
    /// Filter fields this list understands
    const FILTER_FIELDS: &'static [FilterField];
    const BULK_STRATEGY: BulkStrategy;

    fn id(&self) -> i64;

    fn columns() -> &'static [&'static str];

    /// Display values, one per column
    fn cells(&self) -> Vec<String>;

    /// Schema for CSV upload; `None` hides the upload widget
    fn csv_schema() -> Option<&'static CsvSchema> {
        None
    }
}
