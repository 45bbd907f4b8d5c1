use contracts::shared::dashboard::DashboardSummary;

use crate::shared::api_error::ApiError;
use crate::shared::list_api::get_json;

/// Dashboard summary; the server fills it according to the caller's role
pub async fn get_summary() -> Result<DashboardSummary, ApiError> {
    get_json("/api/dashboard").await
}
