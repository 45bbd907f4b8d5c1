use contracts::domain::a102_stock::dto::{AssignStockRequest, AssignStockResponse};
use contracts::system::users::UserDto;

use crate::shared::api_error::ApiError;
use crate::shared::list_api::{get_json, post_json};

/// Users an admin can assign stock to
pub async fn fetch_users() -> Result<Vec<UserDto>, ApiError> {
    get_json("/api/users").await
}

/// Assign the given stock ids (or a weight of each) to a user
pub async fn assign_stock(request: &AssignStockRequest) -> Result<AssignStockResponse, ApiError> {
    post_json("/api/stock/assign", request, None).await
}
