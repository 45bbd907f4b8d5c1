use contracts::system::auth::UserInfo;

use crate::shared::api_error::ApiError;
use crate::shared::list_api;

/// Current user for the stored token
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    list_api::get_json::<UserInfo>("/api/auth/me").await
}
