//! HTTP calls behind the list screens.
//!
//! Every call carries the stored bearer token and turns failures into
//! [`ApiError`]. Bulk deletes run under an abort timer.

use contracts::shared::export::{ExportRequest, ExportResponse};
use contracts::shared::import::{CsvUploadResponse, DuplicateAction};
use contracts::shared::list::{
    DeleteByFilterRequest, DeleteByIdsRequest, DeleteResponse, ListResponse,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{AbortController, AbortSignal, File, FormData};

use super::api_error::ApiError;
use super::api_utils::{api_url, with_query};
use super::list_controller::{BulkDeletePlan, ListEntity, ListQuery};
use crate::system::auth::storage;

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::bearer() {
        Some(header) => builder.header("Authorization", &header),
        None => builder,
    }
}

fn js_failure(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", err))
}

/// Decode a successful body, or classify the failure by status.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{} -> {}", response.url(), status);
        return Err(match status {
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden,
            _ => ApiError::from_status(status, &body),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&api_url(path))).send().await?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    signal: Option<&AbortSignal>,
) -> Result<T, ApiError> {
    let response = authorized(Request::post(&api_url(path)))
        .abort_signal(signal)
        .json(body)?
        .send()
        .await?;
    read_json(response).await
}

/// Aborts the attached request once `ms` elapse. Dropping it disarms the timer.
pub struct AbortTimer {
    controller: AbortController,
    _timer: Timeout,
}

impl AbortTimer {
    pub fn start(ms: u32) -> Result<Self, ApiError> {
        let controller = AbortController::new().map_err(js_failure)?;
        let handle = controller.clone();
        let timer = Timeout::new(ms, move || handle.abort());
        Ok(Self {
            controller,
            _timer: timer,
        })
    }

    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }
}

/// One page of `E`
pub async fn fetch_list<E: ListEntity>(query: &ListQuery) -> Result<ListResponse<E>, ApiError> {
    get_json(&with_query(E::API_PATH, &query.to_query_string())).await
}

/// Run a confirmed bulk delete under the abort timeout.
pub async fn bulk_delete<E: ListEntity>(
    plan: BulkDeletePlan,
    timeout_ms: u32,
) -> Result<DeleteResponse, ApiError> {
    let timer = AbortTimer::start(timeout_ms)?;
    let signal = timer.signal();
    let result = match plan {
        BulkDeletePlan::Row(id) => {
            post_json(
                &format!("{}/delete", E::API_PATH),
                &DeleteByIdsRequest { ids: vec![id] },
                Some(&signal),
            )
            .await
        }
        BulkDeletePlan::ByIds(ids) => {
            post_json(
                &format!("{}/delete", E::API_PATH),
                &DeleteByIdsRequest { ids },
                Some(&signal),
            )
            .await
        }
        BulkDeletePlan::ByFilter(filters) => {
            post_json(
                &format!("{}/delete-all", E::API_PATH),
                &DeleteByFilterRequest {
                    filters,
                    confirm: true,
                },
                Some(&signal),
            )
            .await
        }
    };
    drop(timer);
    result
}

/// Multipart upload of a pre-validated CSV file
pub async fn upload_csv<E: ListEntity>(
    file: &File,
    duplicate_action: DuplicateAction,
) -> Result<CsvUploadResponse, ApiError> {
    let form = FormData::new().map_err(js_failure)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_failure)?;
    form.append_with_str("duplicateAction", duplicate_action.as_str())
        .map_err(js_failure)?;

    let response = authorized(Request::post(&api_url(&format!("{}/upload", E::API_PATH))))
        .body(form)?
        .send()
        .await?;
    read_json(response).await
}

pub async fn export<E: ListEntity>(request: &ExportRequest) -> Result<ExportResponse, ApiError> {
    post_json(&format!("{}/export", E::API_PATH), request, None).await
}

/// Text content of a picked file
pub async fn read_file_text(file: &File) -> Result<String, ApiError> {
    let value = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(js_failure)?;
    value
        .as_string()
        .ok_or_else(|| ApiError::Validation("The file is not text".to_string()))
}
