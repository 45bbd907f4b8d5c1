use crate::shared::api_error::ApiError;
use crate::shared::csv_check::{check_csv, CsvSchema};
use crate::shared::icons::icon;
use crate::shared::list_api;
use crate::shared::list_controller::ListEntity;
use crate::shared::toast::ToastService;
use contracts::shared::import::{CsvUploadResponse, DuplicateAction, RowError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Read, pre-check and upload the picked file. Nothing is sent when the check fails.
async fn check_and_upload<E: ListEntity>(
    file: web_sys::File,
    schema: &CsvSchema,
    duplicate_action: DuplicateAction,
) -> Result<CsvUploadResponse, Vec<String>> {
    let text = list_api::read_file_text(&file)
        .await
        .map_err(|e| vec![e.toast_message()])?;
    let summary = check_csv(&text, schema)
        .map_err(|errors| errors.iter().map(ToString::to_string).collect::<Vec<_>>())?;
    log::debug!(
        "{}: {} passed pre-check, {} data rows",
        E::TITLE,
        file.name(),
        summary.data_rows
    );
    list_api::upload_csv::<E>(&file, duplicate_action)
        .await
        .map_err(|e: ApiError| vec![e.toast_message()])
}

/// Upload widget for lists that accept CSV. Renders nothing without a schema.
pub fn csv_upload_view<E: ListEntity>(
    toasts: ToastService,
    can_upload: Signal<bool>,
    on_uploaded: Callback<()>,
) -> impl IntoView {
    let Some(schema) = E::csv_schema() else {
        return ().into_any();
    };

    let file_ref = NodeRef::<leptos::html::Input>::new();
    let duplicate_action = RwSignal::new(DuplicateAction::Skip);
    let uploading = RwSignal::new(false);
    let problems = RwSignal::new(Vec::<String>::new());
    let row_errors = RwSignal::new(Vec::<RowError>::new());

    let upload = move |_| {
        let Some(file) = file_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            toasts.error("Choose a CSV file first");
            return;
        };
        uploading.set(true);
        problems.set(Vec::new());
        row_errors.set(Vec::new());
        let action = duplicate_action.get_untracked();
        spawn_local(async move {
            match check_and_upload::<E>(file, schema, action).await {
                Ok(response) => {
                    toasts.success(response.summary());
                    row_errors.set(response.errors);
                    on_uploaded.run(());
                }
                Err(messages) => {
                    if let Some(first) = messages.first() {
                        toasts.error(first.clone());
                    }
                    problems.set(messages);
                }
            }
            uploading.set(false);
        });
    };

    view! {
        <div class="csv-upload">
            <input node_ref=file_ref type="file" accept=".csv,text/csv" class="csv-upload__file" />
            <select
                class="form__select"
                on:change=move |ev| duplicate_action.set(DuplicateAction::parse(&event_target_value(&ev)))
                prop:value=move || duplicate_action.get().as_str()
            >
                <option value="skip">"Skip duplicates"</option>
                <option value="replace">"Replace duplicates"</option>
            </select>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=upload
                disabled=Signal::derive(move || uploading.get() || !can_upload.get())
            >
                {icon("upload")}
                {move || if uploading.get() { " Uploading..." } else { " Upload CSV" }}
            </Button>
            <Show when=move || !problems.with(Vec::is_empty)>
                <ul class="csv-upload__problems">
                    {move || problems.get().into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                </ul>
            </Show>
            <Show when=move || !row_errors.with(Vec::is_empty)>
                <ul class="csv-upload__row-errors">
                    {move || {
                        row_errors
                            .get()
                            .into_iter()
                            .map(|e| view! { <li>{format!("Row {}: {}", e.row, e.message)}</li> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
    .into_any()
}
