//! Generic list screen.
//!
//! Wires a [`ListController`] to the network, the URL and the shared widgets.
//! Domain modules only describe their entity and call [`entity_list_page`].

use contracts::shared::export::{ExportFormat, ExportResponse};
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsValue;

use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::csv_upload::csv_upload_view;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table_checkbox::{
    HeaderCheckState, TableCheckbox, TableHeaderCheckbox,
};
use crate::shared::config::ListConfig;
use crate::shared::export;
use crate::shared::icons::icon;
use crate::shared::list_api;
use crate::shared::list_controller::query_sync::search_for;
use crate::shared::list_controller::{
    BulkStrategy, Confirmation, Debouncer, FetchOutcome, ListController, ListEntity,
    SelectAllAction,
};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::toast::{use_toasts, ToastService};
use crate::system::auth::context::{use_auth, AuthState};

/// Handle given to entity-specific toolbar actions
pub struct ListHandle<E: ListEntity> {
    pub ctrl: RwSignal<ListController<E>>,
    auth: ReadSignal<AuthState>,
    pub toasts: ToastService,
}

impl<E: ListEntity> Clone for ListHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ListEntity> Copy for ListHandle<E> {}

impl<E: ListEntity> ListHandle<E> {
    pub fn user(&self) -> Option<UserInfo> {
        self.auth.with_untracked(|s| s.user_info.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.auth.with(|s| s.is_admin())
    }

    /// Ids the next bulk action applies to; materialized ids when selecting across pages
    pub fn selected_ids(&self) -> Vec<i64> {
        self.ctrl.with_untracked(|c| match c.selection.materialized() {
            Some(ids) => ids.to_vec(),
            None => c.selection.ids().to_vec(),
        })
    }

    /// Refetch the current page with the committed query
    pub fn reload(&self) {
        load_page(*self);
    }
}

fn load_page<E: ListEntity>(handle: ListHandle<E>) {
    let user = handle.user();
    let Some((seq, query)) = handle
        .ctrl
        .try_update(|c| c.begin_fetch(user.as_ref()))
        .flatten()
    else {
        return;
    };

    spawn_local(async move {
        let result = list_api::fetch_list::<E>(&query).await;
        match handle.ctrl.try_update(|c| c.finish_fetch(seq, result)) {
            Some(FetchOutcome::Failed(e)) => handle.toasts.api_error(&e),
            Some(FetchOutcome::Stale) => {
                log::debug!("{}: stale response #{} dropped", E::TITLE, seq)
            }
            // page already moved back; the query watcher refetches
            Some(FetchOutcome::StepBack) => {
                log::debug!("{}: empty page, stepping back", E::TITLE)
            }
            Some(FetchOutcome::Applied) | None => {}
        }
    });
}

fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// pushState the committed query unless the address bar already shows it
fn push_url_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let target = search_for(query);
    if current_search() == target {
        return;
    }
    let location = window.location();
    let url = format!(
        "{}{}{}",
        location.pathname().unwrap_or_default(),
        target,
        location.hash().unwrap_or_default()
    );
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&url)) {
                log::warn!("pushState failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("history unavailable: {:?}", e),
    }
}

/// Filtered, paginated list of `E` with selection, bulk delete, export and CSV upload.
///
/// `toolbar` renders extra actions next to the standard ones.
pub fn entity_list_page<E: ListEntity>(
    page_id: &'static str,
    toolbar: Option<fn(ListHandle<E>) -> AnyView>,
) -> impl IntoView {
    let (auth, _) = use_auth();
    let toasts = use_toasts();

    let mut initial = ListController::<E>::new(ListConfig::default());
    let rejected = initial.restore_from_query(&current_search());
    if !rejected.is_empty() {
        log::warn!("{}: ignored URL parameters {:?}", E::TITLE, rejected);
    }
    let ctrl = RwSignal::new(initial);
    let handle = ListHandle {
        ctrl,
        auth,
        toasts,
    };

    let config = ctrl.with_untracked(|c| c.config().clone());
    let query = Memo::new(move |_| ctrl.with(|c| c.query()));
    let url_query = Memo::new(move |_| ctrl.with(|c| c.url_query()));
    let user_id = Memo::new(move |_| auth.with(|s| s.user_info.as_ref().map(|u| u.id)));

    // Refetch on every query change and once the user is known
    Effect::new(move |_| {
        query.track();
        user_id.track();
        untrack(move || load_page(handle));
    });

    // At most one pushState per debounce_ms
    let debouncer = StoredValue::new(Debouncer::new());
    let debounce_ms = config.debounce_ms;
    Effect::new(move |_| {
        let target = url_query.get();
        let Some(ticket) = debouncer.try_update_value(|d| d.schedule()) else {
            return;
        };
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(debounce_ms).await;
            if debouncer
                .try_with_value(|d| d.is_current(ticket))
                .unwrap_or(false)
            {
                push_url_query(&target);
            }
        });
    });
    on_cleanup(move || {
        let _ = debouncer.try_update_value(|d| d.cancel());
    });

    let is_admin = Signal::derive(move || auth.with(|s| s.is_admin()));
    let loading = Signal::derive(move || ctrl.with(|c| c.page.loading));
    let busy = Signal::derive(move || ctrl.with(|c| c.gate.is_busy()));
    let dialog = RwSignal::new(None::<Confirmation>);
    let bulk_timeout_ms = config.bulk_timeout_ms;

    // --- selection ---

    let toggle_row = move |id: i64| ctrl.update(|c| c.toggle(id));

    let header_state = Signal::derive(move || {
        ctrl.with(|c| {
            if c.items().is_empty() {
                HeaderCheckState::Unchecked
            } else if c.all_on_page_selected() || c.selection.is_across_pages() {
                HeaderCheckState::Checked
            } else if c.items().iter().any(|item| c.selection.contains(item.id())) {
                HeaderCheckState::Indeterminate
            } else {
                HeaderCheckState::Unchecked
            }
        })
    });

    let on_select_all = move |_| {
        let Some(action) = ctrl.try_update(|c| c.select_all()) else {
            return;
        };
        if let SelectAllAction::Materialize(seq, query) = action {
            spawn_local(async move {
                let result = list_api::fetch_list::<E>(&query).await;
                match ctrl.try_update(|c| c.finish_materialize(seq, result)) {
                    Some(Ok(true)) => {
                        let count = ctrl.with_untracked(|c| c.selected_count());
                        toasts.info(format!("Selected {} matching records", count));
                    }
                    Some(Err(e)) => toasts.api_error(&e),
                    _ => {}
                }
            });
        }
    };

    // --- bulk delete ---

    let request_delete = move |_| {
        let user = handle.user();
        match ctrl.try_update(|c| c.request_bulk_delete(user.as_ref())) {
            Some(Ok(confirmation)) => dialog.set(Some(confirmation)),
            Some(Err(refusal)) => toasts.error(refusal.to_string()),
            None => {}
        }
    };

    let request_row_delete = move |id: i64| {
        let user = handle.user();
        match ctrl.try_update(|c| c.request_row_delete(id, user.as_ref())) {
            Some(Ok(confirmation)) => dialog.set(Some(confirmation)),
            Some(Err(refusal)) => toasts.error(refusal.to_string()),
            None => {}
        }
    };

    let cancel_delete = move |_| {
        if busy.get_untracked() {
            return;
        }
        ctrl.update(|c| c.cancel_bulk_delete());
        dialog.set(None);
    };

    let confirm_delete = move |_| {
        let Some(plan) = ctrl.try_update(|c| c.confirm_bulk_delete()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = list_api::bulk_delete::<E>(plan, bulk_timeout_ms).await;
            let finished = ctrl.try_update(|c| c.finish_bulk_delete(result));
            let _ = dialog.try_set(None);
            match finished {
                Some(Ok(count)) => {
                    let noun = if count == 1 { "record" } else { "records" };
                    toasts.success(format!("Deleted {} {}", count, noun));
                    handle.reload();
                }
                Some(Err(e)) => toasts.api_error(&e),
                None => {}
            }
        });
    };

    // --- export ---

    let export_page = move |_| {
        let result = ctrl.with_untracked(|c| {
            let stem = E::API_PATH.trim_start_matches("/api/").replace('/', "_");
            export::export_page(c.items(), &export::export_filename(&stem, "csv"))
        });
        if let Err(e) = result {
            toasts.error(e);
        }
    };

    let export_on_server = move |format: ExportFormat| {
        let request = ctrl.with_untracked(|c| c.export_request(format));
        spawn_local(async move {
            match list_api::export::<E>(&request).await {
                Ok(ExportResponse { url: Some(url) }) => {
                    if let Err(e) = export::open_download_url(&url) {
                        toasts.error(e);
                    }
                }
                Ok(ExportResponse { url: None }) => {
                    toasts.info("Export is being prepared, try again in a moment")
                }
                Err(e) => toasts.api_error(&e),
            }
        });
    };

    // --- filters and paging ---

    let draft = Memo::new(move |_| ctrl.with(|c| c.draft.clone()));
    let active_filters = Signal::derive(move || ctrl.with(|c| c.filters().active_count()));
    let page_state = Memo::new(move |_| ctrl.with(|c| c.page.clone()));

    let on_filter_change = Callback::new(move |(field, value): (_, String)| {
        ctrl.update(|c| {
            c.draft.set(field, &value);
        });
    });
    let on_apply = Callback::new(move |_| {
        if let Some(Err(errors)) = ctrl.try_update(|c| c.apply_draft()) {
            let first = errors.values().next().cloned().unwrap_or_default();
            toasts.error(first);
        }
    });
    let on_reset = Callback::new(move |_| ctrl.update(|c| c.reset_filters()));
    let on_page_change = Callback::new(move |page: u32| {
        ctrl.update(|c| {
            c.go_to_page(page);
        });
    });
    let on_page_size_change = Callback::new(move |size: u32| {
        ctrl.update(|c| {
            if !c.set_page_size(size) {
                log::warn!("{}: page size {} rejected", E::TITLE, size);
            }
        });
    });

    let selection_label = move || {
        ctrl.with(|c| {
            let total = c.page.total;
            if c.selection.is_across_pages() {
                match (E::BULK_STRATEGY, c.selection.materialized()) {
                    (BulkStrategy::MaterializeIds, None) => {
                        "Collecting matching records…".to_string()
                    }
                    (BulkStrategy::MaterializeIds, Some(ids)) => {
                        format!("All {} matching records are selected", ids.len())
                    }
                    _ => format!("All {} matching records are selected", total),
                }
            } else if c.selection.has_selection() {
                format!("{} selected", c.selection.len())
            } else {
                String::new()
            }
        })
    };

    let toolbar_extra = toolbar.map(|render| render(handle));
    let page_size_options = config.page_size_options;

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{E::TITLE}</h1>
                    <span class="page__subtitle">{move || ctrl.with(|c| c.page.range_label())}</span>
                </div>
                <div class="page__header-right">
                    {toolbar_extra}
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| handle.reload()
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=export_page
                        disabled=Signal::derive(move || ctrl.with(|c| c.items().is_empty()))
                    >
                        {icon("download")}
                        " Page CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| export_on_server(ExportFormat::Csv)
                    >
                        {icon("download")}
                        " Export CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| export_on_server(ExportFormat::Xlsx)
                    >
                        {icon("download")}
                        " Export XLSX"
                    </Button>
                    <Show when=move || is_admin.get()>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=request_delete
                            disabled=Signal::derive(move || {
                                busy.get() || ctrl.with(|c| !c.selection.has_selection())
                            })
                        >
                            {icon("trash")}
                            " Delete selected"
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                {csv_upload_view::<E>(toasts, is_admin, Callback::new(move |_| handle.reload()))}

                <FilterPanel
                    draft=draft.into()
                    active_filters_count=active_filters
                    on_change=on_filter_change
                    on_apply=on_apply
                    on_reset=on_reset
                >
                    <PaginationControls
                        state=page_state
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                        page_size_options=page_size_options
                    />
                </FilterPanel>

                <Show when=move || ctrl.with(|c| c.selection.has_selection())>
                    <div class="selection-banner">
                        <span>{selection_label}</span>
                        <Show when=move || ctrl.with(|c| c.selection.is_across_pages())>
                            <button
                                class="button button--link"
                                on:click=move |_| ctrl.update(|c| c.selection.demote_to_page())
                            >
                                "Select only this page"
                            </button>
                        </Show>
                        <button
                            class="button button--link"
                            on:click=move |_| ctrl.update(|c| c.selection.clear())
                        >
                            "Clear selection"
                        </button>
                    </div>
                </Show>

                <div class="table-container">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th class="table__header-cell table__header-cell--checkbox">
                                    <TableHeaderCheckbox
                                        state=header_state
                                        on_toggle=Callback::new(on_select_all)
                                        disabled=Signal::derive(move || busy.get() || loading.get())
                                    />
                                </th>
                                {E::columns()
                                    .iter()
                                    .map(|title| view! { <th class="table__header-cell">{*title}</th> })
                                    .collect_view()}
                                <Show when=move || is_admin.get()>
                                    <th class="table__header-cell table__header-cell--actions"></th>
                                </Show>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || ctrl.with(|c| c.items().to_vec())
                                key=|item: &E| (item.id(), item.cells())
                                children=move |item: E| {
                                    let id = item.id();
                                    let checked = Signal::derive(move || {
                                        ctrl.with(|c| c.selection.contains(id))
                                    });
                                    view! {
                                        <tr class="table__row" class:table__row--selected=move || checked.get()>
                                            <td class="table__cell table__cell--checkbox">
                                                <TableCheckbox
                                                    checked=checked
                                                    on_change=Callback::new(move |_| toggle_row(id))
                                                />
                                            </td>
                                            {item
                                                .cells()
                                                .into_iter()
                                                .map(|cell| view! { <td class="table__cell">{cell}</td> })
                                                .collect_view()}
                                            <Show when=move || is_admin.get()>
                                                <td class="table__cell table__cell--actions">
                                                    <button
                                                        class="button button--icon"
                                                        title="Delete"
                                                        disabled=move || busy.get()
                                                        on:click=move |_| request_row_delete(id)
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </td>
                                            </Show>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || ctrl.with(|c| c.items().is_empty() && !c.page.loading)>
                        <div class="table__empty">"No records match the current filters"</div>
                    </Show>
                    <Show when=move || loading.get()>
                        <div class="table__loading">"Loading…"</div>
                    </Show>
                </div>
            </div>

            {move || {
                dialog
                    .get()
                    .map(|confirmation| {
                        view! {
                            <ConfirmDialog
                                title="Delete records".to_string()
                                message=confirmation.message()
                                confirm_label=if busy.get() { "Deleting…" } else { "Delete" }
                                busy=busy
                                on_confirm=Callback::new(confirm_delete)
                                on_cancel=Callback::new(cancel_delete)
                            />
                        }
                    })
            }}
        </PageFrame>
    }
}
