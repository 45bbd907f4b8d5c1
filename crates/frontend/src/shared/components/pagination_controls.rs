use crate::shared::icons::icon;
use crate::shared::list_controller::PageState;
use leptos::prelude::*;

/// Prev/next controls with a page size picker. Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)] state: Signal<PageState>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,

    page_size_options: &'static [u32],
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || !state.with(|s| s.can_prev())
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(state.with_untracked(|s| s.page.saturating_sub(1)))
                disabled=move || !state.with(|s| s.can_prev())
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    state.with(|s| {
                        format!("{} / {} ({})", s.page, s.total_pages.max(1), s.range_label())
                    })
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(state.with_untracked(|s| s.page + 1))
                disabled=move || !state.with(|s| s.can_next())
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(state.with_untracked(|s| s.total_pages))
                disabled=move || !state.with(|s| s.can_next())
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || state.with(|s| s.limit.to_string())
            >
                {page_size_options
                    .iter()
                    .map(|&size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || state.with(|s| s.limit == size)
                            >
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
