use crate::shared::icons::icon;
use crate::shared::list_controller::filter_draft::field_kind;
use crate::shared::list_controller::{FieldKind, FilterDraft, ANY};
use contracts::shared::filters::FilterField;
use leptos::prelude::*;
use thaw::*;

/// Collapsible filter form bound to a [`FilterDraft`].
///
/// Each edit goes to `on_change`; Apply stays disabled while the draft has errors.
#[component]
pub fn FilterPanel(
    draft: Signal<FilterDraft>,

    /// Number of committed filters (badge)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    on_change: Callback<(FilterField, String)>,
    on_apply: Callback<()>,
    on_reset: Callback<()>,

    /// Pagination controls shown in the header row
    children: Children,
) -> impl IntoView {
    let is_expanded = RwSignal::new(false);
    let fields = draft.with_untracked(|d| d.fields().to_vec());

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {children()}
                </div>
            </div>

            <Show when=move || is_expanded.get()>
                <div class="filter-panel-content">
                    <div class="filter-panel__grid">
                        {fields
                            .iter()
                            .map(|field| view! { <FilterInput field=*field draft=draft on_change=on_change /> })
                            .collect_view()}
                    </div>
                    <div class="filter-panel__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_apply.run(())
                            disabled=Signal::derive(move || !draft.with(|d| d.can_apply()))
                        >
                            "Apply"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_reset.run(())
                        >
                            "Reset"
                        </Button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FilterInput(
    field: FilterField,
    draft: Signal<FilterDraft>,
    on_change: Callback<(FilterField, String)>,
) -> impl IntoView {
    let value = move || draft.with(|d| d.value(field).to_string());
    let error = move || draft.with(|d| d.error(field).map(String::from));
    let emit = move |ev: leptos::ev::Event| on_change.run((field, event_target_value(&ev)));

    let input = match field_kind(field) {
        FieldKind::Choice(codes) => view! {
            <select class="form__select" on:change=emit prop:value=move || {
                let v = value();
                if v.is_empty() { ANY.to_string() } else { v }
            }>
                <option value=ANY>"Any"</option>
                {codes
                    .iter()
                    .map(|code| view! { <option value=*code>{*code}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Date => view! {
            <input type="date" class="form__input" on:change=emit prop:value=value />
        }
        .into_any(),
        FieldKind::Integer | FieldKind::Decimal => view! {
            <input type="text" inputmode="decimal" class="form__input" on:input=emit prop:value=value />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input type="text" class="form__input" on:input=emit prop:value=value />
        }
        .into_any(),
    };

    view! {
        <div class=move || {
            if error().is_some() { "form__group form__group--error" } else { "form__group" }
        }>
            <label class="form__label">{field.label()}</label>
            {input}
            {move || error().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}
