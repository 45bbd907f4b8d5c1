use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Row checkbox
///
/// Clicks stop here and never reach the row.
#[component]
pub fn TableCheckbox(
    checked: Signal<bool>,
    on_change: Callback<()>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |_| on_change.run(())
            />
        </td>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderCheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Header "select all" checkbox with an indeterminate state
#[component]
pub fn TableHeaderCheckbox(
    state: Signal<HeaderCheckState>,
    on_toggle: Callback<()>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate exists only as a DOM property
    Effect::new(move |_| {
        let indeterminate = state.get() == HeaderCheckState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == HeaderCheckState::Checked
                prop:disabled=disabled
                on:change=move |_| on_toggle.run(())
            />
        </th>
    }
}
