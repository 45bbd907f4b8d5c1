use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Confirmation dialog for irreversible actions
#[component]
pub fn ConfirmDialog(
    title: String,
    #[prop(into)] message: Signal<String>,
    /// Label of the destructive button
    #[prop(into)]
    confirm_label: String,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    // Escape closes
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" && !busy.get_untracked() {
            on_cancel.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| {
            if !busy.get_untracked() {
                on_cancel.run(());
            }
        }>
            <div class="modal modal--confirm" role="alertdialog" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button
                        class="button button--icon modal__close"
                        on:click=move |_| on_cancel.run(())
                        disabled=move || busy.get()
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    <p>{move || message.get()}</p>
                </div>
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                        disabled=busy
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_confirm.run(())
                        disabled=busy
                    >
                        {move || if busy.get() { "Working...".to_string() } else { confirm_label.clone() }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
