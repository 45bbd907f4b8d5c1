//! "Assign to user" action of the stock list

use contracts::domain::a102_stock::dto::{AssignStockRequest, StockDto};
use contracts::system::users::UserDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::list_page::ListHandle;
use crate::system::users::api;

/// Validate the form and build the request
fn build_request(
    stock_ids: Vec<i64>,
    user_id: &str,
    weight: &str,
) -> Result<AssignStockRequest, String> {
    if stock_ids.is_empty() {
        return Err("Select stock to assign".to_string());
    }
    let user_id = user_id
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| "Choose a user".to_string())?;
    let weight = match weight.trim() {
        "" => None,
        raw => match raw.parse::<f64>() {
            Ok(w) if w.is_finite() && w > 0.0 => Some(w),
            _ => return Err("Weight must be a positive number".to_string()),
        },
    };
    Ok(AssignStockRequest {
        stock_ids,
        user_id,
        weight,
    })
}

pub fn assign_toolbar(handle: ListHandle<StockDto>) -> AnyView {
    let open = RwSignal::new(false);
    let users = RwSignal::new(Vec::<UserDto>::new());
    let user_id = RwSignal::new(String::new());
    let weight = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let toasts = handle.toasts;
    let ctrl = handle.ctrl;

    let open_form = move |_| {
        open.set(true);
        if !users.with_untracked(|u| u.is_empty()) {
            return;
        }
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(list) => {
                    let _ = users.try_set(list);
                }
                Err(e) => toasts.api_error(&e),
            }
        });
    };

    let submit = move |_| {
        let request = match build_request(
            handle.selected_ids(),
            &user_id.get_untracked(),
            &weight.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                toasts.error(message);
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match api::assign_stock(&request).await {
                Ok(response) => {
                    toasts.success(format!("Assigned {} stock records", response.updated));
                    let _ = ctrl.try_update(|c| c.selection.clear());
                    let _ = open.try_set(false);
                    handle.reload();
                }
                Err(e) => toasts.api_error(&e),
            }
            let _ = saving.try_set(false);
        });
    };

    view! {
        <Show when=move || handle.is_admin()>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=open_form
                disabled=Signal::derive(move || ctrl.with(|c| !c.selection.has_selection()))
            >
                {icon("users")}
                " Assign to user"
            </Button>
            <Show when=move || open.get()>
                <div class="assign-form">
                    <select
                        class="assign-form__user"
                        prop:value=move || user_id.get()
                        on:change=move |ev| user_id.set(event_target_value(&ev))
                    >
                        <option value="">"User…"</option>
                        <For
                            each=move || users.get()
                            key=|u| u.id
                            children=|u: UserDto| {
                                view! { <option value=u.id.to_string()>{u.display_name().to_string()}</option> }
                            }
                        />
                    </select>
                    <input
                        class="assign-form__weight"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="Weight, kg (all)"
                        prop:value=move || weight.get()
                        on:input=move |ev| weight.set(event_target_value(&ev))
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Assign"
                    </Button>
                    <button class="button button--icon" on:click=move |_| open.set(false)>
                        {icon("x")}
                    </button>
                </div>
            </Show>
        </Show>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_optional() {
        let request = build_request(vec![4, 5], "9", " ").unwrap();
        assert_eq!(request.user_id, 9);
        assert_eq!(request.weight, None);
        assert_eq!(request.stock_ids, vec![4, 5]);
    }

    #[test]
    fn rejects_missing_user_and_bad_weight() {
        assert_eq!(
            build_request(vec![1], "", "").unwrap_err(),
            "Choose a user"
        );
        assert_eq!(
            build_request(vec![1], "3", "-2").unwrap_err(),
            "Weight must be a positive number"
        );
        assert_eq!(
            build_request(Vec::new(), "3", "").unwrap_err(),
            "Select stock to assign"
        );
    }
}
