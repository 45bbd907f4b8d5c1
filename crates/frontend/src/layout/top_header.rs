//! Top bar: sidebar toggle, application title, current user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use contracts::system::auth::Role;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("chevrons-left")
                    } else {
                        icon("chevrons-right")
                    }}
                </button>
                <span class="top-header__title">"Tea Trade"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth_state.with(|s| match &s.user_info {
                            Some(u) if u.role == Role::Admin => format!("{} (admin)", u.username),
                            Some(u) => u.username.clone(),
                            None => "Guest".to_string(),
                        })}
                    </span>
                </div>

                <Show when=move || auth_state.with(|s| s.user_info.is_some())>
                    <button
                        class="top-header__icon-btn"
                        on:click=move |_| do_logout(set_auth_state)
                        title="Sign out"
                    >
                        {icon("log-out")}
                    </button>
                </Show>
            </div>
        </div>
    }
}
