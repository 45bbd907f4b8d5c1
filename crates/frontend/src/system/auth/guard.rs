use leptos::prelude::*;

use super::context::use_auth;

/// Renders children once a user is known; a notice otherwise.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.user_info.is_some())
            fallback=move || {
                if auth_state.with(|s| s.resolved) {
                    view! { <div class="alert alert--warning">"You are not signed in."</div> }.into_any()
                } else {
                    view! { <div class="page__loading">"Loading..."</div> }.into_any()
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Renders children for admins only
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_admin())
            fallback=|| view! { <div class="alert alert--warning">"Admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
