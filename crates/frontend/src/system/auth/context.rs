use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_error::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Identity lookup finished (with or without a user)
    pub resolved: bool,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(UserInfo::is_admin).unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Restore the session from localStorage
    Effect::new(move |_| {
        let Some(access_token) = storage::get_access_token() else {
            set_auth_state.set(AuthState {
                resolved: true,
                ..AuthState::default()
            });
            return;
        };
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user_info) => {
                    log::debug!("Signed in as {}", user_info.username);
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                        resolved: true,
                    });
                }
                Err(e) => {
                    log::warn!("Session restore failed: {}", e);
                    if e == ApiError::Unauthenticated {
                        storage::clear_tokens();
                    }
                    set_auth_state.set(AuthState {
                        resolved: true,
                        ..AuthState::default()
                    });
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Resolved user, `None` while loading or when signed out
pub fn current_user() -> Signal<Option<UserInfo>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.user_info.clone()))
}

pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState {
        resolved: true,
        ..AuthState::default()
    });
}
