use super::{ErrorDisplay, LoadingSpinner};
use crate::state::use_stores;
use citycare_app::application::AuthState;
use citycare_app::domain::Role;
use leptos::prelude::*;

/// Renders `children` only for a signed-in user holding one of `roles`.
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let stores = use_stores();
    let role = Memo::new(move |_| stores.auth.with(AuthState::role));

    move || {
        if !stores.auth_ready.get() {
            return view! { <LoadingSpinner/> }.into_any();
        }
        match role.get() {
            Some(role) if roles.contains(&role) => children().into_any(),
            Some(_) => view! {
                <ErrorDisplay message="This page is not available for your role."/>
            }
            .into_any(),
            None => view! {
                <div class="guard">
                    <p>"Please log in to continue."</p>
                    <a href="/login" class="button">"Log in"</a>
                </div>
            }
            .into_any(),
        }
    }
}
