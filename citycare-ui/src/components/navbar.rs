use crate::server::logout;
use crate::state::use_stores;
use citycare_app::application::AuthState;
use citycare_app::domain::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Links shown to a signed-in user, besides the public ones.
pub fn role_links(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Citizen => &[
            ("/report-issue", "Report Issue"),
            ("/my-issues", "My Issues"),
            ("/profile", "Profile"),
        ],
        Role::Officer => &[
            ("/all-issues", "All Issues"),
            ("/technicians", "Technicians"),
            ("/profile", "Profile"),
        ],
        Role::Technician => &[
            ("/technician-issues", "Assigned Issues"),
            ("/profile", "Profile"),
        ],
        Role::Head => &[("/officers", "Officers"), ("/profile", "Profile")],
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let stores = use_stores();
    let navigate = use_navigate();
    let role = Memo::new(move |_| stores.auth.with(AuthState::role));

    let sign_out = move |_: leptos::ev::MouseEvent| {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Err(e) = logout().await {
                tracing::warn!("logout failed: {e}");
            }
            stores.reset();
            navigate("/login", Default::default());
        });
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">"CityCare"</a>
            <div class="navbar__links">
                <a href="/issues" class="navbar__link">"Public Issues"</a>
                {move || match role.get() {
                    Some(role) => view! {
                        {role_links(role)
                            .iter()
                            .map(|(href, label)| view! { <a href=*href class="navbar__link">{*label}</a> })
                            .collect::<Vec<_>>()}
                        <span class="navbar__role">{role.label()}</span>
                        <button class="navbar__logout" on:click=sign_out.clone()>"Logout"</button>
                    }
                    .into_any(),
                    None => view! {
                        <a href="/login" class="navbar__link">"Login"</a>
                        <a href="/signup" class="navbar__link">"Sign up"</a>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_reaches_its_home_and_profile() {
        for role in Role::ALL {
            let links = role_links(role);
            assert!(links.iter().any(|(href, _)| *href == role.home_path()));
            assert!(links.iter().any(|(href, _)| *href == "/profile"));
        }
    }

    #[test]
    fn test_staff_pages_stay_with_their_role() {
        let officer: Vec<_> = role_links(Role::Officer).iter().map(|(href, _)| *href).collect();
        assert!(officer.contains(&"/technicians"));
        assert!(!officer.contains(&"/officers"));
        assert!(!role_links(Role::Citizen)
            .iter()
            .any(|(href, _)| *href == "/all-issues"));
    }
}
