pub mod components;
pub mod pages;
pub mod server;
pub mod state;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use components::Navbar;
use pages::{
    HomePage, LoginPage, MyIssuesPage, OfficerIssuesPage, OfficersPage, ProfilePage,
    PublicIssuesPage, ReportIssuePage, SignupPage, TechnicianIssuesPage, TechniciansPage,
};
use state::Stores;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let stores = Stores::provide();

    // The browser only learns the role; the token stays in the server session.
    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            match server::current_role().await {
                Ok(role) => stores
                    .auth
                    .set(citycare_app::application::AuthState::signed_in(role)),
                Err(e) => tracing::warn!("could not read session: {e}"),
            }
            stores.auth_ready.set(true);
        });
    });

    view! {
        <Title text="CityCare | Report and track civic issues"/>
        <Meta name="description" content="Report municipal issues and follow them until they are resolved"/>

        <Router>
            <Navbar/>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/signup") view=SignupPage/>
                    <Route path=path!("/issues") view=PublicIssuesPage/>
                    <Route path=path!("/report-issue") view=ReportIssuePage/>
                    <Route path=path!("/my-issues") view=MyIssuesPage/>
                    <Route path=path!("/all-issues") view=OfficerIssuesPage/>
                    <Route path=path!("/technician-issues") view=TechnicianIssuesPage/>
                    <Route path=path!("/technicians") view=TechniciansPage/>
                    <Route path=path!("/officers") view=OfficersPage/>
                    <Route path=path!("/profile") view=ProfilePage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
