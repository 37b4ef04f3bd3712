use crate::components::{AddressBook, ProfileEditor, RequireRole};
use crate::server::{
    change_password, fetch_citizen_profile, fetch_staff_profile, fetch_technician_profile,
    update_citizen_profile, update_staff_profile, update_technician_profile,
};
use crate::state::{dispatch, use_stores};
use citycare_app::application::{AuthState, ProfileStore};
use citycare_app::domain::{Address, PasswordChange, ProfileUpdate, Role};
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let stores = use_stores();
    let role = Memo::new(move |_| stores.auth.with(AuthState::role));

    view! {
        <RequireRole roles=&Role::ALL>
            <div class="page">
                <h1 class="page-title">"My Profile"</h1>
                {move || match role.get() {
                    Some(Role::Citizen) => view! { <CitizenProfileSection/> }.into_any(),
                    Some(Role::Technician) => view! { <TechnicianProfileSection/> }.into_any(),
                    Some(Role::Officer | Role::Head) => view! { <StaffProfileSection/> }.into_any(),
                    None => ().into_any(),
                }}
            </div>
        </RequireRole>
    }
}

#[component]
fn CitizenProfileSection() -> impl IntoView {
    let store = use_stores().citizen_profile;

    let load = move || {
        store.update(ProfileStore::begin);
        dispatch(store, fetch_citizen_profile(), ProfileStore::settle_fetch);
    };
    Effect::new(move |_| {
        if store.with_untracked(ProfileStore::needs_fetch) {
            load();
        }
    });

    let save = Callback::new(move |(name, phone): (String, String)| {
        let Some(update) = store.with_untracked(|s| {
            s.profile()
                .map(|profile| ProfileUpdate::for_profile(profile, name, phone))
        }) else {
            return;
        };
        store.update(ProfileStore::begin);
        dispatch(store, update_citizen_profile(update), ProfileStore::settle_update);
    });

    let password = Callback::new(move |change: PasswordChange| {
        store.update(ProfileStore::begin);
        dispatch(store, change_password(0, change), ProfileStore::settle_password);
    });

    let addresses = RwSignal::new(Vec::<Address>::new());
    let saved_addresses = Memo::new(move |_| {
        store.with(|s| s.profile().map(|profile| profile.addresses.clone()))
    });
    Effect::new(move |_| {
        if let Some(saved) = saved_addresses.get() {
            addresses.set(saved);
        }
    });

    let save_addresses = Callback::new(move |list: Vec<Address>| {
        let Some(update) = store.with_untracked(|s| {
            s.profile().map(|profile| {
                ProfileUpdate::for_profile(profile, profile.name.clone(), profile.phone.clone())
                    .with_addresses(list)
            })
        }) else {
            return;
        };
        store.update(ProfileStore::begin);
        dispatch(store, update_citizen_profile(update), ProfileStore::settle_update);
    });

    let busy = Signal::derive(move || store.with(ProfileStore::loading));
    let loaded = move || store.with(|s| s.profile().is_some());

    view! {
        <ProfileEditor
            store=store
            on_save=save
            on_password=password
            on_retry=Callback::new(move |_| load())
        />
        <Show when=loaded>
            <AddressBook addresses=addresses on_save=save_addresses busy=busy/>
        </Show>
    }
}

/// Officers and heads.
#[component]
fn StaffProfileSection() -> impl IntoView {
    let store = use_stores().staff_profile;

    let load = move || {
        store.update(ProfileStore::begin);
        dispatch(store, fetch_staff_profile(), ProfileStore::settle_fetch);
    };
    Effect::new(move |_| {
        if store.with_untracked(ProfileStore::needs_fetch) {
            load();
        }
    });

    let save = Callback::new(move |(name, phone): (String, String)| {
        let Some(update) = store.with_untracked(|s| {
            s.profile()
                .map(|profile| ProfileUpdate::for_profile(profile, name, phone))
        }) else {
            return;
        };
        store.update(ProfileStore::begin);
        dispatch(store, update_staff_profile(update), ProfileStore::settle_update);
    });

    let password = Callback::new(move |change: PasswordChange| {
        store.update(ProfileStore::begin);
        dispatch(store, change_password(0, change), ProfileStore::settle_password);
    });

    view! {
        <ProfileEditor
            store=store
            on_save=save
            on_password=password
            on_retry=Callback::new(move |_| load())
        />
    }
}

#[component]
fn TechnicianProfileSection() -> impl IntoView {
    let store = use_stores().technician_profile;

    let load = move || {
        store.update(ProfileStore::begin);
        dispatch(store, fetch_technician_profile(), ProfileStore::settle_fetch);
    };
    Effect::new(move |_| {
        if store.with_untracked(ProfileStore::needs_fetch) {
            load();
        }
    });

    let save = Callback::new(move |(name, phone): (String, String)| {
        let Some((technician_id, update)) = store.with_untracked(|s| {
            s.profile().map(|profile| {
                (profile.id, ProfileUpdate::for_profile(profile, name, phone))
            })
        }) else {
            return;
        };
        store.update(ProfileStore::begin);
        dispatch(
            store,
            update_technician_profile(technician_id, update),
            ProfileStore::settle_update,
        );
    });

    let password = Callback::new(move |change: PasswordChange| {
        let Some(technician_id) = store.with_untracked(|s| s.profile().map(|p| p.id)) else {
            return;
        };
        store.update(ProfileStore::begin);
        dispatch(
            store,
            change_password(technician_id, change),
            ProfileStore::settle_password,
        );
    });

    view! {
        <ProfileEditor
            store=store
            on_save=save
            on_password=password
            on_retry=Callback::new(move |_| load())
        />
    }
}
