use citycare_app::application::{AuthState, IssueStore, ProfileStore, PublicIssueList, RosterStore};
use citycare_app::domain::{CitizenProfile, Officer, StaffProfile, Technician};
use citycare_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use std::future::Future;

/// Every client-side store, shared through context.
///
/// Signals are `Copy`, so components take the whole bundle by value.
#[derive(Clone, Copy)]
pub struct Stores {
    pub auth: RwSignal<AuthState>,
    /// Set once the server has told us whether a session exists.
    pub auth_ready: RwSignal<bool>,
    pub issues: RwSignal<IssueStore>,
    pub public: RwSignal<PublicIssueList>,
    pub citizen_profile: RwSignal<ProfileStore<CitizenProfile>>,
    pub staff_profile: RwSignal<ProfileStore<StaffProfile>>,
    pub technician_profile: RwSignal<ProfileStore<Technician>>,
    pub technicians: RwSignal<RosterStore<Technician>>,
    pub officers: RwSignal<RosterStore<Officer>>,
}

impl Stores {
    pub fn provide() -> Self {
        let stores = Self {
            auth: RwSignal::new(AuthState::default()),
            auth_ready: RwSignal::new(false),
            issues: RwSignal::new(IssueStore::default()),
            public: RwSignal::new(PublicIssueList::default()),
            citizen_profile: RwSignal::new(ProfileStore::default()),
            staff_profile: RwSignal::new(ProfileStore::default()),
            technician_profile: RwSignal::new(ProfileStore::default()),
            technicians: RwSignal::new(RosterStore::default()),
            officers: RwSignal::new(RosterStore::default()),
        };
        provide_context(stores);
        stores
    }

    /// Back to a signed-out, empty client.
    pub fn reset(&self) {
        self.auth.update(AuthState::logout);
        self.issues.update(IssueStore::reset);
        self.public.set(PublicIssueList::default());
        self.citizen_profile.update(ProfileStore::reset);
        self.staff_profile.update(ProfileStore::reset);
        self.technician_profile.update(ProfileStore::reset);
        self.technicians.update(RosterStore::reset);
        self.officers.update(RosterStore::reset);
    }
}

pub fn use_stores() -> Stores {
    expect_context::<Stores>()
}

/// Runs a server call in the background and settles `store` with its outcome.
pub fn dispatch<S, T, Fut>(
    store: RwSignal<S>,
    request: Fut,
    settle: impl FnOnce(&mut S, Result<T, AppError>) + 'static,
) where
    S: Send + Sync + 'static,
    T: 'static,
    Fut: Future<Output = Result<T, ServerFnError>> + 'static,
{
    spawn_local(async move {
        let outcome = request.await.map_err(AppError::from_server_error);
        store.update(|state| settle(state, outcome));
    });
}

/// Message shown for the store's error slot, if any.
pub fn error_message<S, F>(store: RwSignal<S>, error: F) -> Signal<Option<String>>
where
    S: Send + Sync + 'static,
    F: Fn(&S) -> Option<&AppError> + Send + Sync + 'static,
{
    Signal::derive(move || store.with(|state| error(state).map(AppError::user_message)))
}
