use super::{FieldError, LoadingSpinner, Notice, PasswordForm, StoreError, TextField};
use citycare_app::application::{validation, ProfileStore};
use citycare_app::domain::{ContactDetails, PasswordChange};
use citycare_errors::AppError;
use leptos::prelude::*;

/// Profile view and edit form shared by every role.
///
/// The page wires `on_save` and `on_password` to the role's server calls.
#[component]
pub fn ProfileEditor<P>(
    store: RwSignal<ProfileStore<P>>,
    #[prop(into)] on_save: Callback<(String, String)>,
    #[prop(into)] on_password: Callback<PasswordChange>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView
where
    P: ContactDetails + Send + Sync + 'static,
{
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let invalid = RwSignal::new(None::<String>);

    let loaded = Memo::new(move |_| {
        store.with(|s| {
            s.profile().map(|p| {
                (
                    p.name().to_string(),
                    p.email().to_string(),
                    p.phone().to_string(),
                    p.skills().map(|skills| skills.iter().map(|s| s.label()).collect::<Vec<_>>()),
                )
            })
        })
    });

    Effect::new(move |_| {
        if let Some((loaded_name, _, loaded_phone, _)) = loaded.get() {
            name.set(loaded_name);
            phone.set(loaded_phone);
        }
    });

    let busy = Signal::derive(move || store.with(ProfileStore::loading));
    let error = Signal::derive(move || store.with(|s| s.error().map(AppError::user_message)));
    let success = Signal::derive(move || store.with(|s| s.success_message().map(str::to_string)));

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validation::validate_profile(&name.get_untracked(), &phone.get_untracked()) {
            Ok(fields) => {
                invalid.set(None);
                on_save.run(fields);
            }
            Err(e) => invalid.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="profile">
            <Notice message=success/>
            <StoreError message=error on_retry=on_retry/>
            {move || match loaded.get() {
                None if busy.get() => view! { <LoadingSpinner/> }.into_any(),
                None => ().into_any(),
                Some((_, email, _, skills)) => view! {
                    <form class="form" on:submit=save>
                        <h3 class="form__title">"Profile"</h3>
                        <p class="profile__email">"Email: " {email}</p>
                        {skills.map(|skills| view! {
                            <p class="profile__skills">"Skills: " {skills.join(", ")}</p>
                        })}
                        <TextField label="Name" value=name/>
                        <TextField label="Phone" value=phone input_type="tel"/>
                        <FieldError message=invalid/>
                        <button type="submit" class="button" prop:disabled=move || busy.get()>
                            "Save"
                        </button>
                    </form>
                    <PasswordForm on_submit=on_password busy=busy/>
                }
                .into_any(),
            }}
        </section>
    }
}
