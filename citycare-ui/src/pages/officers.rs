use crate::components::{FieldError, LoadingSpinner, Notice, RequireRole, StoreError, TextField};
use crate::server::{create_officer, delete_officer, list_officers};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::validation::StaffDraft;
use citycare_app::application::RosterStore;
use citycare_app::domain::Role;
use leptos::prelude::*;

#[component]
pub fn OfficersPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Head]>
            <OfficerRoster/>
        </RequireRole>
    }
}

#[component]
fn OfficerRoster() -> impl IntoView {
    let roster = use_stores().officers;
    let confirming = RwSignal::new(None::<i64>);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let invalid = RwSignal::new(None::<String>);

    let load = move || {
        roster.update(RosterStore::begin);
        dispatch(roster, list_officers(), RosterStore::settle_fetch);
    };
    Effect::new(move |_| {
        if roster.with_untracked(RosterStore::needs_fetch) {
            load();
        }
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = StaffDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            skills: Vec::new(),
        };
        match draft.validate_officer() {
            Ok(officer) => {
                invalid.set(None);
                [name, email, phone, password].iter().for_each(|field| field.set(String::new()));
                roster.update(RosterStore::begin);
                dispatch(roster, create_officer(officer), RosterStore::settle_create);
            }
            Err(e) => invalid.set(Some(e.to_string())),
        }
    };

    let remove = move |officer_id: i64| {
        confirming.set(None);
        roster.update(RosterStore::begin);
        dispatch(roster, delete_officer(officer_id), move |store, outcome| {
            store.settle_delete(officer_id, outcome)
        });
    };

    let busy = Signal::derive(move || roster.with(RosterStore::loading));
    let success = Signal::derive(move || roster.with(|s| s.success_message().map(str::to_string)));

    view! {
        <div class="page">
            <h1 class="page-title">"Officers"</h1>
            <Notice message=success/>
            <StoreError
                message=error_message(roster, RosterStore::error)
                on_retry=Callback::new(move |_| load())
            />

            <form class="form" on:submit=submit>
                <h3 class="form__title">"Add officer"</h3>
                <TextField label="Name" value=name/>
                <TextField label="Email" value=email input_type="email"/>
                <TextField label="Phone" value=phone input_type="tel"/>
                <TextField label="Initial password" value=password input_type="password"/>
                <FieldError message=invalid/>
                <button type="submit" class="button button--primary" prop:disabled=move || busy.get()>
                    "Create officer"
                </button>
            </form>

            {move || {
                let officers = roster.with(|s| s.entries().to_vec());
                if officers.is_empty() {
                    return if busy.get() {
                        view! { <LoadingSpinner/> }.into_any()
                    } else {
                        view! { <p class="page-empty">"No officers yet."</p> }.into_any()
                    };
                }
                view! {
                    <table class="roster">
                        <thead>
                            <tr><th>"Name"</th><th>"Email"</th><th>"Phone"</th><th></th></tr>
                        </thead>
                        <tbody>
                            {officers
                                .into_iter()
                                .map(|officer| {
                                    let officer_id = officer.id;
                                    view! {
                                        <tr>
                                            <td>{officer.name}</td>
                                            <td>{officer.email}</td>
                                            <td>{officer.phone}</td>
                                            <td>
                                                {move || if confirming.get() == Some(officer_id) {
                                                    view! {
                                                        <button class="button button--danger" on:click=move |_| remove(officer_id)>
                                                            "Confirm delete"
                                                        </button>
                                                        <button class="button" on:click=move |_| confirming.set(None)>
                                                            "Cancel"
                                                        </button>
                                                    }
                                                    .into_any()
                                                } else {
                                                    view! {
                                                        <button
                                                            class="button button--danger"
                                                            prop:disabled=move || busy.get()
                                                            on:click=move |_| confirming.set(Some(officer_id))
                                                        >
                                                            "Delete"
                                                        </button>
                                                    }
                                                    .into_any()
                                                }}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </div>
    }
}
