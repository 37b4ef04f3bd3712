use crate::components::{FieldError, LoadingSpinner, Notice, RequireRole, StoreError, TextField};
use crate::server::{create_technician, delete_technician, list_technicians};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::validation::StaffDraft;
use citycare_app::application::RosterStore;
use citycare_app::domain::{IssueCategory, Role};
use leptos::prelude::*;

#[component]
pub fn TechniciansPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Officer]>
            <TechnicianRoster/>
        </RequireRole>
    }
}

#[component]
fn TechnicianRoster() -> impl IntoView {
    let roster = use_stores().technicians;
    let confirming = RwSignal::new(None::<i64>);

    let load = move || {
        roster.update(RosterStore::begin);
        dispatch(roster, list_technicians(), RosterStore::settle_fetch);
    };
    Effect::new(move |_| {
        if roster.with_untracked(RosterStore::needs_fetch) {
            load();
        }
    });

    let remove = move |technician_id: i64| {
        confirming.set(None);
        roster.update(RosterStore::begin);
        dispatch(roster, delete_technician(technician_id), move |store, outcome| {
            store.settle_delete(technician_id, outcome)
        });
    };

    let busy = Signal::derive(move || roster.with(RosterStore::loading));
    let success = Signal::derive(move || roster.with(|s| s.success_message().map(str::to_string)));

    view! {
        <div class="page">
            <h1 class="page-title">"Technicians"</h1>
            <Notice message=success/>
            <StoreError
                message=error_message(roster, RosterStore::error)
                on_retry=Callback::new(move |_| load())
            />
            <NewTechnicianForm busy=busy/>
            {move || {
                let technicians = roster.with(|s| s.entries().to_vec());
                if technicians.is_empty() {
                    return if busy.get() {
                        view! { <LoadingSpinner/> }.into_any()
                    } else {
                        view! { <p class="page-empty">"No technicians yet."</p> }.into_any()
                    };
                }
                view! {
                    <table class="roster">
                        <thead>
                            <tr><th>"Name"</th><th>"Email"</th><th>"Phone"</th><th>"Skills"</th><th></th></tr>
                        </thead>
                        <tbody>
                            {technicians
                                .into_iter()
                                .map(|technician| {
                                    let technician_id = technician.id;
                                    let skills = technician
                                        .skills
                                        .iter()
                                        .map(IssueCategory::label)
                                        .collect::<Vec<_>>()
                                        .join(", ");
                                    view! {
                                        <tr>
                                            <td>{technician.name}</td>
                                            <td>{technician.email}</td>
                                            <td>{technician.phone}</td>
                                            <td>{skills}</td>
                                            <td>
                                                {move || if confirming.get() == Some(technician_id) {
                                                    view! {
                                                        <button class="button button--danger" on:click=move |_| remove(technician_id)>
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
                                                            on:click=move |_| confirming.set(Some(technician_id))
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

#[component]
fn NewTechnicianForm(#[prop(into)] busy: Signal<bool>) -> impl IntoView {
    let roster = use_stores().technicians;
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let skills = RwSignal::new(Vec::<IssueCategory>::new());
    let invalid = RwSignal::new(None::<String>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = StaffDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            skills: skills.get_untracked(),
        };
        match draft.validate_technician() {
            Ok(technician) => {
                invalid.set(None);
                [name, email, phone, password].iter().for_each(|field| field.set(String::new()));
                skills.set(Vec::new());
                roster.update(RosterStore::begin);
                dispatch(roster, create_technician(technician), RosterStore::settle_create);
            }
            Err(e) => invalid.set(Some(e.to_string())),
        }
    };

    view! {
        <form class="form" on:submit=submit>
            <h3 class="form__title">"Add technician"</h3>
            <TextField label="Name" value=name/>
            <TextField label="Email" value=email input_type="email"/>
            <TextField label="Phone" value=phone input_type="tel"/>
            <TextField label="Initial password" value=password input_type="password"/>
            <fieldset class="form__group">
                <legend>"Skills"</legend>
                {IssueCategory::KNOWN
                    .into_iter()
                    .map(|skill| {
                        let label = skill.label();
                        let checked_skill = skill.clone();
                        view! {
                            <label class="field field--inline">
                                <input
                                    type="checkbox"
                                    prop:checked=move || skills.with(|s| s.contains(&checked_skill))
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        skills.update(|s| {
                                            s.retain(|existing| *existing != skill);
                                            if on {
                                                s.push(skill.clone());
                                            }
                                        });
                                    }
                                />
                                <span>{label}</span>
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
            </fieldset>
            <FieldError message=invalid/>
            <button type="submit" class="button button--primary" prop:disabled=move || busy.get()>
                "Create technician"
            </button>
        </form>
    }
}
