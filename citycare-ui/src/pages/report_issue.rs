use crate::components::{FieldError, Notice, RequireRole, StoreError, TextArea, TextField};
use crate::server::create_issue;
use crate::state::{error_message, use_stores};
use citycare_app::application::validation::IssueDraft;
use citycare_app::application::IssueStore;
use citycare_app::domain::{IssueCategory, Role};
use citycare_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ReportIssuePage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Citizen]>
            <ReportIssueForm/>
        </RequireRole>
    }
}

#[component]
fn ReportIssueForm() -> impl IntoView {
    let stores = use_stores();
    let issues = stores.issues;

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let address_name = RwSignal::new(String::new());
    let street_address = RwSignal::new(String::new());
    let locality = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let state = RwSignal::new(String::new());
    let pin_code = RwSignal::new(String::new());
    let mobile = RwSignal::new(String::new());
    let latitude = RwSignal::new(String::new());
    let longitude = RwSignal::new(String::new());
    let image_urls = RwSignal::new(String::new());
    let invalid = RwSignal::new(None::<String>);

    let fields = [
        title,
        description,
        category,
        address_name,
        street_address,
        locality,
        city,
        state,
        pin_code,
        mobile,
        latitude,
        longitude,
        image_urls,
    ];

    issues.update(IssueStore::clear_messages);
    let busy = Signal::derive(move || issues.with(IssueStore::loading));
    let success = Signal::derive(move || issues.with(|s| s.success_message().map(str::to_string)));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = IssueDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            address_name: address_name.get_untracked(),
            street_address: street_address.get_untracked(),
            locality: locality.get_untracked(),
            city: city.get_untracked(),
            state: state.get_untracked(),
            pin_code: pin_code.get_untracked(),
            mobile: mobile.get_untracked(),
            latitude: latitude.get_untracked(),
            longitude: longitude.get_untracked(),
            image_urls: image_urls.get_untracked(),
        };
        let new_issue = match draft.validate() {
            Ok(new_issue) => new_issue,
            Err(e) => {
                invalid.set(Some(e.to_string()));
                return;
            }
        };
        invalid.set(None);
        issues.update(IssueStore::begin);

        spawn_local(async move {
            let outcome = create_issue(new_issue)
                .await
                .map_err(AppError::from_server_error);
            let created = outcome.is_ok();
            issues.update(|store| store.settle_create(outcome));
            if created {
                fields.iter().for_each(|field| field.set(String::new()));
            }
        });
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Report an issue"</h1>
            <form class="form" on:submit=submit>
                <TextField label="Title" value=title placeholder="e.g. Deep pothole near the bus stop"/>
                <TextArea label="Description" value=description/>
                <label class="field">
                    <span class="field__label">"Category"</span>
                    <select
                        class="field__input"
                        prop:value=move || category.get()
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        <option value="">"Select a category"</option>
                        {IssueCategory::KNOWN
                            .into_iter()
                            .map(|option| view! {
                                <option value=option.as_str().to_string()>{option.label()}</option>
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </label>

                <fieldset class="form__group">
                    <legend>"Address"</legend>
                    <TextField label="Place name" value=address_name/>
                    <TextField label="Street address" value=street_address/>
                    <TextField label="Locality" value=locality/>
                    <TextField label="City" value=city/>
                    <TextField label="State" value=state/>
                    <TextField label="PIN code" value=pin_code/>
                    <TextField label="Contact number" value=mobile input_type="tel"/>
                </fieldset>

                <fieldset class="form__group">
                    <legend>"Location"</legend>
                    <TextField label="Latitude" value=latitude placeholder="12.9716"/>
                    <TextField label="Longitude" value=longitude placeholder="77.5946"/>
                </fieldset>

                <TextArea label="Photo links (one per line)" value=image_urls/>

                <FieldError message=invalid/>
                <StoreError message=error_message(issues, IssueStore::error)/>
                <Notice message=success/>
                <button type="submit" class="button button--primary" prop:disabled=move || busy.get()>
                    {move || if busy.get() { "Submitting..." } else { "Submit issue" }}
                </button>
            </form>
        </div>
    }
}
