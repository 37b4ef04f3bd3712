use super::{FieldError, TextField};
use citycare_app::application::validation::PasswordDraft;
use citycare_app::domain::PasswordChange;
use leptos::prelude::*;

#[component]
pub fn PasswordForm(
    #[prop(into)] on_submit: Callback<PasswordChange>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let invalid = RwSignal::new(None::<String>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = PasswordDraft {
            old_password: old_password.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        match draft.validate() {
            Ok(change) => {
                invalid.set(None);
                old_password.set(String::new());
                new_password.set(String::new());
                confirm_password.set(String::new());
                on_submit.run(change);
            }
            Err(e) => invalid.set(Some(e.to_string())),
        }
    };

    view! {
        <form class="form" on:submit=submit>
            <h3 class="form__title">"Change password"</h3>
            <TextField label="Current password" value=old_password input_type="password"/>
            <TextField label="New password" value=new_password input_type="password"/>
            <TextField label="Confirm new password" value=confirm_password input_type="password"/>
            <FieldError message=invalid/>
            <button type="submit" class="button" prop:disabled=move || busy.get()>
                "Update password"
            </button>
        </form>
    }
}
