use crate::components::{FieldError, Notice, StoreError, TextField};
use crate::server::{login, send_otp};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::validation::{self, LoginDraft};
use citycare_app::application::AuthState;
use citycare_app::domain::{OtpRequest, Role};
use citycare_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let stores = use_stores();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let use_otp = RwSignal::new(false);
    let role = RwSignal::new(Role::Citizen);
    let invalid = RwSignal::new(None::<String>);

    let busy = Signal::derive(move || stores.auth.with(AuthState::loading));
    let otp_notice = Signal::derive(move || {
        stores
            .auth
            .with(AuthState::otp_sent)
            .then(|| "OTP sent. Check your email.".to_string())
    });

    let request_otp = move |_: leptos::ev::MouseEvent| match validation::validate_email(&email.get_untracked()) {
        Ok(address) => {
            invalid.set(None);
            let request = OtpRequest {
                email: address,
                role: role.get_untracked(),
            };
            stores.auth.update(AuthState::begin);
            dispatch(stores.auth, send_otp(request), AuthState::settle_otp);
        }
        Err(e) => invalid.set(Some(e.to_string())),
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = LoginDraft {
            email: email.get_untracked(),
            secret: secret.get_untracked(),
            use_otp: use_otp.get_untracked(),
            role: role.get_untracked(),
        };
        let request = match draft.validate() {
            Ok(request) => request,
            Err(e) => {
                invalid.set(Some(e.to_string()));
                return;
            }
        };
        invalid.set(None);
        stores.auth.update(AuthState::begin);

        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = login(request).await.map_err(AppError::from_server_error);
            let home = outcome.as_ref().ok().map(Role::home_path);
            if outcome.is_ok() {
                stores.reset();
            }
            stores.auth.update(|auth| auth.settle_login(outcome));
            if let Some(home) = home {
                navigate(home, Default::default());
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1 class="page-title">"Log in"</h1>
            <form class="form" on:submit=submit>
                <label class="field">
                    <span class="field__label">"I am a"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| {
                            role.set(event_target_value(&ev).parse().unwrap_or(Role::Citizen));
                            stores.auth.update(AuthState::reset_otp);
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|option| view! {
                                <option value=option.as_str() selected=move || role.get() == option>
                                    {option.label()}
                                </option>
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <TextField label="Email" value=email input_type="email"/>
                <label class="field field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || use_otp.get()
                        on:change=move |ev| use_otp.set(event_target_checked(&ev))
                    />
                    <span>"Log in with a one-time code"</span>
                </label>
                {move || if use_otp.get() {
                    view! {
                        <button type="button" class="button" prop:disabled=move || busy.get() on:click=request_otp>
                            "Send OTP"
                        </button>
                        <TextField label="OTP" value=secret/>
                    }
                    .into_any()
                } else {
                    view! { <TextField label="Password" value=secret input_type="password"/> }.into_any()
                }}
                <Notice message=otp_notice/>
                <FieldError message=invalid/>
                <StoreError message=error_message(stores.auth, AuthState::error)/>
                <button type="submit" class="button button--primary" prop:disabled=move || busy.get()>
                    {move || if busy.get() { "Please wait..." } else { "Log in" }}
                </button>
            </form>
            <p class="auth-page__alt">"New here? " <a href="/signup">"Create a citizen account"</a></p>
        </div>
    }
}
