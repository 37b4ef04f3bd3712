use crate::components::{FieldError, Notice, StoreError, TextField};
use crate::server::{send_otp, signup};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::validation::{self, SignupDraft};
use citycare_app::application::AuthState;
use citycare_app::domain::{OtpRequest, Role};
use citycare_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Citizen self-registration; staff accounts are created by their managers.
#[component]
pub fn SignupPage() -> impl IntoView {
    let stores = use_stores();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
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
                role: Role::Citizen,
            };
            stores.auth.update(AuthState::begin);
            dispatch(stores.auth, send_otp(request), AuthState::settle_otp);
        }
        Err(e) => invalid.set(Some(e.to_string())),
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = SignupDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            otp: otp.get_untracked(),
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
            let outcome = signup(request).await.map_err(AppError::from_server_error);
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
            <h1 class="page-title">"Create an account"</h1>
            <form class="form" on:submit=submit>
                <TextField label="Full name" value=name/>
                <TextField label="Email" value=email input_type="email"/>
                <TextField label="Phone" value=phone input_type="tel"/>
                <TextField label="Password" value=password input_type="password"/>
                <TextField label="Confirm password" value=confirm_password input_type="password"/>
                <button type="button" class="button" prop:disabled=move || busy.get() on:click=request_otp>
                    "Send OTP"
                </button>
                <TextField label="OTP" value=otp/>
                <Notice message=otp_notice/>
                <FieldError message=invalid/>
                <StoreError message=error_message(stores.auth, AuthState::error)/>
                <button type="submit" class="button button--primary" prop:disabled=move || busy.get()>
                    {move || if busy.get() { "Please wait..." } else { "Sign up" }}
                </button>
            </form>
            <p class="auth-page__alt">"Already registered? " <a href="/login">"Log in"</a></p>
        </div>
    }
}
