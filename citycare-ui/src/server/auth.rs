use citycare_app::domain::{LoginRequest, OtpRequest, Role, SignupRequest};
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(CurrentRole, "/api", endpoint = "current_role")]
pub async fn current_role() -> Result<Option<Role>, ServerFnError> {
    Ok(super::session::current().await?.map(|context| context.role))
}

#[server(SendOtp, "/api", endpoint = "send_otp", input = server_fn::codec::Json)]
pub async fn send_otp(request: OtpRequest) -> Result<(), ServerFnError> {
    use citycare_errors::AppError;

    super::session::backend()?
        .send_otp(&request)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("OTP sent for {} sign-in", request.role);
    Ok(())
}

#[server(Login, "/api", endpoint = "login", input = server_fn::codec::Json)]
pub async fn login(request: LoginRequest) -> Result<Role, ServerFnError> {
    use citycare_app::domain::SessionContext;
    use citycare_errors::AppError;

    let auth = super::session::backend()?
        .login(&request)
        .await
        .map_err(AppError::into_server_error)?;

    let context = SessionContext::from(auth);
    let role = context.role;
    super::session::start(context).await?;

    tracing::info!("Session started for {}", role);
    Ok(role)
}

#[server(Signup, "/api", endpoint = "signup", input = server_fn::codec::Json)]
pub async fn signup(request: SignupRequest) -> Result<Role, ServerFnError> {
    use citycare_app::domain::SessionContext;
    use citycare_errors::AppError;

    let auth = super::session::backend()?
        .signup(&request)
        .await
        .map_err(AppError::into_server_error)?;

    let context = SessionContext::from(auth);
    let role = context.role;
    super::session::start(context).await?;

    tracing::info!("Account created, session started for {}", role);
    Ok(role)
}

#[server(Logout, "/api", endpoint = "logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    super::session::end().await?;
    tracing::info!("Session ended");
    Ok(())
}
