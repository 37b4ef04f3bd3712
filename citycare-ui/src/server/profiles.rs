use citycare_app::domain::{CitizenProfile, PasswordChange, ProfileUpdate, StaffProfile, Technician};
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(FetchCitizenProfile, "/api", endpoint = "fetch_citizen_profile")]
pub async fn fetch_citizen_profile() -> Result<CitizenProfile, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Citizen]).await?;
    super::session::backend()?
        .profile(&session)
        .await
        .map_err(AppError::into_server_error)
}

/// Officers and heads share the same profile shape.
#[server(FetchStaffProfile, "/api", endpoint = "fetch_staff_profile")]
pub async fn fetch_staff_profile() -> Result<StaffProfile, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer, Role::Head]).await?;
    super::session::backend()?
        .profile(&session)
        .await
        .map_err(AppError::into_server_error)
}

#[server(FetchTechnicianProfile, "/api", endpoint = "fetch_technician_profile")]
pub async fn fetch_technician_profile() -> Result<Technician, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Technician]).await?;
    super::session::backend()?
        .profile(&session)
        .await
        .map_err(AppError::into_server_error)
}

#[server(UpdateCitizenProfile, "/api", endpoint = "update_citizen_profile", input = server_fn::codec::Json)]
pub async fn update_citizen_profile(update: ProfileUpdate) -> Result<CitizenProfile, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Citizen]).await?;
    let backend = super::session::backend()?;
    let message = backend
        .update_citizen_profile(&session, &update)
        .await
        .map_err(AppError::into_server_error)?;
    tracing::info!("Citizen profile saved: {}", message);

    // The backend only confirms; the saved profile has to be read back.
    backend
        .profile(&session)
        .await
        .map_err(AppError::into_server_error)
}

#[server(UpdateStaffProfile, "/api", endpoint = "update_staff_profile", input = server_fn::codec::Json)]
pub async fn update_staff_profile(update: ProfileUpdate) -> Result<StaffProfile, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer, Role::Head]).await?;
    super::session::backend()?
        .update_profile(&session, 0, &update)
        .await
        .map_err(AppError::into_server_error)
}

#[server(UpdateTechnicianProfile, "/api", endpoint = "update_technician_profile", input = server_fn::codec::Json)]
pub async fn update_technician_profile(
    technician_id: i64,
    update: ProfileUpdate,
) -> Result<Technician, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Technician]).await?;
    super::session::backend()?
        .update_profile(&session, technician_id, &update)
        .await
        .map_err(AppError::into_server_error)
}

/// `profile_id` only matters for technicians, whose password path carries it.
#[server(ChangePassword, "/api", endpoint = "change_password", input = server_fn::codec::Json)]
pub async fn change_password(profile_id: i64, change: PasswordChange) -> Result<String, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&Role::ALL).await?;
    let message = super::session::backend()?
        .update_password(&session, profile_id, &change)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("Password changed for {}", session.role);
    Ok(message)
}
