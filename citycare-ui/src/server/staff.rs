use citycare_app::domain::{NewOfficer, NewTechnician, Officer, Technician};
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(ListTechnicians, "/api", endpoint = "list_technicians")]
pub async fn list_technicians() -> Result<Vec<Technician>, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer]).await?;
    super::session::backend()?
        .technicians(&session)
        .await
        .map_err(AppError::into_server_error)
}

#[server(CreateTechnician, "/api", endpoint = "create_technician", input = server_fn::codec::Json)]
pub async fn create_technician(technician: NewTechnician) -> Result<Technician, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer]).await?;
    let created = super::session::backend()?
        .create_technician(&session, &technician)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("Technician {} created", created.id);
    Ok(created)
}

#[server(DeleteTechnician, "/api", endpoint = "delete_technician", input = server_fn::codec::Json)]
pub async fn delete_technician(technician_id: i64) -> Result<(), ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer]).await?;
    super::session::backend()?
        .delete_technician(&session, technician_id)
        .await
        .map_err(AppError::into_server_error)
}

#[server(ListOfficers, "/api", endpoint = "list_officers")]
pub async fn list_officers() -> Result<Vec<Officer>, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Head]).await?;
    super::session::backend()?
        .officers(&session)
        .await
        .map_err(AppError::into_server_error)
}

#[server(CreateOfficer, "/api", endpoint = "create_officer", input = server_fn::codec::Json)]
pub async fn create_officer(officer: NewOfficer) -> Result<Officer, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Head]).await?;
    let created = super::session::backend()?
        .create_officer(&session, &officer)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("Officer {} created", created.id);
    Ok(created)
}

#[server(DeleteOfficer, "/api", endpoint = "delete_officer", input = server_fn::codec::Json)]
pub async fn delete_officer(officer_id: i64) -> Result<(), ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Head]).await?;
    super::session::backend()?
        .delete_officer(&session, officer_id)
        .await
        .map_err(AppError::into_server_error)
}
