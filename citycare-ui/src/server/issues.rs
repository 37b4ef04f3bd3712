use citycare_app::application::IssueCollection;
use citycare_app::domain::{Issue, IssueId, IssueStatus, NewIssue};
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(FetchIssues, "/api", endpoint = "fetch_issues", input = server_fn::codec::Json)]
pub async fn fetch_issues(collection: IssueCollection) -> Result<Vec<Issue>, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let backend = super::session::backend()?;
    let issues = match collection {
        IssueCollection::Mine => {
            let session = super::session::require(&[Role::Citizen]).await?;
            backend.my_issues(&session).await
        }
        IssueCollection::All => {
            let session = super::session::require(&[Role::Officer]).await?;
            backend.all_issues(&session).await
        }
        IssueCollection::Assigned => {
            let session = super::session::require(&[Role::Technician]).await?;
            backend.assigned_issues(&session).await
        }
    };

    issues.map_err(AppError::into_server_error)
}

#[server(FetchPublicIssues, "/api", endpoint = "fetch_public_issues")]
pub async fn fetch_public_issues() -> Result<Vec<Issue>, ServerFnError> {
    use citycare_errors::AppError;

    let session = super::session::current().await?;
    super::session::backend()?
        .public_issues(session.as_ref())
        .await
        .map_err(AppError::into_server_error)
}

#[server(CreateIssue, "/api", endpoint = "create_issue", input = server_fn::codec::Json)]
pub async fn create_issue(issue: NewIssue) -> Result<Issue, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Citizen]).await?;
    let created = super::session::backend()?
        .create_issue(&session, &issue)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("Issue {} reported", created.id);
    Ok(created)
}

#[server(DeleteIssue, "/api", endpoint = "delete_issue", input = server_fn::codec::Json)]
pub async fn delete_issue(issue_id: IssueId) -> Result<(), ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Citizen]).await?;
    super::session::backend()?
        .delete_issue(&session, issue_id)
        .await
        .map_err(AppError::into_server_error)
}

#[server(AssignTechnicians, "/api", endpoint = "assign_technicians", input = server_fn::codec::Json)]
pub async fn assign_technicians(
    issue_id: IssueId,
    technician_ids: Vec<i64>,
) -> Result<Issue, ServerFnError> {
    use citycare_app::application::validation::validate_assignment;
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Officer]).await?;
    let technician_ids = validate_assignment(&technician_ids)
        .map_err(|e| AppError::backend(400, &e.to_string()).into_server_error())?;

    super::session::backend()?
        .assign_technicians(&session, issue_id, &technician_ids)
        .await
        .map_err(AppError::into_server_error)
}

#[server(UpdateIssueStatus, "/api", endpoint = "update_issue_status", input = server_fn::codec::Json)]
pub async fn update_issue_status(
    issue_id: IssueId,
    status: IssueStatus,
) -> Result<Issue, ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Technician]).await?;
    let updated = super::session::backend()?
        .update_status(&session, issue_id, status)
        .await
        .map_err(AppError::into_server_error)?;

    tracing::info!("Issue {} moved to {}", issue_id, updated.status);
    Ok(updated)
}
