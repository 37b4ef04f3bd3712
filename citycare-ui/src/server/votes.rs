use citycare_app::application::{VoteCommand, VoteSnapshot};
use citycare_app::domain::IssueId;
use leptos::prelude::*;
use server_fn::ServerFnError;

/// Anonymous visitors get counts and comments; citizens also get their vote.
#[server(FetchVoteSnapshot, "/api", endpoint = "fetch_vote_snapshot", input = server_fn::codec::Json)]
pub async fn fetch_vote_snapshot(issue_id: IssueId) -> Result<VoteSnapshot, ServerFnError> {
    use citycare_errors::AppError;

    let session = super::session::current().await?;
    super::session::backend()?
        .vote_snapshot(session.as_ref(), issue_id)
        .await
        .map_err(AppError::into_server_error)
}

#[server(ApplyVoteCommand, "/api", endpoint = "apply_vote_command", input = server_fn::codec::Json)]
pub async fn apply_vote_command(command: VoteCommand) -> Result<(), ServerFnError> {
    use citycare_app::domain::Role;
    use citycare_errors::AppError;

    let session = super::session::require(&[Role::Citizen]).await?;
    let backend = super::session::backend()?;
    let outcome = match &command {
        VoteCommand::Submit {
            issue_id,
            upvote,
            comment,
        } => {
            backend
                .cast_vote(&session, *issue_id, *upvote, comment.as_deref())
                .await
        }
        VoteCommand::Delete { issue_id } => backend.delete_vote(&session, *issue_id).await,
    };

    outcome.map_err(AppError::into_server_error)
}
