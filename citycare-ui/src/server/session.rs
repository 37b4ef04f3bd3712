use citycare_app::domain::{Role, SessionContext};
use citycare_app::infrastructure::backend::CityCareClient;
use citycare_app::AppContext;
use citycare_errors::AppError;
use leptos::prelude::*;
use server_fn::ServerFnError;
use std::sync::Arc;
use tower_sessions::Session;

const SESSION_KEY: &str = "citycare.session";

async fn handle() -> Result<Session, ServerFnError> {
    leptos_axum::extract::<Session>()
        .await
        .map_err(|e| ServerFnError::new(format!("{e:?}")))
}

fn internal(err: impl std::fmt::Display) -> ServerFnError {
    AppError::Internal(err.to_string()).into_server_error()
}

pub(crate) fn backend() -> Result<Arc<CityCareClient>, ServerFnError> {
    use_context::<AppContext>()
        .map(|ctx| ctx.backend)
        .ok_or_else(|| internal("AppContext not provided"))
}

pub(crate) async fn current() -> Result<Option<SessionContext>, ServerFnError> {
    handle()
        .await?
        .get::<SessionContext>(SESSION_KEY)
        .await
        .map_err(internal)
}

/// The caller's session, if they hold one of `roles`.
pub(crate) async fn require(roles: &[Role]) -> Result<SessionContext, ServerFnError> {
    let context = current()
        .await?
        .ok_or_else(|| AppError::Unauthenticated.into_server_error())?;

    if !roles.contains(&context.role) {
        tracing::warn!("{} denied access to a {:?} operation", context.role, roles);
        return Err(AppError::Forbidden.into_server_error());
    }

    Ok(context)
}

pub(crate) async fn start(context: SessionContext) -> Result<(), ServerFnError> {
    let session = handle().await?;
    session.cycle_id().await.map_err(internal)?;
    session
        .insert(SESSION_KEY, context)
        .await
        .map_err(internal)
}

pub(crate) async fn end() -> Result<(), ServerFnError> {
    handle().await?.flush().await.map_err(internal)
}
