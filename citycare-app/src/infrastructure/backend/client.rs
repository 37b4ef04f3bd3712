use crate::application::VoteSnapshot;
use crate::domain::{
    AuthResponse, Issue, IssueId, IssueStatus, LoginRequest, MyVote, NewIssue, NewOfficer,
    NewTechnician, Officer, OtpRequest, PasswordChange, ProfileUpdate, Role, SessionContext,
    SignupRequest, Technician, Vote, VoteCounts,
};
use citycare_errors::AppError;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the CityCare REST backend.
///
/// Holds no per-user state: every authenticated call takes the caller's
/// [`SessionContext`].
pub struct CityCareClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CityCareClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, session: Option<&SessionContext>) -> RequestBuilder {
        authorize(self.http_client.get(self.url(path)), session)
    }

    fn post(&self, path: &str, session: Option<&SessionContext>) -> RequestBuilder {
        authorize(self.http_client.post(self.url(path)), session)
    }

    fn put(&self, path: &str, session: &SessionContext) -> RequestBuilder {
        authorize(self.http_client.put(self.url(path)), Some(session))
    }

    fn patch(&self, path: &str, session: &SessionContext) -> RequestBuilder {
        authorize(self.http_client.patch(self.url(path)), Some(session))
    }

    fn delete(&self, path: &str, session: &SessionContext) -> RequestBuilder {
        authorize(self.http_client.delete(self.url(path)), Some(session))
    }

    /// Sends the request and turns any non-2xx answer into [`AppError::Backend`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("CityCare backend unreachable: {}", e);
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().path().to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("CityCare backend error on {}: {} - {}", url, status, body);
            return Err(AppError::backend(status.as_u16(), &body));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), AppError> {
        self.send(request).await.map(drop)
    }

    /// Sends the request and returns the backend's confirmation text.
    async fn confirm(&self, request: RequestBuilder) -> Result<String, AppError> {
        let body = self
            .send(request)
            .await?
            .text()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(confirmation_text(&body))
    }

    // Auth

    pub async fn send_otp(&self, request: &OtpRequest) -> Result<(), AppError> {
        self.execute(self.post("/auth/send-otp", None).json(request))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.fetch(self.post("/auth/login", None).json(request))
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, AppError> {
        self.fetch(self.post("/auth/signup", None).json(request))
            .await
    }

    // Issues

    pub async fn create_issue(
        &self,
        session: &SessionContext,
        issue: &NewIssue,
    ) -> Result<Issue, AppError> {
        self.fetch(self.post("/api/issues/create", Some(session)).json(issue))
            .await
    }

    pub async fn my_issues(&self, session: &SessionContext) -> Result<Vec<Issue>, AppError> {
        self.fetch(self.get("/api/issues/my-issues", Some(session)))
            .await
    }

    pub async fn all_issues(&self, session: &SessionContext) -> Result<Vec<Issue>, AppError> {
        self.fetch(self.get("/api/issues/all", Some(session))).await
    }

    pub async fn public_issues(
        &self,
        session: Option<&SessionContext>,
    ) -> Result<Vec<Issue>, AppError> {
        self.fetch(self.get("/api/issues/all-public", session)).await
    }

    pub async fn assigned_issues(&self, session: &SessionContext) -> Result<Vec<Issue>, AppError> {
        self.fetch(self.get("/api/issues/my-assigned", Some(session)))
            .await
    }

    pub async fn delete_issue(&self, session: &SessionContext, id: IssueId) -> Result<(), AppError> {
        self.execute(self.delete(&format!("/api/issues/{id}"), session))
            .await
    }

    pub async fn assign_technicians(
        &self,
        session: &SessionContext,
        id: IssueId,
        technician_ids: &[i64],
    ) -> Result<Issue, AppError> {
        let path = format!("/api/issues/{id}/assign-technicians");
        self.fetch(self.post(&path, Some(session)).json(technician_ids))
            .await
    }

    pub async fn update_status(
        &self,
        session: &SessionContext,
        id: IssueId,
        status: IssueStatus,
    ) -> Result<Issue, AppError> {
        let path = format!("/api/issues/{id}/update-status");
        self.fetch(
            self.patch(&path, session)
                .query(&[("status", status.as_str())]),
        )
        .await
    }

    // Votes

    pub async fn vote_counts(
        &self,
        session: Option<&SessionContext>,
        issue_id: IssueId,
    ) -> Result<VoteCounts, AppError> {
        self.fetch(self.get(&format!("/api/votes/{issue_id}/count"), session))
            .await
    }

    pub async fn vote_comments(
        &self,
        session: Option<&SessionContext>,
        issue_id: IssueId,
    ) -> Result<Vec<Vote>, AppError> {
        self.fetch(self.get(&format!("/api/votes/{issue_id}/comments"), session))
            .await
    }

    /// A 404 or an empty/`null` body both mean the caller has not voted.
    pub async fn my_vote(
        &self,
        session: &SessionContext,
        issue_id: IssueId,
    ) -> Result<MyVote, AppError> {
        let request = self.get(&format!("/api/votes/{issue_id}/my-vote"), Some(session));
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(MyVote::NoVote),
            Err(err) => return Err(err),
        };

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(MyVote::NoVote);
        }

        serde_json::from_str::<Option<Vote>>(&body)
            .map(MyVote::from)
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    /// Counts, comments and, for a signed-in citizen, their own vote. A failed
    /// own-vote lookup only flags that part; counts and comments still load.
    pub async fn vote_snapshot(
        &self,
        session: Option<&SessionContext>,
        issue_id: IssueId,
    ) -> Result<VoteSnapshot, AppError> {
        let counts = self.vote_counts(session, issue_id).await?;
        let comments = self.vote_comments(session, issue_id).await?;
        let (my_vote, my_vote_unavailable) = match session {
            Some(session) if session.role == Role::Citizen => {
                match self.my_vote(session, issue_id).await {
                    Ok(my_vote) => (my_vote, false),
                    Err(e) => {
                        tracing::warn!("Own vote on issue {} unavailable: {}", issue_id, e);
                        (MyVote::NoVote, true)
                    }
                }
            }
            _ => (MyVote::NoVote, false),
        };

        Ok(VoteSnapshot {
            counts,
            my_vote,
            comments,
            my_vote_unavailable,
        })
    }

    pub async fn cast_vote(
        &self,
        session: &SessionContext,
        issue_id: IssueId,
        upvote: bool,
        comment: Option<&str>,
    ) -> Result<(), AppError> {
        let mut query = vec![("upvote", upvote.to_string())];
        if let Some(comment) = comment {
            query.push(("comment", comment.to_string()));
        }
        let path = format!("/api/votes/{issue_id}");
        self.execute(self.post(&path, Some(session)).query(&query))
            .await
    }

    pub async fn delete_vote(
        &self,
        session: &SessionContext,
        issue_id: IssueId,
    ) -> Result<(), AppError> {
        self.execute(self.delete(&format!("/api/votes/{issue_id}"), session))
            .await
    }

    // Profiles

    /// Loads the signed-in user's own profile; the shape depends on the role.
    pub async fn profile<P: DeserializeOwned>(
        &self,
        session: &SessionContext,
    ) -> Result<P, AppError> {
        let path = match session.role {
            Role::Citizen => "/api/citizen/profile",
            Role::Officer => "/api/officer/me",
            Role::Head => "/api/head/me",
            Role::Technician => "/auth/technicians",
        };
        self.fetch(self.get(path, Some(session))).await
    }

    /// Citizens get a confirmation message back, not the saved profile.
    pub async fn update_citizen_profile(
        &self,
        session: &SessionContext,
        update: &ProfileUpdate,
    ) -> Result<String, AppError> {
        self.confirm(self.put("/api/citizen/profile", session).json(update))
            .await
    }

    /// Officers, heads and technicians get the saved profile back. `id` is
    /// only part of the path for technicians.
    pub async fn update_profile<P: DeserializeOwned>(
        &self,
        session: &SessionContext,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<P, AppError> {
        let path = profile_path(session.role, id);
        self.fetch(self.put(&path, session).json(update)).await
    }

    /// Returns the backend's confirmation text, possibly empty.
    pub async fn update_password(
        &self,
        session: &SessionContext,
        id: i64,
        change: &PasswordChange,
    ) -> Result<String, AppError> {
        let path = format!("{}/password", profile_path(session.role, id));
        let request = self.put(&path, session).query(&[
            ("oldPassword", change.old_password.as_str()),
            ("newPassword", change.new_password.as_str()),
        ]);
        self.confirm(request).await
    }

    // Rosters

    pub async fn technicians(&self, session: &SessionContext) -> Result<Vec<Technician>, AppError> {
        self.fetch(self.get("/api/officer/technicians", Some(session)))
            .await
    }

    pub async fn create_technician(
        &self,
        session: &SessionContext,
        technician: &NewTechnician,
    ) -> Result<Technician, AppError> {
        self.fetch(
            self.post("/api/officer/create-technician", Some(session))
                .json(technician),
        )
        .await
    }

    pub async fn delete_technician(&self, session: &SessionContext, id: i64) -> Result<(), AppError> {
        self.execute(self.delete(&format!("/api/officer/technicians/{id}"), session))
            .await
    }

    pub async fn officers(&self, session: &SessionContext) -> Result<Vec<Officer>, AppError> {
        self.fetch(self.get("/api/head/officers", Some(session)))
            .await
    }

    pub async fn create_officer(
        &self,
        session: &SessionContext,
        officer: &NewOfficer,
    ) -> Result<Officer, AppError> {
        self.fetch(self.post("/api/head/create-officer", Some(session)).json(officer))
            .await
    }

    pub async fn delete_officer(&self, session: &SessionContext, id: i64) -> Result<(), AppError> {
        self.execute(self.delete(&format!("/api/head/officers/{id}"), session))
            .await
    }
}

fn authorize(request: RequestBuilder, session: Option<&SessionContext>) -> RequestBuilder {
    match session {
        Some(session) => request.header(reqwest::header::AUTHORIZATION, session.bearer()),
        None => request,
    }
}

fn profile_path(role: Role, id: i64) -> String {
    match role {
        Role::Citizen => "/api/citizen/profile".to_string(),
        Role::Officer => "/api/officer/me".to_string(),
        Role::Head => "/api/head/me".to_string(),
        Role::Technician => format!("/auth/technicians/{id}"),
    }
}

/// Success bodies are a bare string, a JSON string or an object with a message.
fn confirmation_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text,
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => body.trim().to_string(),
    }
}
