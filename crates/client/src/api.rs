//! REST client for the club backend.
//!
//! Wraps the `/api/v1` endpoints used by the task and participant admin
//! screens using [`reqwest`].

use clubhub_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::form::TaskForm;
use crate::models::{Event, Member, TaskRecord};

/// Path prefix every REST route is mounted under.
const API_PREFIX: &str = "/api/v1";

/// HTTP client for one backend instance.
#[derive(Debug, Clone)]
pub struct ClubClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Error body the server sends with every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

impl ClubClient {
    /// * `base_url` - Server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a session token, sent as `Authorization: Bearer`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /* ----------------------------------------------------------------------
    Roster
    ---------------------------------------------------------------------- */

    pub async fn list_members(&self) -> Result<Vec<Member>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/members").send().await?;
        Self::parse_response(response).await
    }

    /* ----------------------------------------------------------------------
    Tasks
    ---------------------------------------------------------------------- */

    pub async fn list_tasks(&self, event_id: DbId) -> Result<Vec<TaskRecord>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/tasks/{event_id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn get_task(&self, event_id: DbId, task_id: DbId) -> Result<TaskRecord, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/tasks/{event_id}/{task_id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Create the task for an event.
    ///
    /// The form is validated first; an incomplete form never reaches the
    /// network.
    pub async fn create_task(
        &self,
        event_id: DbId,
        form: &TaskForm,
    ) -> Result<TaskRecord, ClientError> {
        form.validate()?;
        let response = self
            .request(reqwest::Method::POST, &format!("/tasks/{event_id}"))
            .json(&form.to_payload())
            .send()
            .await?;
        let task: TaskRecord = Self::parse_response(response).await?;
        tracing::info!(event_id, task_id = task.id, "Task created");
        Ok(task)
    }

    /// Replace a task's deadline, status and every category list. Validated
    /// like [`create_task`](Self::create_task).
    pub async fn update_task(
        &self,
        event_id: DbId,
        task_id: DbId,
        form: &TaskForm,
    ) -> Result<TaskRecord, ClientError> {
        form.validate()?;
        let response = self
            .request(reqwest::Method::PUT, &format!("/tasks/{event_id}/{task_id}"))
            .json(&form.to_payload())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn delete_task(&self, event_id: DbId, task_id: DbId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/tasks/{event_id}/{task_id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /* ----------------------------------------------------------------------
    Participants
    ---------------------------------------------------------------------- */

    /// Add participants from pasted, comma-separated student codes.
    pub async fn add_participants(&self, event_id: DbId, raw_ids: &str) -> Result<Event, ClientError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/events/{event_id}/participants"),
            )
            .json(&json!({ "studentIds": raw_ids }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn remove_participants(
        &self,
        event_id: DbId,
        student_ids: &[&str],
    ) -> Result<Event, ClientError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/events/{event_id}/participants"),
            )
            .json(&json!({ "studentIds": student_ids }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{API_PREFIX}{path}", self.base_url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-2xx response to [`ClientError::Api`], reading the server's
    /// `{error, code}` body when there is one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => (String::new(), text),
        };
        tracing::warn!(status = status.as_u16(), %code, %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
