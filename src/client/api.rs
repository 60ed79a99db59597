use async_trait::async_trait;
use reqwest::{Response, StatusCode};

use super::NoteDraft;
use crate::{
    dto::{CreateNoteRequest, MessageResponse, NoteResponse, UpdateNoteRequest},
    models::NoteId,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Requests the note board issues against the server.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list(&self) -> Result<Vec<NoteResponse>, ClientError>;

    async fn create(&self, draft: &NoteDraft) -> Result<NoteResponse, ClientError>;

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<NoteResponse, ClientError>;

    async fn delete(&self, id: NoteId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesApi {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{id}", self.base_url)
    }
}

impl Default for HttpNotesApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body).map_or(body, |m| m.message);

    Err(ClientError::Status { status, message })
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list(&self) -> Result<Vec<NoteResponse>, ClientError> {
        let response = self.client.get(self.notes_url()).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create(&self, draft: &NoteDraft) -> Result<NoteResponse, ClientError> {
        let body = CreateNoteRequest {
            title: draft.title.clone(),
            content: draft.content.clone(),
        };
        let response = self.client.post(self.notes_url()).json(&body).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<NoteResponse, ClientError> {
        let body = UpdateNoteRequest {
            title: Some(draft.title.clone()),
            content: Some(draft.content.clone()),
        };
        let response = self.client.put(self.note_url(id)).json(&body).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn delete(&self, id: NoteId) -> Result<(), ClientError> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
