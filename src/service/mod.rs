use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::NoteId,
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(reason) => Self::Validation(reason),
            StoreError::Persistence(source) => Self::Persistence(source),
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        require_text("title", &request.title)?;
        require_text("content", &request.content)?;

        let note = self.store.create(request.title, request.content).await?;
        tracing::debug!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: NoteId,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        if let Some(title) = &request.title {
            require_text("title", title)?;
        }
        if let Some(content) = &request.content {
            require_text("content", content)?;
        }

        self.store
            .update(id, request.into())
            .await?
            .map(NoteResponse::from)
            .ok_or(ServiceError::NotFound(id))
    }

    /// Returns whether a note was actually removed.
    pub async fn delete_note(&self, id: NoteId) -> Result<bool, ServiceError> {
        let removed = self.store.delete(id).await?;
        if !removed {
            tracing::debug!("delete of absent note {} ignored", id);
        }
        Ok(removed)
    }

    pub async fn get_one_note(&self, id: NoteId) -> Result<NoteResponse, ServiceError> {
        self.store
            .get(id)
            .await?
            .map(NoteResponse::from)
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.store.list().await?;
        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
