mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::Repository;

use async_trait::async_trait;
use tokio_postgres::error::SqlState;

use crate::models::{Note, NoteChanges, NoteId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note rejected by store: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        let rejected = matches!(
            e.code(),
            Some(code) if *code == SqlState::CHECK_VIOLATION || *code == SqlState::NOT_NULL_VIOLATION
        );
        if !rejected {
            return Self::Persistence(Box::new(e));
        }

        let reason = e
            .as_db_error()
            .map_or_else(|| e.to_string(), |db| db.message().to_string());
        Self::Validation(reason)
    }
}

/// Durable collection of notes keyed by a store-assigned id.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(&self, title: String, content: String) -> Result<Note, StoreError>;

    /// All notes in storage order.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn get(&self, id: NoteId) -> Result<Option<Note>, StoreError>;

    /// Merges `changes` into the stored note and refreshes `updated_at`.
    /// Returns `None` when no note has that id.
    async fn update(&self, id: NoteId, changes: NoteChanges) -> Result<Option<Note>, StoreError>;

    /// Returns whether a note was removed. An absent id is not an error.
    async fn delete(&self, id: NoteId) -> Result<bool, StoreError>;
}
