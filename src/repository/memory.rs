use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::{Note, NoteChanges, NoteId};

/// In-process note store. Ids grow monotonically, so map order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    notes: BTreeMap<NoteId, Note>,
    last_id: NoteId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_field(name: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{name} is required")));
    }
    Ok(())
}

fn later_than(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, title: String, content: String) -> Result<Note, StoreError> {
        check_field("title", &title)?;
        check_field("content", &content)?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let note = Note {
            id: inner.last_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        inner.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.inner.read().await.notes.values().cloned().collect())
    }

    async fn get(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.inner.read().await.notes.get(&id).cloned())
    }

    async fn update(&self, id: NoteId, changes: NoteChanges) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(note) = inner.notes.get_mut(&id) else {
            return Ok(None);
        };

        let title = changes.title.unwrap_or_else(|| note.title.clone());
        let content = changes.content.unwrap_or_else(|| note.content.clone());
        check_field("title", &title)?;
        check_field("content", &content)?;

        note.title = title;
        note.content = content;
        note.updated_at = later_than(note.updated_at);

        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create("a".into(), "b".into()).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());

        let second = store.create("c".into(), "d".into()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for title in ["one", "two", "three"] {
            store.create(title.into(), "body".into()).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn rejected_merge_leaves_note_untouched() {
        let store = MemoryStore::new();
        let note = store.create("title".into(), "content".into()).await.unwrap();

        let result = store
            .update(
                note.id,
                NoteChanges {
                    title: Some("   ".into()),
                    content: None,
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let stored = store.get(note.id).await.unwrap().unwrap();
        assert_eq!(stored, note);
    }

    #[tokio::test]
    async fn update_of_missing_note_returns_none() {
        let store = MemoryStore::new();
        let result = store.update(42, NoteChanges::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn later_than_always_advances() {
        let future = Utc::now() + TimeDelta::hours(1);
        assert!(later_than(future) > future);
    }
}
