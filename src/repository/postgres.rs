use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::{Note, NoteChanges, NoteId};

const COLUMNS: &str = "id, title, content, created_at, updated_at";

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn create(&self, title: String, content: String) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                &format!("INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING {COLUMNS}"),
                &[&title, &content],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(&format!("SELECT {COLUMNS} FROM notes ORDER BY id"), &[])
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn get(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(&format!("SELECT {COLUMNS} FROM notes WHERE id = $1"), &[&id])
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn update(&self, id: NoteId, changes: NoteChanges) -> Result<Option<Note>, StoreError> {
        // updated_at must move forward even when two writes land within the same clock tick
        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE notes SET \
                        title = COALESCE($1, title), \
                        content = COALESCE($2, content), \
                        updated_at = GREATEST(clock_timestamp(), updated_at + interval '1 microsecond') \
                     WHERE id = $3 RETURNING {COLUMNS}"
                ),
                &[&changes.title, &changes.content, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
