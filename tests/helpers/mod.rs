use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use notes_app::{
    build_router,
    client::{ClientError, NoteDraft, NotesApi},
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::NoteId,
    repository::MemoryStore,
    service::NoteService,
};

pub fn memory_service() -> Arc<NoteService> {
    Arc::new(NoteService::new(Arc::new(MemoryStore::new())))
}

/// Router over a fresh in-memory store
#[allow(dead_code)]
pub fn test_router() -> Router {
    build_router(memory_service())
}

/// Sends one request through the router and decodes the JSON body (`Null` when empty or not JSON).
#[allow(dead_code)]
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Ok((status, json))
}

/// `NotesApi` that talks to a `NoteService` directly and can be switched to fail.
#[allow(dead_code)]
pub struct ServiceApi {
    pub service: Arc<NoteService>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ServiceApi {
    pub fn new() -> Self {
        Self {
            service: memory_service(),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, title: &str, content: &str) -> NoteResponse {
        self.service
            .create_note(CreateNoteRequest {
                title: title.to_string(),
                content: content.to_string(),
            })
            .await
            .expect("seeding a valid note")
    }

    fn enter(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "storage failure: disk on fire".to_string(),
            });
        }
        Ok(())
    }
}

fn server_error(e: &notes_app::service::ServiceError) -> ClientError {
    ClientError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: e.to_string(),
    }
}

#[async_trait]
impl NotesApi for ServiceApi {
    async fn list(&self) -> Result<Vec<NoteResponse>, ClientError> {
        self.enter()?;
        self.service.get_all_notes().await.map_err(|e| server_error(&e))
    }

    async fn create(&self, draft: &NoteDraft) -> Result<NoteResponse, ClientError> {
        self.enter()?;
        self.service
            .create_note(CreateNoteRequest {
                title: draft.title.clone(),
                content: draft.content.clone(),
            })
            .await
            .map_err(|e| server_error(&e))
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<NoteResponse, ClientError> {
        self.enter()?;
        self.service
            .update_note(
                id,
                UpdateNoteRequest {
                    title: Some(draft.title.clone()),
                    content: Some(draft.content.clone()),
                },
            )
            .await
            .map_err(|e| server_error(&e))
    }

    async fn delete(&self, id: NoteId) -> Result<(), ClientError> {
        self.enter()?;
        self.service
            .delete_note(id)
            .await
            .map(|_| ())
            .map_err(|e| server_error(&e))
    }
}
