use super::{NotesApi, search};
use crate::{dto::NoteResponse, models::NoteId};

/// Banner texts shown to the user. They never carry server detail.
pub mod messages {
    pub const FETCH_FAILED: &str = "Failed to fetch notes. Make sure your backend server is running.";
    pub const INCOMPLETE_DRAFT: &str = "Please fill in both title and content";
    pub const CREATE_FAILED: &str = "Failed to create note";
    pub const UPDATE_FAILED: &str = "Failed to update note";
    pub const DELETE_FAILED: &str = "Failed to delete note";
}

/// Unsaved title/content of a note being written or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

impl From<&NoteResponse> for NoteDraft {
    fn from(note: &NoteResponse) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    Loading,
    Ready,
}

/// The single note currently in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing {
    pub id: NoteId,
    pub draft: NoteDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing has been written yet.
    NoNotes,
    /// Notes exist but none match the search term.
    NoMatches,
}

impl EmptyState {
    pub const fn headline(self) -> &'static str {
        match self {
            Self::NoNotes => "No notes yet",
            Self::NoMatches => "No notes found",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            Self::NoNotes => "Create your first note to get started",
            Self::NoMatches => "Try adjusting your search terms",
        }
    }
}

/// Client-side mirror of the server's notes plus the view state around it.
///
/// The list only changes after the server confirms a request. A failed
/// request leaves the list alone and sets the banner; nothing is retried.
pub struct NoteBoard<A> {
    api: A,
    status: BoardStatus,
    notes: Vec<NoteResponse>,
    search: String,
    composer: Option<NoteDraft>,
    editing: Option<Editing>,
    pending_delete: Option<NoteId>,
    error: Option<String>,
}

impl<A: NotesApi> NoteBoard<A> {
    pub const fn new(api: A) -> Self {
        Self {
            api,
            status: BoardStatus::Loading,
            notes: Vec::new(),
            search: String::new(),
            composer: None,
            editing: None,
            pending_delete: None,
            error: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn notes(&self) -> &[NoteResponse] {
        &self.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replaces the list with the server's. The board is ready afterwards either way.
    pub async fn load(&mut self) {
        self.status = BoardStatus::Loading;

        match self.api.list().await {
            Ok(notes) => {
                self.notes = notes;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching notes: {e}");
                self.error = Some(messages::FETCH_FAILED.to_string());
            }
        }

        self.status = BoardStatus::Ready;
    }

    // Search

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible(&self) -> Vec<&NoteResponse> {
        search::filter(&self.notes, &self.search)
    }

    /// What to show instead of the grid, if nothing is visible.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.status == BoardStatus::Loading || !self.visible().is_empty() {
            return None;
        }

        if self.search.is_empty() {
            Some(EmptyState::NoNotes)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    pub fn summary(&self) -> String {
        let count = self.notes.len();
        let noun = if count == 1 { "note" } else { "notes" };
        format!("{count} {noun} total")
    }

    // Composer

    pub const fn composer(&self) -> Option<&NoteDraft> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut NoteDraft> {
        self.composer.as_mut()
    }

    pub fn open_composer(&mut self) {
        self.composer.get_or_insert_with(NoteDraft::default);
    }

    pub fn cancel_composer(&mut self) {
        self.composer = None;
        self.error = None;
    }

    /// Creates the composed note. Returns whether the server accepted it.
    pub async fn submit_composer(&mut self) -> bool {
        let Some(draft) = self.composer.clone() else {
            return false;
        };
        if !draft.is_complete() {
            self.error = Some(messages::INCOMPLETE_DRAFT.to_string());
            return false;
        }

        match self.api.create(&draft).await {
            Ok(note) => {
                self.notes.insert(0, note);
                self.composer = None;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Error creating note: {e}");
                self.error = Some(messages::CREATE_FAILED.to_string());
                false
            }
        }
    }

    // Editing

    pub const fn editing(&self) -> Option<&Editing> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: NoteId) -> bool {
        self.editing.as_ref().is_some_and(|e| e.id == id)
    }

    /// Puts `id` into edit mode, taking over from any other note being edited.
    pub fn start_edit(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };

        self.editing = Some(Editing {
            id,
            draft: NoteDraft::from(note),
        });
        true
    }

    pub fn draft_mut(&mut self) -> Option<&mut NoteDraft> {
        self.editing.as_mut().map(|e| &mut e.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the draft. On success the note is replaced in place and edit mode ends.
    pub async fn save_edit(&mut self) -> bool {
        let Some(Editing { id, draft }) = self.editing.clone() else {
            return false;
        };
        if !draft.is_complete() {
            self.error = Some(messages::INCOMPLETE_DRAFT.to_string());
            return false;
        }

        match self.api.update(id, &draft).await {
            Ok(updated) => {
                if let Some(slot) = self.notes.iter_mut().find(|note| note.id == id) {
                    *slot = updated;
                }
                self.editing = None;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Error updating note: {e}");
                self.error = Some(messages::UPDATE_FAILED.to_string());
                false
            }
        }
    }

    // Deletion

    /// Note awaiting the user's confirmation before it is deleted.
    pub const fn pending_delete(&self) -> Option<NoteId> {
        self.pending_delete
    }

    /// Asks for confirmation to delete `id`. Nothing is sent yet.
    pub fn request_delete(&mut self, id: NoteId) -> bool {
        if !self.notes.iter().any(|note| note.id == id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the note awaiting confirmation, if any.
    pub async fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(id) => self.delete(id).await,
            None => false,
        }
    }

    pub async fn delete(&mut self, id: NoteId) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.notes.retain(|note| note.id != id);
                if self.is_editing(id) {
                    self.editing = None;
                }
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Error deleting note: {e}");
                self.error = Some(messages::DELETE_FAILED.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_with_whitespace_only_is_incomplete() {
        assert!(!NoteDraft::new("  ", "body").is_complete());
        assert!(!NoteDraft::new("title", "\n").is_complete());
        assert!(NoteDraft::new("title", "body").is_complete());
    }

    #[test]
    fn empty_state_copy() {
        assert_eq!(EmptyState::NoNotes.headline(), "No notes yet");
        assert_eq!(EmptyState::NoMatches.hint(), "Try adjusting your search terms");
    }
}
