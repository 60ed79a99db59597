//! Client side of the notes app: an HTTP seam to the server and the
//! note board state a renderer draws from.

mod api;
mod board;
mod search;

pub use api::{ClientError, DEFAULT_BASE_URL, HttpNotesApi, NotesApi};
pub use board::{BoardStatus, Editing, EmptyState, NoteBoard, NoteDraft, messages};
pub use search::{filter, matches};
