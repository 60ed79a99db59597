use crate::dto::NoteResponse;

/// Case-insensitive substring match against title or content.
pub fn matches(note: &NoteResponse, term: &str) -> bool {
    let term = term.to_lowercase();
    contains_lowercase(note, &term)
}

/// Notes matching `term`, in list order. An empty term keeps every note.
pub fn filter<'a>(notes: &'a [NoteResponse], term: &str) -> Vec<&'a NoteResponse> {
    let term = term.to_lowercase();
    notes
        .iter()
        .filter(|note| contains_lowercase(note, &term))
        .collect()
}

fn contains_lowercase(note: &NoteResponse, term: &str) -> bool {
    note.title.to_lowercase().contains(term) || note.content.to_lowercase().contains(term)
}
