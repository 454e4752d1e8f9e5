//! # Edit Session
//!
//! Transient editing state for one book at a time.
//!
//! ```text
//!          begin(book)             field change
//!   Idle ─────────────▶ Editing ◀──────────────┐
//!    ▲                    │  └─────────────────┘
//!    └── commit / cancel ─┘
//! ```
//!
//! The draft is a full copy of the book taken at `begin`. Field changes only
//! touch the draft. `commit` hands every editable field to
//! [`BookStore::update`]; `cancel` throws the draft away.
//!
//! If the book was deleted while being edited, the commit is dropped
//! silently and the session still returns to `Idle`. If the store fails to
//! persist, the session stays open with its draft so the caller may retry.

use crate::error::{Result, ShelfError};
use crate::model::{Book, BookId, BookPatch, ReadingStatus};
use crate::store::backend::SlotBackend;
use crate::store::BookStore;
use tracing::debug;

/// A single field change on the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Title(String),
    Authors(String),
    Thumbnail(Option<String>),
    Description(Option<String>),
    Review(Option<String>),
    Rating(u8),
    Status(ReadingStatus),
}

impl From<EditField> for BookPatch {
    fn from(field: EditField) -> Self {
        let patch = BookPatch::new();
        match field {
            EditField::Title(title) => patch.title(title),
            EditField::Authors(authors) => patch.authors(authors),
            EditField::Thumbnail(thumbnail) => patch.thumbnail(thumbnail),
            EditField::Description(description) => patch.description(description),
            EditField::Review(review) => patch.review(review),
            EditField::Rating(rating) => patch.rating(rating),
            EditField::Status(status) => patch.status(status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft was written to the store.
    Saved(Book),
    /// The book no longer exists; the draft was discarded.
    Dropped(BookId),
    /// No session was open.
    NothingToCommit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { book_id: BookId, draft: Book },
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session on `book`, replacing any session already open.
    pub fn begin(&mut self, book: &Book) {
        *self = EditSession::Editing {
            book_id: book.id,
            draft: book.clone(),
        };
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<BookId> {
        match self {
            EditSession::Editing { book_id, .. } => Some(*book_id),
            EditSession::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&Book> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Idle => None,
        }
    }

    /// Updates the draft. Returns false if no session is open.
    pub fn set_field(&mut self, field: EditField) -> bool {
        match self {
            EditSession::Editing { draft, .. } => {
                draft.apply(field.into());
                true
            }
            EditSession::Idle => false,
        }
    }

    /// Discards the draft and returns it, if there was one.
    pub fn cancel(&mut self) -> Option<Book> {
        match std::mem::take(self) {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Idle => None,
        }
    }

    pub fn commit<B: SlotBackend>(&mut self, store: &mut BookStore<B>) -> Result<CommitOutcome> {
        let (book_id, draft) = match std::mem::take(self) {
            EditSession::Editing { book_id, draft } => (book_id, draft),
            EditSession::Idle => return Ok(CommitOutcome::NothingToCommit),
        };

        match store.update(book_id, draft.to_patch()) {
            Ok(book) => Ok(CommitOutcome::Saved(book)),
            Err(ShelfError::BookNotFound(id)) => {
                debug!(id = %id, "Book vanished while editing, dropping draft");
                Ok(CommitOutcome::Dropped(id))
            }
            Err(e) => {
                *self = EditSession::Editing { book_id, draft };
                Err(e)
            }
        }
    }
}
