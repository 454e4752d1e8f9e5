use super::backend::SlotBackend;
use super::ids::IdGenerator;
use crate::error::{Result, ShelfError};
use crate::model::{is_legacy_status, Book, BookId, BookPatch, NewBook};
use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Write;
use tracing::{debug, warn};

/// Display format for `dateAdded`, e.g. `2024/6/10`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%-m/%-d";

/// Owns the canonical, newest-first list of books.
///
/// Every mutation serializes the *whole* collection and hands it to the
/// backend. The new list is only swapped in once that write succeeded, so a
/// failed write leaves the in-memory state exactly as it was.
pub struct BookStore<B: SlotBackend> {
    /// The underlying slot.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    books: Vec<Book>,
    ids: IdGenerator,
    date_format: String,
}

impl<B: SlotBackend> BookStore<B> {
    /// A store over `backend` that has not been hydrated yet.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            books: Vec::new(),
            ids: IdGenerator::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// A store over `backend`, hydrated from whatever the slot holds.
    pub fn open(backend: B) -> Self {
        let mut store = Self::with_backend(backend);
        store.load();
        store
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces the in-memory collection with the slot's content.
    ///
    /// Never fails: an absent slot, an unreadable slot or undecodable text
    /// all hydrate to an empty collection.
    pub fn load(&mut self) -> &[Book] {
        let books = match self.backend.read_slot() {
            Ok(Some(text)) => decode_collection(&text, &mut self.ids),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    slot = %self.backend.describe(),
                    error = %e,
                    "Failed to read collection, starting empty"
                );
                Vec::new()
            }
        };
        debug!(count = books.len(), slot = %self.backend.describe(), "Loaded collection");
        self.books = books;
        &self.books
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Adds a book at the front of the collection.
    ///
    /// Returns `Ok(None)` without touching anything when the submission has
    /// no title.
    pub fn add(&mut self, new: NewBook) -> Result<Option<Book>> {
        self.add_dated(new, Local::now().date_naive())
    }

    pub(crate) fn add_dated(&mut self, new: NewBook, today: NaiveDate) -> Result<Option<Book>> {
        if !new.is_submittable() {
            debug!("Ignoring submission without a title");
            return Ok(None);
        }

        let date_added = self.format_date(today)?;
        let book = Book::from_new(self.ids.next_id(), date_added, new);

        let mut next = Vec::with_capacity(self.books.len() + 1);
        next.push(book.clone());
        next.extend(self.books.iter().cloned());
        self.commit(next)?;

        debug!(id = %book.id, title = %book.title, "Book added");
        Ok(Some(book))
    }

    /// Replaces the fields named in `patch` on the book with `id`.
    pub fn update(&mut self, id: BookId, patch: BookPatch) -> Result<Book> {
        let position = self.position(id)?;

        let mut next = self.books.clone();
        next[position].apply(patch);
        let updated = next[position].clone();
        self.commit(next)?;

        debug!(id = %id, "Book updated");
        Ok(updated)
    }

    /// Removes the book with `id` and returns it. No confirmation, no
    /// soft-delete.
    pub fn delete(&mut self, id: BookId) -> Result<Book> {
        let position = self.position(id)?;

        let mut next = self.books.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        debug!(id = %id, title = %removed.title, "Book deleted");
        Ok(removed)
    }

    fn position(&self, id: BookId) -> Result<usize> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or(ShelfError::BookNotFound(id))
    }

    fn format_date(&self, date: NaiveDate) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", date.format(&self.date_format)).map_err(|_| {
            ShelfError::Store(format!("Invalid date format: {}", self.date_format))
        })?;
        Ok(out)
    }

    /// Persist first, then swap in.
    fn commit(&mut self, next: Vec<Book>) -> Result<()> {
        let text = serde_json::to_string(&next).map_err(ShelfError::Serialization)?;
        self.backend.write_slot(&text)?;
        debug!(count = next.len(), slot = %self.backend.describe(), "Persisted collection");
        self.books = next;
        Ok(())
    }
}

/// Decodes the slot's text record by record.
///
/// Broken records are skipped, malformed fields fall back to defaults (see
/// [`crate::model`]) and missing or duplicate ids are replaced with fresh
/// ones. The repairs are only written back on the next mutation.
pub(crate) fn decode_collection(text: &str, ids: &mut IdGenerator) -> Vec<Book> {
    let entries = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("Stored collection is not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Failed to decode stored collection, starting empty");
            return Vec::new();
        }
    };

    let mut books = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(position, "Skipping stored entry that is not a book record");
            continue;
        }
        if let Some(literal) = entry
            .get("status")
            .and_then(Value::as_str)
            .filter(|s| is_legacy_status(s))
        {
            warn!(
                position,
                status = literal,
                "Record uses the legacy lending schema, reading it as want-to-read"
            );
        }
        match serde_json::from_value::<Book>(entry) {
            Ok(book) => books.push(book),
            Err(e) => warn!(position, error = %e, "Skipping undecodable book record"),
        }
    }

    if let Some(max) = books.iter().map(|book| book.id).max() {
        ids.observe(max);
    }

    let mut seen = HashSet::with_capacity(books.len());
    for book in &mut books {
        if !book.id.is_assigned() || !seen.insert(book.id) {
            let fresh = ids.next_id();
            warn!(old = %book.id, new = %fresh, title = %book.title, "Repaired book id");
            book.id = fresh;
            seen.insert(fresh);
        }
    }

    books
}
