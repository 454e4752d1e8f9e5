//! # API Facade
//!
//! The API layer is a **thin facade** and the single entry point for a
//! presentation layer (terminal, desktop, web view, ...). It owns the store,
//! the edit session and the page cursor, and dispatches to them.
//!
//! ## What the API Does NOT Do
//!
//! - **Rendering**: it returns data, never strings for display.
//! - **Confirmation**: "are you sure?" before a delete is the caller's job;
//!   [`ShelfApi::delete_book`] deletes unconditionally.
//! - **Error messages**: validation and not-found cases degrade to `Ok(None)`,
//!   [`CommitOutcome::Dropped`] or `Err(BookNotFound)`; the caller decides
//!   whether to tell the user.
//!
//! ## Generic Over SlotBackend
//!
//! `ShelfApi<B: SlotBackend>` is generic over the persistence port:
//! - Production: `ShelfApi<FsBackend>`, see [`ShelfApi::open`]
//! - Testing: `ShelfApi<MemBackend>`

use crate::config::ShelfConfig;
use crate::edit::{CommitOutcome, EditField, EditSession};
use crate::error::Result;
use crate::model::{Book, BookId, BookPatch, NewBook};
use crate::pager::{Page, PageCursor};
use crate::query::{self, FilterCounts, FilterKey};
use crate::store::backend::SlotBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::BookStore;
use std::cell::RefCell;

pub struct ShelfApi<B: SlotBackend> {
    store: BookStore<B>,
    session: EditSession,
    // Behind a RefCell so that paging a list borrowed from `visible_books`
    // does not need `&mut self`.
    cursor: RefCell<PageCursor>,
}

impl ShelfApi<FsBackend> {
    /// File-backed API as described by `config`, hydrated from disk.
    pub fn open(config: &ShelfConfig) -> Result<Self> {
        let backend = FsBackend::new(config.data_dir()?).with_slot(&config.slot);
        let store = BookStore::open(backend).with_date_format(&config.date_format);
        Ok(Self::new(store))
    }
}

impl ShelfApi<MemBackend> {
    pub fn in_memory() -> Self {
        Self::new(BookStore::with_backend(MemBackend::new()))
    }
}

impl<B: SlotBackend> ShelfApi<B> {
    pub fn new(store: BookStore<B>) -> Self {
        Self {
            store,
            session: EditSession::new(),
            cursor: RefCell::new(PageCursor::new()),
        }
    }

    pub fn store(&self) -> &BookStore<B> {
        &self.store
    }

    /// Re-reads the collection from the slot.
    pub fn load_collection(&mut self) -> &[Book] {
        self.store.load()
    }

    pub fn books(&self) -> &[Book] {
        self.store.books()
    }

    pub fn get_book(&self, id: BookId) -> Option<&Book> {
        self.store.get(id)
    }

    pub fn add_book(&mut self, new: NewBook) -> Result<Option<Book>> {
        self.store.add(new)
    }

    pub fn update_book(&mut self, id: BookId, patch: BookPatch) -> Result<Book> {
        self.store.update(id, patch)
    }

    pub fn delete_book(&mut self, id: BookId) -> Result<Book> {
        self.store.delete(id)
    }

    pub fn visible_books(&self, search: &str, filter: FilterKey) -> Vec<&Book> {
        query::visible(self.store.books(), search, filter)
    }

    pub fn filter_counts(&self) -> FilterCounts {
        query::counts(self.store.books())
    }

    /// Selects the page shown by the next [`ShelfApi::paginate`].
    pub fn go_to_page(&mut self, page: usize) {
        self.cursor.get_mut().go_to(page);
    }

    /// The current page of `items`. Resets to page 1 when the number of items
    /// differs from the previous call.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        self.cursor.borrow_mut().page(items)
    }

    pub fn current_page(&self) -> usize {
        self.cursor.borrow().current()
    }

    /// Starts editing the book with `id`. Returns false if there is no such
    /// book.
    pub fn begin_edit(&mut self, id: BookId) -> bool {
        match self.store.get(id) {
            Some(book) => {
                self.session.begin(book);
                true
            }
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&Book> {
        self.session.draft()
    }

    pub fn edit_field(&mut self, field: EditField) -> bool {
        self.session.set_field(field)
    }

    pub fn commit_edit(&mut self) -> Result<CommitOutcome> {
        self.session.commit(&mut self.store)
    }

    pub fn cancel_edit(&mut self) -> Option<Book> {
        self.session.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReadingStatus;

    #[test]
    fn add_then_visible() {
        let mut api = ShelfApi::in_memory();
        api.add_book(NewBook::new("Dune").with_status(ReadingStatus::Reading))
            .unwrap();
        api.add_book(NewBook::new("")).unwrap();

        assert_eq!(api.books().len(), 1);
        assert_eq!(
            api.visible_books("", FilterKey::Status(ReadingStatus::Reading))
                .len(),
            1
        );
        assert_eq!(api.filter_counts().reading, 1);
    }

    #[test]
    fn edit_flow_goes_through_store() {
        let mut api = ShelfApi::in_memory();
        let book = api.add_book(NewBook::new("Dune")).unwrap().unwrap();

        assert!(api.begin_edit(book.id));
        assert!(api.edit_field(EditField::Rating(5)));
        assert_eq!(api.editing().unwrap().rating, 5);
        assert_eq!(api.get_book(book.id).unwrap().rating, 0);

        assert!(matches!(api.commit_edit().unwrap(), CommitOutcome::Saved(_)));
        assert_eq!(api.get_book(book.id).unwrap().rating, 5);
        assert!(api.editing().is_none());
    }

    #[test]
    fn paginate_visible_books() {
        let mut api = ShelfApi::in_memory();
        for i in 0..25 {
            api.add_book(NewBook::new(format!("Book {}", i))).unwrap();
        }
        api.go_to_page(3);

        let visible = api.visible_books("", FilterKey::All);
        let page = api.paginate(&visible);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[4].title, "Book 0");

        // Narrowing the list changes its length, back to the first page.
        let narrowed = api.visible_books("Book 1", FilterKey::All);
        assert_eq!(api.paginate(&narrowed).current_page, 1);
        assert_eq!(api.current_page(), 1);
    }

    #[test]
    fn begin_edit_on_unknown_id() {
        let mut api = ShelfApi::in_memory();
        assert!(!api.begin_edit(BookId(9)));
        assert!(api.editing().is_none());
    }

    #[test]
    fn cancel_edit_leaves_store_alone() {
        let mut api = ShelfApi::in_memory();
        let book = api.add_book(NewBook::new("Dune")).unwrap().unwrap();
        api.begin_edit(book.id);
        api.edit_field(EditField::Title("Other".into()));

        assert!(api.cancel_edit().is_some());
        assert_eq!(api.get_book(book.id), Some(&book));
    }
}
