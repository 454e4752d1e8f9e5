use super::book_store::BookStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = BookStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        BookStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{NewBook, ReadingStatus};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` plain books titled "Book 1".."Book N". Being
        /// prepended, "Book N" ends up first.
        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                let book = NewBook::new(format!("Book {}", i + 1))
                    .with_authors(format!("Author {}", i + 1));
                self.store.add(book).unwrap();
            }
            self
        }

        pub fn with_book(mut self, title: &str, authors: &str, status: ReadingStatus) -> Self {
            let book = NewBook::new(title)
                .with_authors(authors)
                .with_status(status);
            self.store.add(book).unwrap();
            self
        }

        pub fn with_reviewed_book(
            mut self,
            title: &str,
            status: ReadingStatus,
            review: &str,
        ) -> Self {
            let book = NewBook::new(title).with_status(status).with_review(review);
            self.store.add(book).unwrap();
            self
        }
    }
}
