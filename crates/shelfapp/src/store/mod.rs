//! # Storage Layer
//!
//! The collection lives in a single durable slot as one JSON document. The
//! [`backend::SlotBackend`] trait is the persistence port; [`BookStore`]
//! owns the in-memory list and implements the mutations on top of it.
//!
//! ## Write Model
//!
//! - **Whole-collection writes**: every add/update/delete serializes the full
//!   list and overwrites the slot. There is no incremental diff.
//! - **Persist, then swap**: the new list becomes visible only after the
//!   write succeeded. A failed write leaves the store unchanged.
//! - **Read once**: the slot is read when the store is opened (or on an
//!   explicit [`BookStore::load`]).
//!
//! ## Hydration
//!
//! Loading never fails. A missing slot, an I/O error or text that is not a
//! JSON list all yield an empty collection; individual malformed records are
//! decoded leniently and ids are repaired (see [`book_store`]).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `<data_dir>/<slot>.json` with atomic tmp+rename writes.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! └── books.json    # [{"id": 1718000000000, "title": "...", "status": "reading", ...}, ...]
//! ```

pub mod backend;
pub mod book_store;
pub mod fs;
pub mod fs_backend;
pub mod ids;
pub mod mem_backend;
pub mod memory;

pub use book_store::BookStore;
