//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic book-tracking library**: a personal collection of
//! books with a reading status, a rating and a free-text review, persisted
//! locally and browsed through search, filter tabs and pages.
//!
//! There is no server, no account and exactly one writer: the local user.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (not in this crate)                           │
//! │  - Renders books, asks for delete confirmation              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: store + edit session + page cursor          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (query.rs, pager.rs, edit.rs)                         │
//! │  - Visible subset + counts, page windows, draft editing     │
//! │  - Pure functions and small state machines, no I/O          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SlotBackend port: FsBackend (production), MemBackend     │
//! │  - BookStore: add/update/delete, whole-collection writes    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows down to up on reads (slot → store → query → pager → caller)
//! and up to down on writes (caller → edit session / api → store → slot).
//!
//! ## Key Principle: Failures Degrade, They Don't Shout
//!
//! - A submission without a title is ignored (`Ok(None)`).
//! - Update/delete of an unknown id is `Err(ShelfError::BookNotFound)` and
//!   changes nothing.
//! - An absent or corrupted slot loads as an empty collection.
//! - A failed book lookup is an empty result list plus a log line.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`store`]: Persistence port, backends and the collection store
//! - [`model`]: Core data types (`Book`, `BookId`, `ReadingStatus`)
//! - [`query`]: Search, filter tabs and counts
//! - [`pager`]: Page windows and the page cursor
//! - [`edit`]: Draft editing of one book
//! - [`lookup`]: External book search used to pre-fill new books
//! - [`config`]: Configuration management
//! - [`logging`]: Optional tracing subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod pager;
pub mod query;
pub mod store;

#[cfg(test)]
pub mod test_utils;
