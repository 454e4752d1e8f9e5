//! # Query Engine
//!
//! Derives what the collection view shows: the visible subset for a search
//! term and filter tab, and the per-tab counts.
//!
//! ## Matching Rules
//!
//! A book is visible when it matches the search **and** the filter.
//!
//! - **Search**: case-insensitive substring match against `title` or
//!   `authors`. The empty term matches everything.
//! - **Filter**:
//!
//! | key | matches |
//! |-----|---------|
//! | `all` | every book |
//! | `with-review` | review present and not blank after trimming |
//! | `want-to-read`, `reading`, `finished`, `on-hold` | `status` equal to the key, nothing else |
//!
//! Results keep the collection's order. Counts are always taken over the
//! whole collection, ignoring the current search and tab, and use the same
//! predicate as [`visible`], so `counts(c).get(k) == visible(c, "", k).len()`.

use crate::model::{Book, ReadingStatus};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKey {
    #[default]
    All,
    WithReview,
    Status(ReadingStatus),
}

impl FilterKey {
    /// Every key, in tab order.
    pub const ALL: [FilterKey; 6] = [
        FilterKey::All,
        FilterKey::WithReview,
        FilterKey::Status(ReadingStatus::WantToRead),
        FilterKey::Status(ReadingStatus::Reading),
        FilterKey::Status(ReadingStatus::Finished),
        FilterKey::Status(ReadingStatus::OnHold),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::All => "all",
            FilterKey::WithReview => "with-review",
            FilterKey::Status(status) => status.as_str(),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::WithReview => book.has_review(),
            FilterKey::Status(status) => book.status == *status,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown filter: {}", s))
    }
}

impl From<ReadingStatus> for FilterKey {
    fn from(status: ReadingStatus) -> Self {
        FilterKey::Status(status)
    }
}

/// Lower-cased search term, prepared once per query.
#[derive(Debug, Clone, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, book: &Book) -> bool {
        if self.is_empty() {
            return true;
        }
        book.title.to_lowercase().contains(&self.0)
            || book.authors.to_lowercase().contains(&self.0)
    }
}

/// Books matching `search` and `filter`, in collection order.
pub fn visible<'a>(books: &'a [Book], search: &str, filter: FilterKey) -> Vec<&'a Book> {
    let term = SearchTerm::new(search);
    books
        .iter()
        .filter(|book| term.matches(book) && filter.matches(book))
        .collect()
}

/// Number of books per filter key, over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilterCounts {
    pub all: usize,
    pub with_review: usize,
    pub want_to_read: usize,
    pub reading: usize,
    pub finished: usize,
    pub on_hold: usize,
}

impl FilterCounts {
    pub fn get(&self, key: FilterKey) -> usize {
        match key {
            FilterKey::All => self.all,
            FilterKey::WithReview => self.with_review,
            FilterKey::Status(ReadingStatus::WantToRead) => self.want_to_read,
            FilterKey::Status(ReadingStatus::Reading) => self.reading,
            FilterKey::Status(ReadingStatus::Finished) => self.finished,
            FilterKey::Status(ReadingStatus::OnHold) => self.on_hold,
        }
    }

    fn slot_mut(&mut self, key: FilterKey) -> &mut usize {
        match key {
            FilterKey::All => &mut self.all,
            FilterKey::WithReview => &mut self.with_review,
            FilterKey::Status(ReadingStatus::WantToRead) => &mut self.want_to_read,
            FilterKey::Status(ReadingStatus::Reading) => &mut self.reading,
            FilterKey::Status(ReadingStatus::Finished) => &mut self.finished,
            FilterKey::Status(ReadingStatus::OnHold) => &mut self.on_hold,
        }
    }

    /// `(key, count)` pairs in tab order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, usize)> + '_ {
        FilterKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

pub fn counts(books: &[Book]) -> FilterCounts {
    let mut counts = FilterCounts::default();
    for book in books {
        for key in FilterKey::ALL {
            if key.matches(book) {
                *counts.slot_mut(key) += 1;
            }
        }
    }
    counts
}
