//! # Domain Model: Books and Reading Status
//!
//! This module defines the records the rest of the crate works on: [`Book`],
//! its identifier [`BookId`] and the closed [`ReadingStatus`] enumeration.
//!
//! ## Stored Format
//!
//! A book is persisted as a JSON object with the field names
//! `id`, `title`, `authors`, `thumbnail`, `description`, `review`, `rating`,
//! `dateAdded` and `status`. Status values are the kebab-case literals
//! `want-to-read`, `reading`, `finished` and `on-hold`.
//!
//! ## Lenient Decoding
//!
//! Stored data is user-owned and may come from older revisions of the app,
//! so decoding a single record never fails:
//!
//! - `title` / `authors` that are missing or not strings decode as `""`.
//! - Empty `thumbnail` / `description` / `review` strings decode as `None`.
//! - `rating` that is missing or not an integer decodes as `0`; values above
//!   5 are clamped to 5.
//! - `status` that is missing or unknown decodes as [`ReadingStatus::WantToRead`].
//! - `id` may be an integer or a numeric string. Anything else decodes as
//!   [`BookId::UNASSIGNED`], which the store repairs during hydration.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Highest value a rating can take. `0` means unrated.
pub const MAX_RATING: u8 = 5;

/// Largest stored id accepted as-is (`2^53 - 1`, the largest integer a
/// JavaScript number holds exactly). Anything above is repaired on load.
pub const MAX_STORED_ID: u64 = (1 << 53) - 1;

/// Status literals from the lending schema (`available` / `borrowed`) that an
/// unrelated revision of the app wrote into the same slot. They are never
/// migrated; see [`is_legacy_status`].
const LEGACY_STATUSES: [&str; 2] = ["available", "borrowed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl BookId {
    /// Placeholder for records whose stored id was missing or unusable.
    pub const UNASSIGNED: BookId = BookId(0);

    pub fn is_assigned(&self) -> bool {
        *self != Self::UNASSIGNED
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(value: u64) -> Self {
        BookId(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    Reading,
    Finished,
    OnHold,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::WantToRead,
        ReadingStatus::Reading,
        ReadingStatus::Finished,
        ReadingStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "want-to-read",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Finished => "finished",
            ReadingStatus::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown reading status: {}", s))
    }
}

/// True for status literals of the unrelated lending schema.
pub fn is_legacy_status(literal: &str) -> bool {
    LEGACY_STATUSES.contains(&literal)
}

/// A single tracked title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    pub status: ReadingStatus,
}

impl Book {
    /// Builds a stored book from a submitted form. Id and date are decided by
    /// the store.
    pub fn from_new(id: BookId, date_added: String, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            authors: new.authors,
            thumbnail: non_empty(new.thumbnail),
            description: non_empty(new.description),
            review: non_empty(new.review),
            rating: new.rating.min(MAX_RATING),
            date_added: Some(date_added),
            status: new.status,
        }
    }

    /// A review counts only if it has something besides whitespace.
    pub fn has_review(&self) -> bool {
        self.review
            .as_deref()
            .is_some_and(|review| !review.trim().is_empty())
    }

    /// Snapshot of every editable field, i.e. everything but `id` and
    /// `date_added`.
    pub fn to_patch(&self) -> BookPatch {
        BookPatch {
            title: Some(self.title.clone()),
            authors: Some(self.authors.clone()),
            thumbnail: Some(self.thumbnail.clone()),
            description: Some(self.description.clone()),
            review: Some(self.review.clone()),
            rating: Some(self.rating),
            status: Some(self.status),
        }
    }

    /// Replaces the fields named in `patch`. `id` and `date_added` are never
    /// touched.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(authors) = patch.authors {
            self.authors = authors;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail.and_then(non_empty);
        }
        if let Some(description) = patch.description {
            self.description = description.and_then(non_empty);
        }
        if let Some(review) = patch.review {
            self.review = review.and_then(non_empty);
        }
        if let Some(rating) = patch.rating {
            self.rating = rating.min(MAX_RATING);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

// Lenient decoding: every field goes through `serde_json::Value` so that a
// malformed record degrades to defaults instead of failing the whole load.
impl<'de> Deserialize<'de> for Book {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = BookHelper::deserialize(deserializer)?;

        Ok(Book {
            id: helper.id.as_ref().map(id_from_value).unwrap_or(BookId::UNASSIGNED),
            title: helper.title.and_then(string_from_value).unwrap_or_default(),
            authors: helper.authors.and_then(string_from_value).unwrap_or_default(),
            thumbnail: helper.thumbnail.and_then(string_from_value).and_then(non_empty),
            description: helper
                .description
                .and_then(string_from_value)
                .and_then(non_empty),
            review: helper.review.and_then(string_from_value).and_then(non_empty),
            rating: helper.rating.as_ref().map(rating_from_value).unwrap_or(0),
            date_added: helper.date_added.and_then(string_from_value).and_then(non_empty),
            status: helper
                .status
                .and_then(string_from_value)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookHelper {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    authors: Option<Value>,
    #[serde(default)]
    thumbnail: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    review: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    date_added: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
}

fn string_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn id_from_value(value: &Value) -> BookId {
    let raw = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    raw.filter(|&id| id <= MAX_STORED_ID)
        .map(BookId)
        .unwrap_or(BookId::UNASSIGNED)
}

fn rating_from_value(value: &Value) -> u8 {
    value
        .as_u64()
        .map(|r| r.min(MAX_RATING as u64) as u8)
        .unwrap_or(0)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// The fields of a book that an edit may replace.
///
/// `None` leaves a field alone. For the optional text fields the inner
/// option is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub thumbnail: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub review: Option<Option<String>>,
    pub rating: Option<u8>,
    pub status: Option<ReadingStatus>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn review(mut self, review: Option<String>) -> Self {
        self.review = Some(review);
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A book as submitted from the "add" form, before it has an id or date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub authors: String,
    pub thumbnail: String,
    pub description: String,
    pub review: String,
    pub rating: u8,
    pub status: ReadingStatus,
}

impl NewBook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Submissions without a title are ignored by the store.
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = review.into();
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_status(mut self, status: ReadingStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        Book::from_new(
            BookId(1),
            "2024/1/5".into(),
            NewBook::new("Dune")
                .with_authors("Frank Herbert")
                .with_review("great")
                .with_status(ReadingStatus::Finished),
        )
    }

    #[test]
    fn status_literals_round_trip_through_from_str() {
        for status in ReadingStatus::ALL {
            assert_eq!(status.as_str().parse::<ReadingStatus>(), Ok(status));
        }
        assert!("done".parse::<ReadingStatus>().is_err());
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["dateAdded"], json!("2024/1/5"));
        assert_eq!(value["status"], json!("finished"));
        assert_eq!(value["rating"], json!(0));
        assert!(value.get("thumbnail").is_none());
    }

    #[test]
    fn decodes_stored_record() {
        let book: Book = serde_json::from_value(json!({
            "id": 1718000000000u64,
            "title": "Dune",
            "authors": "Frank Herbert",
            "thumbnail": "",
            "description": "Spice",
            "review": "great",
            "rating": 4,
            "dateAdded": "2024/6/10",
            "status": "on-hold"
        }))
        .unwrap();

        assert_eq!(book.id, BookId(1718000000000));
        assert_eq!(book.thumbnail, None);
        assert_eq!(book.description.as_deref(), Some("Spice"));
        assert_eq!(book.rating, 4);
        assert_eq!(book.status, ReadingStatus::OnHold);
    }

    #[test]
    fn decodes_malformed_record_with_defaults() {
        let book: Book = serde_json::from_value(json!({
            "id": "not-a-number",
            "title": 42,
            "rating": 11,
            "status": "borrowed"
        }))
        .unwrap();

        assert_eq!(book.id, BookId::UNASSIGNED);
        assert_eq!(book.title, "");
        assert_eq!(book.authors, "");
        assert_eq!(book.rating, MAX_RATING);
        assert_eq!(book.status, ReadingStatus::WantToRead);
    }

    #[test]
    fn numeric_string_id_is_accepted() {
        let book: Book = serde_json::from_value(json!({"id": "17", "title": "x"})).unwrap();
        assert_eq!(book.id, BookId(17));
    }

    #[test]
    fn ids_beyond_safe_integer_range_are_unassigned() {
        let at_limit: Book =
            serde_json::from_value(json!({"id": MAX_STORED_ID, "title": "x"})).unwrap();
        assert_eq!(at_limit.id, BookId(MAX_STORED_ID));

        let huge: Book = serde_json::from_value(json!({"id": u64::MAX, "title": "x"})).unwrap();
        assert_eq!(huge.id, BookId::UNASSIGNED);

        let huge_text: Book =
            serde_json::from_value(json!({"id": "18446744073709551615", "title": "x"})).unwrap();
        assert_eq!(huge_text.id, BookId::UNASSIGNED);
    }

    #[test]
    fn legacy_statuses_are_recognized() {
        assert!(is_legacy_status("available"));
        assert!(is_legacy_status("borrowed"));
        assert!(!is_legacy_status("reading"));
    }

    #[test]
    fn blank_review_does_not_count() {
        let mut book = sample();
        assert!(book.has_review());
        book.review = Some("   \n".into());
        assert!(!book.has_review());
        book.review = None;
        assert!(!book.has_review());
    }

    #[test]
    fn apply_keeps_id_and_date() {
        let mut book = sample();
        book.apply(
            BookPatch::new()
                .title("Dune Messiah")
                .rating(9)
                .review(None)
                .status(ReadingStatus::Reading),
        );

        assert_eq!(book.id, BookId(1));
        assert_eq!(book.date_added.as_deref(), Some("2024/1/5"));
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.authors, "Frank Herbert");
        assert_eq!(book.rating, MAX_RATING);
        assert_eq!(book.review, None);
        assert_eq!(book.status, ReadingStatus::Reading);
    }

    #[test]
    fn to_patch_then_apply_is_identity() {
        let mut book = sample();
        let before = book.clone();
        book.apply(before.to_patch());
        assert_eq!(book, before);
    }

    #[test]
    fn new_book_requires_title() {
        assert!(!NewBook::default().is_submittable());
        assert!(NewBook::new("Dune").is_submittable());
    }
}
