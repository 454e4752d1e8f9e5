//! # External Book Lookup
//!
//! Finds candidate records to pre-fill the "add book" form. This is the only
//! place that talks to the network and it never fails the caller: a blank
//! query, a transport error, a non-success status or an unparseable body all
//! produce an empty result list and a `warn!` log entry.
//!
//! One request is issued per call. There is no timeout, retry or request
//! sequencing; a caller that runs lookups concurrently gets whatever finishes
//! last.

use crate::error::{Result, ShelfError};
use crate::model::NewBook;
use serde::Deserialize;
use tracing::{debug, warn};

pub const GOOGLE_BOOKS_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub source_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl Candidate {
    /// Contributor names as a single display string.
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

impl From<&Candidate> for NewBook {
    fn from(candidate: &Candidate) -> Self {
        NewBook {
            title: candidate.title.clone(),
            authors: candidate.authors_joined(),
            thumbnail: candidate.thumbnail.clone().unwrap_or_default(),
            description: candidate.description.clone().unwrap_or_default(),
            ..NewBook::default()
        }
    }
}

pub trait BookLookup {
    fn search(&self, query: &str) -> Vec<Candidate>;
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    authors: Option<Vec<String>>,
    description: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for Candidate {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Candidate {
            source_id: volume.id,
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            description: info.description,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

pub(crate) fn parse_volumes(text: &str) -> Result<Vec<Candidate>> {
    let response: VolumesResponse =
        serde_json::from_str(text).map_err(ShelfError::Serialization)?;
    Ok(response.items.into_iter().map(Candidate::from).collect())
}

/// Blocking client for the Google Books volumes API.
pub struct GoogleBooksClient {
    endpoint: String,
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleBooksClient {
    pub fn new() -> Self {
        Self::with_endpoint(GOOGLE_BOOKS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn fetch(&self, query: &str) -> Result<Vec<Candidate>> {
        let mut url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ShelfError::Lookup(format!("Invalid endpoint {}: {}", self.endpoint, e))
        })?;
        url.query_pairs_mut().append_pair("q", query);

        let response = reqwest::blocking::Client::new()
            .get(url)
            .send()
            .map_err(|e| ShelfError::Lookup(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShelfError::Lookup(format!("Unexpected status: {}", status)));
        }

        let text = response
            .text()
            .map_err(|e| ShelfError::Lookup(format!("Failed to read response: {}", e)))?;
        parse_volumes(&text)
    }
}

impl BookLookup for GoogleBooksClient {
    fn search(&self, query: &str) -> Vec<Candidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch(query) {
            Ok(candidates) => {
                debug!(query, count = candidates.len(), "Book lookup finished");
                candidates
            }
            Err(e) => {
                warn!(query, error = %e, "Book lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReadingStatus;

    const SAMPLE: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 2,
        "items": [
            {
                "id": "B1oGAQAAIAAJ",
                "volumeInfo": {
                    "title": "Good Omens",
                    "authors": ["Terry Pratchett", "Neil Gaiman"],
                    "description": "The world ends on Saturday.",
                    "imageLinks": {"smallThumbnail": "http://s", "thumbnail": "http://t"}
                }
            },
            {
                "id": "x",
                "volumeInfo": {"title": "Untitled Notes"}
            }
        ]
    }"#;

    #[test]
    fn parses_volumes_into_candidates() {
        let candidates = parse_volumes(SAMPLE).unwrap();
        assert_eq!(candidates.len(), 2);

        let first = &candidates[0];
        assert_eq!(first.source_id, "B1oGAQAAIAAJ");
        assert_eq!(first.authors_joined(), "Terry Pratchett, Neil Gaiman");
        assert_eq!(first.thumbnail.as_deref(), Some("http://t"));

        let second = &candidates[1];
        assert!(second.authors.is_empty());
        assert_eq!(second.thumbnail, None);
    }

    #[test]
    fn response_without_items_is_empty() {
        let candidates = parse_volumes(r#"{"kind": "books#volumes", "totalItems": 0}"#).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_volumes("<html>").is_err());
    }

    #[test]
    fn candidate_prefills_new_book() {
        let candidates = parse_volumes(SAMPLE).unwrap();
        let new = NewBook::from(&candidates[0]);

        assert_eq!(new.title, "Good Omens");
        assert_eq!(new.authors, "Terry Pratchett, Neil Gaiman");
        assert_eq!(new.description, "The world ends on Saturday.");
        assert_eq!(new.thumbnail, "http://t");
        assert_eq!(new.review, "");
        assert_eq!(new.rating, 0);
        assert_eq!(new.status, ReadingStatus::WantToRead);
    }

    #[test]
    fn blank_query_returns_nothing() {
        let client = GoogleBooksClient::with_endpoint("not a url");
        assert!(client.search("   ").is_empty());
    }

    #[test]
    fn failed_lookup_returns_nothing() {
        let client = GoogleBooksClient::with_endpoint("not a url");
        assert!(client.search("dune").is_empty());
        assert!(matches!(client.fetch("dune"), Err(ShelfError::Lookup(_))));
    }
}
