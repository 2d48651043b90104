use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::youtube;

/// A video as displayed in search results and on the saved shelf.
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
}

/// Continuation cursor for paged search results. `Start` means no page has
/// been fetched yet; `Exhausted` is the server's explicit end-of-results
/// marker and is distinct from never having fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageToken {
    #[default]
    Start,
    Next(String),
    Exhausted,
}

impl PageToken {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PageToken::Exhausted)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Video>,
    pub next_token: PageToken,
}

/// The two saved-video lists. Exactly one is current per shelf view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    #[default]
    Unwatched,
    Watched,
}

impl ListName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Unwatched => "unwatched",
            ListName::Watched => "watched",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ListName::Unwatched => "To Watch",
            ListName::Watched => "Watched",
        }
    }

    pub fn other(&self) -> ListName {
        match self {
            ListName::Unwatched => ListName::Watched,
            ListName::Watched => ListName::Unwatched,
        }
    }
}

pub fn list_name_from_key(key: &str) -> ListName {
    match key {
        "watched" => ListName::Watched,
        _ => ListName::Unwatched,
    }
}

/// One page of search results per call. Stateless; the caller owns the
/// continuation token.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, query: &str, token: &PageToken) -> Result<Page>;
}

/// Batch metadata lookup for saved ids. Implementations must preserve the
/// input order.
pub trait MetadataService: Send + Sync {
    fn resolve(&self, ids: &[String]) -> Result<Vec<Video>>;
}

/// Durable ordered id lists keyed by `ListName`.
pub trait ListStore: Send + Sync {
    fn get_all(&self, list: ListName) -> Result<Vec<String>>;
    fn add(&self, list: ListName, id: &str) -> Result<()>;
    fn move_entry(&self, from: ListName, to: ListName, id: &str) -> Result<()>;
    fn remove(&self, list: ListName, id: &str) -> Result<()>;
}

/// Yes/no gate for destructive actions, injected so the core stays
/// testable without a real prompt.
pub trait ConfirmProvider {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every confirmation the same way.
pub struct AutoConfirm(pub bool);

impl ConfirmProvider for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

pub struct YouTubeSearchService {
    client: Arc<youtube::Client>,
}

impl YouTubeSearchService {
    pub fn new(client: Arc<youtube::Client>) -> Self {
        Self { client }
    }
}

impl PageFetcher for YouTubeSearchService {
    fn fetch_page(&self, query: &str, token: &PageToken) -> Result<Page> {
        self.client.search_page(query, token)
    }
}

pub struct YouTubeMetadataService {
    client: Arc<youtube::Client>,
}

impl YouTubeMetadataService {
    pub fn new(client: Arc<youtube::Client>) -> Self {
        Self { client }
    }
}

impl MetadataService for YouTubeMetadataService {
    fn resolve(&self, ids: &[String]) -> Result<Vec<Video>> {
        self.client.videos(ids)
    }
}

/// Offline stand-in used when no API key is configured.
#[derive(Default)]
pub struct MockPageFetcher;

impl PageFetcher for MockPageFetcher {
    fn fetch_page(&self, query: &str, token: &PageToken) -> Result<Page> {
        let start = match token {
            PageToken::Start => 0,
            PageToken::Next(cursor) => cursor.parse::<usize>().unwrap_or(0),
            PageToken::Exhausted => return Ok(Page::default()),
        };
        let total = 25;
        let end = (start + 10).min(total);
        let items = (start..end)
            .map(|n| sample_video(&format!("sample-{n}"), &format!("{query} #{n}")))
            .collect();
        let next_token = if end < total {
            PageToken::Next(end.to_string())
        } else {
            PageToken::Exhausted
        };
        Ok(Page { items, next_token })
    }
}

#[derive(Default)]
pub struct MockMetadataService;

impl MetadataService for MockMetadataService {
    fn resolve(&self, ids: &[String]) -> Result<Vec<Video>> {
        Ok(ids
            .iter()
            .map(|id| sample_video(id, &format!("Saved video {id}")))
            .collect())
    }
}

fn sample_video(id: &str, title: &str) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        channel: "vidstash samples".to_string(),
        thumbnail: String::new(),
        published_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_names_are_a_closed_pair() {
        assert_eq!(ListName::Unwatched.other(), ListName::Watched);
        assert_eq!(ListName::Watched.other(), ListName::Unwatched);
        assert_eq!(list_name_from_key("watched"), ListName::Watched);
        assert_eq!(list_name_from_key("anything else"), ListName::Unwatched);
    }

    #[test]
    fn mock_fetcher_pages_until_exhausted() {
        let fetcher = MockPageFetcher;
        let first = fetcher.fetch_page("cats", &PageToken::Start).unwrap();
        assert_eq!(first.items.len(), 10);
        let PageToken::Next(cursor) = first.next_token.clone() else {
            panic!("expected another page");
        };
        assert_eq!(cursor, "10");

        let last = fetcher
            .fetch_page("cats", &PageToken::Next("20".into()))
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert!(last.next_token.is_exhausted());
    }
}
