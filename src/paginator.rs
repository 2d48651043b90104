use std::sync::Arc;

use anyhow::Result;

use crate::data::{PageFetcher, PageToken, Video};

/// Session state for one search: the active query and the continuation
/// token from the last page. Not a concurrency-safe type; the UI keeps at
/// most one fetch in flight.
pub struct SearchPaginator {
    fetcher: Arc<dyn PageFetcher>,
    query: String,
    token: PageToken,
}

impl SearchPaginator {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            query: String::new(),
            token: PageToken::Start,
        }
    }

    /// Starts a fresh session for `query` and returns the first page. On
    /// failure the session stays at the failed query so the caller can
    /// retry with `load_more`.
    pub fn search(&mut self, query: &str) -> Result<Vec<Video>> {
        self.query = query.to_string();
        self.token = PageToken::Start;
        let page = self.fetcher.fetch_page(&self.query, &self.token)?;
        self.token = page.next_token;
        Ok(page.items)
    }

    /// Next page for the current session, or `None` once the server has
    /// reported the end of results. Issues no fetch in the `None` case.
    pub fn load_more(&mut self) -> Result<Option<Vec<Video>>> {
        if self.token.is_exhausted() {
            return Ok(None);
        }
        let page = self.fetcher.fetch_page(&self.query, &self.token)?;
        self.token = page.next_token;
        Ok(Some(page.items))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_exhausted(&self) -> bool {
        self.token.is_exhausted()
    }
}
