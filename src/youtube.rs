use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use url::Url;

use crate::data::{Page, PageToken, Video};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Every transport or parse failure collapses into this one user-facing
/// error; the view surfaces its message inline.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("the video service is not responding; try again later")]
    Server,
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub api_key: String,
    pub user_agent: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub http_client: Option<HttpClient>,
}

pub struct Client {
    http: HttpClient,
    api_key: String,
    user_agent: String,
    base_url: Url,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            bail!("youtube client api key required");
        }
        if config.user_agent.trim().is_empty() {
            bail!("youtube client user agent required");
        }
        let base = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base)?;
        let http = match config.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .timeout(config.timeout.unwrap_or(Duration::from_secs(20)))
                .build()?,
        };

        Ok(Client {
            http,
            api_key: config.api_key,
            user_agent: config.user_agent,
            base_url,
        })
    }

    /// One page of search results. The caller passes the token from the
    /// previous page; `PageToken::Exhausted` comes back once the server
    /// stops returning a next-page cursor.
    pub fn search_page(&self, query: &str, token: &PageToken) -> Result<Page> {
        let mut url = self.base_url.join("search").context(ApiError::Server)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("part", "snippet")
                .append_pair("type", "video")
                .append_pair("maxResults", &SEARCH_PAGE_SIZE.to_string())
                .append_pair("q", query)
                .append_pair("key", &self.api_key);
            if let PageToken::Next(cursor) = token {
                pairs.append_pair("pageToken", cursor);
            }
        }

        let body: SearchResponse = self.get_json(url)?;
        let items = body
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                Some(video_from_snippet(id, item.snippet))
            })
            .collect();
        let next_token = match body.next_page_token {
            Some(cursor) => PageToken::Next(cursor),
            None => PageToken::Exhausted,
        };
        Ok(Page { items, next_token })
    }

    /// Full metadata for a batch of video ids, in the order the ids were
    /// given. Ids the server no longer knows are silently dropped.
    pub fn videos(&self, ids: &[String]) -> Result<Vec<Video>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.base_url.join("videos").context(ApiError::Server)?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("id", &ids.join(","))
            .append_pair("key", &self.api_key);

        let body: VideosResponse = self.get_json(url)?;
        let videos = body
            .items
            .into_iter()
            .map(|item| video_from_snippet(item.id, item.snippet))
            .collect();
        Ok(order_like(ids, videos))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .context(ApiError::Server)?;
        if !response.status().is_success() {
            return Err(anyhow::Error::new(ApiError::Server));
        }
        response.json().context(ApiError::Server)
    }
}

/// Restores the caller's id order over a server response, which may come
/// back in any order.
fn order_like(ids: &[String], videos: Vec<Video>) -> Vec<Video> {
    let mut by_id: HashMap<String, Video> = videos
        .into_iter()
        .map(|video| (video.id.clone(), video))
        .collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

fn video_from_snippet(id: String, snippet: Snippet) -> Video {
    let thumbnail = snippet
        .thumbnails
        .medium
        .or(snippet.thumbnails.default)
        .map(|thumb| thumb.url)
        .unwrap_or_default();
    Video {
        id,
        title: snippet.title,
        channel: snippet.channel_title,
        thumbnail,
        published_at: snippet.published_at,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize, Default)]
struct Thumbnails {
    #[serde(default)]
    medium: Option<Thumbnail>,
    #[serde(default)]
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet_json(title: &str) -> String {
        format!(
            r#"{{
                "title": "{title}",
                "channelTitle": "chan",
                "publishedAt": "2024-03-01T12:00:00Z",
                "thumbnails": {{"medium": {{"url": "https://img.test/m.jpg"}}}}
            }}"#
        )
    }

    #[test]
    fn search_response_keeps_cursor_and_drops_non_videos() {
        let json = format!(
            r#"{{
                "nextPageToken": "CAUQAA",
                "items": [
                    {{"id": {{"videoId": "v1"}}, "snippet": {snippet}}},
                    {{"id": {{}}, "snippet": {snippet}}}
                ]
            }}"#,
            snippet = snippet_json("first")
        );
        let body: SearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(body.next_page_token.as_deref(), Some("CAUQAA"));
        let ids: Vec<_> = body
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        assert_eq!(ids, vec!["v1"]);
    }

    #[test]
    fn missing_cursor_means_exhausted() {
        let body: SearchResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(body.next_page_token.is_none());
    }

    #[test]
    fn order_like_restores_request_order() {
        let videos = vec![
            video_from_snippet("b".into(), serde_json::from_str(&snippet_json("b")).unwrap()),
            video_from_snippet("a".into(), serde_json::from_str(&snippet_json("a")).unwrap()),
        ];
        let ordered = order_like(&["a".into(), "b".into(), "c".into()], videos);
        let ids: Vec<_> = ordered.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn snippet_falls_back_to_default_thumbnail() {
        let json = r#"{
            "title": "t",
            "channelTitle": "c",
            "publishedAt": "2024-03-01T12:00:00Z",
            "thumbnails": {"default": {"url": "https://img.test/d.jpg"}}
        }"#;
        let snippet: Snippet = serde_json::from_str(json).unwrap();
        let video = video_from_snippet("x".into(), snippet);
        assert_eq!(video.thumbnail, "https://img.test/d.jpg");
    }

    #[test]
    fn client_requires_key_and_agent() {
        assert!(Client::new(ClientConfig::default()).is_err());
        assert!(Client::new(ClientConfig {
            api_key: "k".into(),
            ..ClientConfig::default()
        })
        .is_err());
    }
}
