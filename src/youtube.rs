use std::future::Future;

use reqwest::Client;
use url::Url;

use crate::domain::SearchResponse;
use crate::error::{Error, Result};

pub const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

const MAX_RESULTS: &str = "3";

pub trait VideoSearch {
    fn latest_videos(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<SearchResponse>> + Send;
}

/// Builds a `search.list` query for the newest uploads of a channel.
pub fn search_url(base: &Url, api_key: &str, channel_id: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("key", api_key)
        .append_pair("channelId", channel_id)
        .append_pair("part", "snippet")
        .append_pair("order", "date")
        .append_pair("maxResults", MAX_RESULTS)
        .append_pair("type", "video");
    url
}

pub struct YouTubeSearchClient {
    http: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeSearchClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_base_url(api_key, Url::parse(SEARCH_ENDPOINT)?))
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }
}

impl VideoSearch for YouTubeSearchClient {
    async fn latest_videos(&self, channel_id: &str) -> Result<SearchResponse> {
        log::info!("Fetching latest videos for channel {}", channel_id);
        let url = search_url(&self.base_url, &self.api_key, channel_id);
        // The request URL carries the API key, so it must not reach error text.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response
            .json::<SearchResponse>()
            .await
            .map_err(reqwest::Error::without_url)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use super::*;

    async fn serve(app: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Url::parse(&format!("http://{}/youtube/v3/search", addr)).unwrap()
    }

    #[test]
    fn search_url_carries_fixed_parameters() {
        let base = Url::parse(SEARCH_ENDPOINT).unwrap();
        let url = search_url(&base, "k&y", "UC123");

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/search\
             ?key=k%26y&channelId=UC123&part=snippet&order=date&maxResults=3&type=video"
        );
    }

    #[tokio::test]
    async fn fetches_and_parses_search_results() {
        let app = Router::new().route(
            "/youtube/v3/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("key").map(String::as_str) != Some("secret")
                    || params.get("channelId").map(String::as_str) != Some("UC123")
                    || params.get("type").map(String::as_str) != Some("video")
                {
                    return (StatusCode::BAD_REQUEST, Json(json!({})));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "kind": "youtube#searchListResponse",
                        "items": [{ "id": { "videoId": "abc" }, "snippet": { "title": "Ep1" } }]
                    })),
                )
            }),
        );
        let client = YouTubeSearchClient::with_base_url("secret", serve(app).await);

        let response = client.latest_videos("UC123").await.unwrap();

        assert_eq!(response.items.len(), 1);
        let id = response.items[0].id.as_ref().unwrap();
        assert_eq!(id.video_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn error_status_carries_code_and_body() {
        let app = Router::new().route(
            "/youtube/v3/search",
            get(|| async { (StatusCode::FORBIDDEN, "quotaExceeded") }),
        );
        let client = YouTubeSearchClient::with_base_url("secret", serve(app).await);

        let err = client.latest_videos("UC123").await.unwrap_err();

        assert!(matches!(err, Error::Http { status: 403, .. }));
        assert_eq!(err.to_string(), "YouTube API error 403: quotaExceeded");
    }

    #[tokio::test]
    async fn connection_errors_do_not_reveal_api_key() {
        let base = Url::parse("http://127.0.0.1:1/youtube/v3/search").unwrap();
        let client = YouTubeSearchClient::with_base_url("SUPERSECRETKEY", base);

        let err = client.latest_videos("UC123").await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        let report = format!("{:#}", anyhow::Error::from(err));
        assert!(!report.contains("SUPERSECRETKEY"), "{}", report);
    }
}
