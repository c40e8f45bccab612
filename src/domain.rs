use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

pub const DEFAULT_TITLE: &str = "Episode";

/// Body of a `search.list` response. Only the fields the snapshot needs are kept.
#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SearchItem {
    #[serde(deserialize_with = "lenient_field")]
    pub id: Option<SearchItemId>,
    #[serde(deserialize_with = "lenient_field")]
    pub snippet: Option<Snippet>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(deserialize_with = "lenient_field")]
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Snippet {
    #[serde(deserialize_with = "lenient_field")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Thumbnails {
    #[serde(deserialize_with = "lenient_field")]
    pub high: Option<Thumbnail>,
    #[serde(deserialize_with = "lenient_field")]
    pub medium: Option<Thumbnail>,
    #[serde(deserialize_with = "lenient_field")]
    pub default: Option<Thumbnail>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(deserialize_with = "lenient_field")]
    pub url: Option<String>,
}

// `items` that is missing or not an array reads as empty; an item that is not
// an object is kept as an empty item so later filtering drops it.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<SearchItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

// A field of the wrong type reads as absent instead of failing its parent.
fn lenient_field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub thumb: String,
    pub published_at: Option<String>,
}

impl VideoRecord {
    /// Returns `None` when the item has no video id or no usable thumbnail.
    pub fn from_search_item(item: SearchItem) -> Option<Self> {
        let id = present(item.id.and_then(|id| id.video_id));
        let snippet = item.snippet.unwrap_or_default();
        let title = present(snippet.title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let published_at = present(snippet.published_at);
        let thumb = snippet
            .thumbnails
            .and_then(best_thumbnail)
            .or_else(|| id.as_deref().map(fallback_thumbnail));

        Some(Self {
            id: id?,
            title,
            thumb: thumb?,
            published_at,
        })
    }
}

/// Maps every search result in API order, dropping incomplete ones.
pub fn video_records(response: SearchResponse) -> Vec<VideoRecord> {
    response
        .items
        .into_iter()
        .filter_map(VideoRecord::from_search_item)
        .collect()
}

pub fn fallback_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

fn best_thumbnail(thumbnails: Thumbnails) -> Option<String> {
    [thumbnails.high, thumbnails.medium, thumbnails.default]
        .into_iter()
        .flatten()
        .find_map(|thumbnail| present(thumbnail.url))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutputPayload {
    pub generated_at: String,
    pub channel_id: String,
    pub videos: Vec<VideoRecord>,
}
