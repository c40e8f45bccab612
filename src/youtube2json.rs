use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::Config;
use crate::domain::{self, OutputPayload, VideoRecord};
use crate::error::{Error, Result};
use crate::youtube::VideoSearch;

/// Fetches the newest uploads and replaces the snapshot at `config.out_path`.
/// Returns the number of videos written.
pub async fn update_latest_videos(search: &impl VideoSearch, config: &Config) -> Result<usize> {
    let response = search.latest_videos(&config.channel_id).await?;
    let videos = domain::video_records(response);
    log::info!("{} videos kept after filtering", videos.len());

    write_snapshot(&config.out_path, &config.channel_id, videos, Utc::now()).await
}

pub async fn write_snapshot(
    out_path: &Path,
    channel_id: &str,
    videos: Vec<VideoRecord>,
    generated_at: DateTime<Utc>,
) -> Result<usize> {
    if videos.is_empty() {
        return Err(Error::NoVideosFound);
    }

    let payload = OutputPayload {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        channel_id: channel_id.to_string(),
        videos,
    };
    let mut contents = serde_json::to_string_pretty(&payload)?;
    contents.push('\n');

    tokio::fs::write(out_path, contents)
        .await
        .map_err(|source| Error::Write {
            path: out_path.to_path_buf(),
            source,
        })?;

    let count = payload.videos.len();
    println!("Wrote {} with {} videos.", out_path.display(), count);
    log::info!("Snapshot written to {}", out_path.display());
    Ok(count)
}
