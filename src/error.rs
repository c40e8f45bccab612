use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing env var: {0}")]
    ConfigurationMissing(&'static str),

    #[error("Invalid env var: {0}")]
    ConfigurationInvalid(&'static str),

    #[error("YouTube API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid search endpoint")]
    Endpoint(#[from] url::ParseError),

    #[error("Request to YouTube API failed")]
    Transport(#[from] reqwest::Error),

    #[error("No videos returned from API.")]
    NoVideosFound,

    #[error("Failed to serialize snapshot")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
