use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Failed to fetch invidious instances: {status} {body}")]
    Directory { status: u16, body: String },

    #[error("Failed to fetch invidious instances. JSON error: {0}")]
    DirectoryFormat(String),

    #[error("No working API instances")]
    NoMirrors,

    #[error("Invalid playlist url: {0}")]
    InvalidPlaylistUrl(String),
}
