use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Request to {url} failed with status {status}")]
    Http { status: u16, url: String },

    #[error("Malformed data: {0}")]
    MalformedData(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown widget type: {0}")]
    UnknownWidget(String),

    #[error("Invalid navigation marker: {0}")]
    InvalidMarker(String),
}

impl Error {
    /// Failures the user can fix by navigating again.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout(_) | Error::Http { .. }
        )
    }
}
