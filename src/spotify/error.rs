use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Spotify rejected the credentials ({0}). Run concertista auth")]
    NotAuthorized(String),
}
