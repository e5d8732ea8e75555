use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse artist fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),

    #[error("artist {0} not found")]
    ArtistNotFound(String),

    #[error("{0} is currently busy and not taking quote requests")]
    ArtistBusy(String),

    #[error("artist {id} is malformed: {reason}")]
    InvalidArtist { id: String, reason: String },

    #[error("duplicate artist id {0}")]
    DuplicateId(String),
}
