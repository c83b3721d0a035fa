//! Error types for the tilesets client.

/// A convenience [`Result`] for the tilesets client.
pub type TilesetsResult<T> = Result<T, TilesetsError>;

/// Errors that can occur while talking to the tilesets API.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum TilesetsError {
    /// No token was supplied and none could be resolved from the environment.
    #[error("No access token provided")]
    MissingCredential,

    /// A tileset tried to fetch its status without a session or a token.
    #[error("Token must be provided")]
    TokenRequired,

    /// The remote service answered with a non-200 status. The message is the
    /// raw response body, verbatim; the remote error schema is not parsed.
    #[error("{0}")]
    RemoteApi(String),

    /// A tileset without an id cannot query its processing status.
    #[error("Tileset has no id")]
    MissingTilesetId,

    /// The HTTP transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A response body could not be parsed as the expected JSON shape.
    #[error(transparent)]
    InvalidResponse(#[from] serde_json::Error),
}
