use std::path::PathBuf;

/// A convenience [`Result`] for the tilesets CLI.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the command line layer.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Invalid tileset id '{0}': expected {{owner}}.{{handle}}")]
    InvalidTilesetId(String),

    #[error("Cannot read recipe {1}: {0}")]
    RecipeIo(#[source] std::io::Error, PathBuf),

    #[error("Recipe {1} is not valid JSON: {0}")]
    RecipeJson(#[source] serde_json::Error, PathBuf),

    #[error(transparent)]
    ClientError(#[from] tilesets_client::TilesetsError),
}
