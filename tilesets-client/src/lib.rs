#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod env;

mod error;
pub use error::{TilesetsError, TilesetsResult};

mod link;

mod session;
pub use session::{CreateTileset, DEFAULT_API_ROOT, TilesetPages, TilesetSession};

mod tileset;
pub use tileset::{ProcessingStatus, Tileset, Visibility};

mod token;
pub use token::{
    ACCESS_TOKEN_VAR, Credential, LEGACY_ACCESS_TOKEN_VAR, resolve_token, resolve_token_with,
};

pub mod transport;

mod validate;
pub use validate::is_valid_tileset_id;
