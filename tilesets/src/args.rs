//! Command line argument definitions.

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};
use tilesets_client::DEFAULT_API_ROOT;

/// Defines the styles used for the CLI help output.
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Blue.on_default().bold())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::White.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug, PartialEq)]
#[command(
    about,
    version,
    after_help = "Use RUST_LOG environment variable to control logging level, e.g. RUST_LOG=debug or RUST_LOG=tilesets_client=debug.",
    styles = HELP_STYLES
)]
pub struct Args {
    /// Access token. Falls back to MAPBOX_ACCESS_TOKEN, then the legacy
    /// MapboxAccessToken environment variable.
    #[arg(short, long, global = true)]
    pub token: Option<String>,
    /// API root URL.
    #[arg(long, global = true, default_value = DEFAULT_API_ROOT)]
    pub api: String,
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per remote operation.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create a tileset from a recipe.
    Create {
        /// Tileset id, in the form {owner}.{handle}.
        tileset_id: String,
        /// Path to the recipe JSON document.
        #[arg(short, long)]
        recipe: PathBuf,
        /// Human-readable tileset name.
        #[arg(short, long, default_value = "")]
        name: String,
        /// Free-form description.
        #[arg(short, long, default_value = "")]
        description: String,
        /// Make the tileset publicly readable instead of private.
        #[arg(long)]
        public: bool,
    },
    /// Validate a recipe document against the server-side schema.
    ValidateRecipe {
        /// Path to the recipe JSON document.
        recipe: PathBuf,
    },
    /// List every tileset owned by an account.
    List {
        /// Account username.
        username: String,
    },
    /// Show the processing status of a tileset.
    Status {
        /// Tileset id, in the form {owner}.{handle}.
        tileset_id: String,
    },
}
