use std::env;
use std::fs;
use std::path::Path;

use clap::Parser as _;
use serde_json::Value;
use tilesets::args::{Args, Command};
use tilesets::logging::init_tracing;
use tilesets::{CliError, CliResult};
use tilesets_client::{CreateTileset, TilesetSession, is_valid_tileset_id};
use tracing::error;

fn run(args: Args) -> CliResult<()> {
    let session = TilesetSession::new(args.token.as_deref(), &args.api)?;
    match args.command {
        Command::Create {
            tileset_id,
            recipe,
            name,
            description,
            public,
        } => {
            require_valid_id(&tileset_id)?;
            let recipe = read_recipe(&recipe)?;
            let opts = CreateTileset {
                name,
                description,
                private: !public,
            };
            let tileset = session.create_tileset(&tileset_id, &recipe, &opts)?;
            print_json(&Value::Object(tileset.to_projection()));
        }
        Command::ValidateRecipe { recipe } => {
            let recipe = read_recipe(&recipe)?;
            print_json(&session.validate_recipe(&recipe)?);
        }
        Command::List { username } => {
            for tileset in session.list_tilesets(&username)? {
                print_json(&Value::Object(tileset?.to_projection()));
            }
        }
        Command::Status { tileset_id } => {
            require_valid_id(&tileset_id)?;
            print_json(&session.status(&tileset_id)?);
        }
    }
    Ok(())
}

fn require_valid_id(tileset_id: &str) -> CliResult<()> {
    if is_valid_tileset_id(tileset_id) {
        Ok(())
    } else {
        Err(CliError::InvalidTilesetId(tileset_id.to_string()))
    }
}

fn read_recipe(path: &Path) -> CliResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| CliError::RecipeIo(e, path.to_path_buf()))?;
    serde_json::from_str(&text).map_err(|e| CliError::RecipeJson(e, path.to_path_buf()))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn main() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    init_tracing(&filter, env::var("TILESETS_FORMAT").ok());

    let args = Args::parse();
    if let Err(e) = run(args) {
        // Ensure the message is printed, even if the logging is disabled
        if log::log_enabled!(log::Level::Error) {
            error!("{e}");
        } else {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}
