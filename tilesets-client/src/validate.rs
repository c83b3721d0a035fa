//! Tileset id validation.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `{owner}.{handle}` where both parts are 1-32 characters from
/// `[a-z0-9-_]`, bounding the combined owner+handle length at 64.
static TILESET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9-_]{1,32}\.[a-z0-9-_]{1,32}$").expect("valid tileset id regex")
});

/// Check whether `id` is a well-formed tileset id.
///
/// A tileset id is a non-empty owner and a non-empty handle separated by
/// exactly one `.`.
#[must_use]
pub fn is_valid_tileset_id(id: &str) -> bool {
    TILESET_ID.is_match(id)
}
