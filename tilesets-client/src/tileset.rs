//! The tileset entity returned by session operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{DEFAULT_API_ROOT, TilesetSession};
use crate::{TilesetsError, TilesetsResult};

/// Who can read a tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Readable by anyone.
    Public,
    /// Readable by the owning account only.
    Private,
}

/// Server-side processing state.
///
/// Opaque data sourced from the remote service; the client neither tracks
/// nor validates transitions between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    /// Waiting for a worker.
    Queued,
    /// A processing job is running.
    Processing,
    /// The last job completed.
    Success,
    /// The last job failed.
    Failed,
}

/// One remote tileset, as produced by the create, list and status
/// operations of a [`TilesetSession`].
///
/// Every attribute is optional: the remote service omits whatever does not
/// apply, and unknown response fields are silently ignored. Instances are
/// plain records constructed fresh per response record and never mutated;
/// there is no cache and no identity map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tileset {
    /// Identity in the form `{owner}.{handle}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tileset kind as reported by the service, e.g. `vector`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Default map center, `[lon, lat]` with an optional trailing zoom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,
    /// Creation timestamp, verbatim from the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Last-modified timestamp, verbatim from the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Read visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Size in bytes, absent until processing has produced output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    /// Processing state, absent for never-processed tilesets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessingStatus>,
    /// The recipe supplied at creation time. Client-side only; never part
    /// of the serializable projection.
    #[serde(skip)]
    pub recipe: Option<Value>,
}

impl Tileset {
    /// Project exactly the non-null serializable attributes, in their
    /// defined order. The recipe is excluded unconditionally.
    #[must_use]
    pub fn to_projection(&self) -> serde_json::Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Unreachable for this field set; projection of nothing.
            _ => serde_json::Map::new(),
        }
    }

    /// Fetch this tileset's processing status from the service.
    ///
    /// Reuses `session` when one is given; otherwise builds a one-off
    /// session from `token` and `api_root`. With neither a session nor a
    /// token available the call fails with the fixed "Token must be
    /// provided" message. The tileset does not keep any session alive.
    pub fn fetch_status(
        &self,
        session: Option<&TilesetSession>,
        token: Option<&str>,
        api_root: Option<&str>,
    ) -> TilesetsResult<Value> {
        match session {
            Some(session) => self.status_from(session),
            None => {
                let token = token.ok_or(TilesetsError::TokenRequired)?;
                let api_root = api_root.unwrap_or(DEFAULT_API_ROOT);
                self.status_from(&TilesetSession::new(Some(token), api_root)?)
            }
        }
    }

    fn status_from(&self, session: &TilesetSession) -> TilesetsResult<Value> {
        let id = self.id.as_deref().ok_or(TilesetsError::MissingTilesetId)?;
        session.status(id)
    }
}
