//! The authenticated session over the tilesets management API.

use std::collections::VecDeque;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::link::next_link;
use crate::tileset::Tileset;
use crate::token::{Credential, resolve_token};
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use crate::{TilesetsError, TilesetsResult};

/// Production API root used when no override is supplied.
pub const DEFAULT_API_ROOT: &str = "https://api.mapbox.com";

/// Frozen per-operation URL templates.
///
/// Each template already carries the `access_token` query parameter; the
/// `{tileset_id}` / `{username}` placeholders are substituted per call.
#[derive(Debug, Clone)]
struct UrlTemplates {
    create_tileset: String,
    list_tilesets: String,
    validate_recipe: String,
    status: String,
}

impl UrlTemplates {
    fn new(api_root: &str, token: &Credential) -> Self {
        let token = token.as_str();
        Self {
            create_tileset: format!("{api_root}/tilesets/v1/{{tileset_id}}?access_token={token}"),
            list_tilesets: format!("{api_root}/tilesets/v1/{{username}}?access_token={token}"),
            validate_recipe: format!("{api_root}/tilesets/v1/validateRecipe?access_token={token}"),
            status: format!("{api_root}/tilesets/v1/{{tileset_id}}/status?access_token={token}"),
        }
    }
}

/// Options for [`TilesetSession::create_tileset`].
#[derive(Debug, Clone)]
pub struct CreateTileset {
    /// Human-readable tileset name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether the tileset is readable by the owning account only.
    ///
    /// `true` by default. The request body carries the flag only when it is
    /// set: the API treats an absent flag as non-private, so `false` is
    /// expressed by omission rather than sent explicitly.
    pub private: bool,
}

impl Default for CreateTileset {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            private: true,
        }
    }
}

/// An authenticated session over the tilesets management API.
///
/// Immutable after construction. No call mutates session state, so one
/// session can serve concurrent independent calls and be reused freely.
#[derive(Debug, Clone)]
pub struct TilesetSession {
    token: Credential,
    urls: UrlTemplates,
    transport: Arc<dyn Transport>,
}

impl TilesetSession {
    /// Open a session against `api_root`.
    ///
    /// `token` falls back to the environment precedence of
    /// [`resolve_token`]; a session cannot exist without a credential.
    pub fn new(token: Option<&str>, api_root: &str) -> TilesetsResult<Self> {
        Self::with_transport(token, api_root, Arc::new(ReqwestTransport::new()?))
    }

    /// Open a session with an injected transport.
    pub fn with_transport(
        token: Option<&str>,
        api_root: &str,
        transport: Arc<dyn Transport>,
    ) -> TilesetsResult<Self> {
        let token = resolve_token(token)?;
        let urls = UrlTemplates::new(api_root.trim_end_matches('/'), &token);
        Ok(Self {
            token,
            urls,
            transport,
        })
    }

    /// Create a tileset from a recipe.
    ///
    /// On success the returned [`Tileset`] reflects the locally supplied
    /// name, description and recipe, never the server's response body.
    pub fn create_tileset(
        &self,
        tileset_id: &str,
        recipe: &Value,
        opts: &CreateTileset,
    ) -> TilesetsResult<Tileset> {
        let mut body = serde_json::json!({
            "description": opts.description,
            "name": opts.name,
            "recipe": recipe,
        });
        if opts.private {
            body["private"] = Value::Bool(true);
        }
        let url = self.urls.create_tileset.replace("{tileset_id}", tileset_id);
        self.request(Method::POST, url, Some(body))?;
        Ok(Tileset {
            name: Some(opts.name.clone()),
            description: Some(opts.description.clone()),
            recipe: Some(recipe.clone()),
            ..Tileset::default()
        })
    }

    /// Submit a recipe document for server-side validation.
    ///
    /// The validation result schema is owned by the remote service; it is
    /// returned as parsed JSON, verbatim.
    pub fn validate_recipe(&self, recipe: &Value) -> TilesetsResult<Value> {
        let url = self.urls.validate_recipe.clone();
        let response = self.request(Method::PUT, url, Some(recipe.clone()))?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// List every tileset owned by `username`, following pagination lazily.
    ///
    /// The first page is fetched eagerly, so a bad username or credential
    /// fails here. Later pages are fetched one blocking call at a time as
    /// the iterator crosses a page boundary; page N+1 is never requested
    /// before page N's records have been yielded.
    pub fn list_tilesets(&self, username: &str) -> TilesetsResult<TilesetPages<'_>> {
        let url = self.urls.list_tilesets.replace("{username}", username);
        let response = self.request(Method::GET, url, None)?;
        TilesetPages::from_first_page(self, &response)
    }

    /// Query the processing status of a tileset.
    pub fn status(&self, tileset_id: &str) -> TilesetsResult<Value> {
        let url = self.urls.status.replace("{tileset_id}", tileset_id);
        let response = self.request(Method::GET, url, None)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch a continuation page. The next-link sent by the service does not
    /// carry the token, so it is re-appended here.
    fn next_page(&self, link: &str) -> TilesetsResult<ApiResponse> {
        let url = format!("{link}&access_token={}", self.token.as_str());
        self.request(Method::GET, url, None)
    }

    /// Execute one request; any status other than 200 is a failure carrying
    /// the raw response body.
    fn request(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> TilesetsResult<ApiResponse> {
        // Log the path only; the query string carries the token.
        debug!("{method} {}", url.split('?').next().unwrap_or_default());
        let response = self.transport.execute(&ApiRequest { method, url, body })?;
        if response.status == StatusCode::OK {
            Ok(response)
        } else {
            Err(TilesetsError::RemoteApi(response.body))
        }
    }
}

/// Lazy, forward-only iterator over the tilesets of one listing.
///
/// Holds a single page of records at a time. A page fetch past the first
/// can still fail remotely; such a failure surfaces as one `Err` item and
/// ends the iteration, consistent with the no-retry policy.
#[derive(Debug)]
pub struct TilesetPages<'a> {
    session: &'a TilesetSession,
    records: VecDeque<Value>,
    next: Option<String>,
    done: bool,
}

impl<'a> TilesetPages<'a> {
    fn from_first_page(session: &'a TilesetSession, response: &ApiResponse) -> TilesetsResult<Self> {
        let (records, next) = parse_page(response)?;
        Ok(Self {
            session,
            records,
            next,
            done: false,
        })
    }
}

fn parse_page(response: &ApiResponse) -> TilesetsResult<(VecDeque<Value>, Option<String>)> {
    let records: VecDeque<Value> = serde_json::from_str(&response.body)?;
    let next = response.link.as_deref().and_then(next_link);
    Ok((records, next))
}

impl Iterator for TilesetPages<'_> {
    type Item = TilesetsResult<Tileset>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(record) = self.records.pop_front() {
                return Some(serde_json::from_value(record).map_err(TilesetsError::from));
            }
            let link = self.next.take()?;
            match self
                .session
                .next_page(&link)
                .and_then(|response| parse_page(&response))
            {
                Ok((records, next)) => {
                    self.records = records;
                    self.next = next;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for TilesetPages<'_> {}
