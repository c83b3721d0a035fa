//! Bearer token resolution.
//!
//! Precedence: explicit argument, then [`ACCESS_TOKEN_VAR`], then the legacy
//! [`LEGACY_ACCESS_TOKEN_VAR`] spelling. Empty values never resolve.

use std::fmt;

use crate::env::{Env, OsEnv};
use crate::{TilesetsError, TilesetsResult};

/// Primary environment variable consulted when no explicit token is given.
pub const ACCESS_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";

/// Legacy spelling still honored for older deployments.
pub const LEGACY_ACCESS_TOKEN_VAR: &str = "MapboxAccessToken";

/// The opaque bearer token authenticating all API calls.
///
/// Guaranteed non-empty; construction goes through [`resolve_token`] or
/// [`resolve_token_with`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// The raw token, for embedding into request URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens must not leak through debug output.
        f.write_str("Credential(***)")
    }
}

/// Resolve a token from an explicit argument or the process environment.
pub fn resolve_token(explicit: Option<&str>) -> TilesetsResult<Credential> {
    resolve_token_with(explicit, &OsEnv)
}

/// Resolve a token with an injected environment, highest precedence first.
pub fn resolve_token_with(explicit: Option<&str>, env: &impl Env) -> TilesetsResult<Credential> {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(env.get_env_str(ACCESS_TOKEN_VAR))
        .chain(env.get_env_str(LEGACY_ACCESS_TOKEN_VAR))
        .find(|token| !token.is_empty())
        .map(Credential)
        .ok_or(TilesetsError::MissingCredential)
}
