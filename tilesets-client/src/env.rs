//! Environment variable access that can be mocked in tests.
//!
//! Credential resolution stays deterministic by going through the [`Env`]
//! trait instead of reading the process environment directly.
//!
//! - [`OsEnv`]: Production implementation
//! - [`FauxEnv`]: Test implementation

use std::collections::HashMap;
use std::ffi::OsString;

use log::warn;

/// Environment variable access with Unicode validation.
pub trait Env {
    /// Get an environment variable as an [`OsString`] without Unicode validation.
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Get an environment variable as a UTF-8 validated [`String`].
    ///
    /// Logs a warning and returns `None` if the variable contains invalid Unicode.
    #[must_use]
    fn get_env_str(&self, key: &str) -> Option<String> {
        match self.var_os(key) {
            Some(s) => match s.into_string() {
                Ok(v) => Some(v),
                Err(v) => {
                    let v = v.to_string_lossy();
                    warn!(
                        "Environment variable {key} has invalid unicode. Lossy representation: {v}"
                    );
                    None
                }
            },
            None => None,
        }
    }
}

/// Production implementation that accesses system environment variables.
#[derive(Debug, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Test implementation with configurable environment variables.
#[derive(Debug, Default)]
pub struct FauxEnv(pub HashMap<&'static str, OsString>);

impl Env for FauxEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.0.get(key).map(Into::into)
    }
}
