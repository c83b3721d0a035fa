#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod args;

mod error;
pub use error::{CliError, CliResult};

pub mod logging;
