//! Crate-level error type and `Result` alias.
//!
//! Every failure a transfer can hit maps onto one variant here, so the
//! binary can turn any of them into a non-zero exit status.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file {path:?} could not be read: {source}")]
    ConfigurationMissing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration file {path:?} is invalid: {source}")]
    ConfigurationInvalid {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: &'static str },

    #[error("Unexpected argument: {value}")]
    UnexpectedArgument { value: String },

    #[error("Invalid action received: {action}")]
    InvalidAction { action: String },

    #[error("Invalid request: {field} must not be empty")]
    InvalidRequest { field: &'static str },

    #[error("{path:?}: {source}")]
    LocalFilesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request to OneSky failed: {0}")]
    VendorTransport(#[from] reqwest::Error),

    #[error("OneSky responded with status {status}: {body}")]
    VendorStatus { status: u16, body: String },

    #[error("OneSky rejected the request with status {status}: {body}")]
    VendorApplication { status: u16, body: String },

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("malformed response from OneSky ({source}): {body}")]
    MalformedResponse {
        body: String,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::LocalFilesystem {
            path: path.into(),
            source,
        }
    }
}
