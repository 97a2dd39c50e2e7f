// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

/// The `/cookie` endpoint could not hand out a token.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token endpoint {url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("token endpoint {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("token endpoint {url} set no cookie")]
    NoCookie { url: String },
}

/// Failure of one downstream request, after the single refresh-and-retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transient { url: String, reason: String },
    #[error("request to {url} still forbidden after refreshing the token")]
    Expired { url: String },
    #[error("token refresh for {url} failed: {source}")]
    Credential {
        url: String,
        #[source]
        source: CredentialError,
    },
}

impl FetchError {
    pub(crate) fn transient(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Transient { url: url.to_string(), reason: reason.into() }
    }
}

/// A leader payload that can't become a `LeaderRecord`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("leader record is missing required field `{0}`")]
    Missing(&'static str),
}

/// Writing or verifying the output artifact.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("re-read of {} does not match what was written", .0.display())]
    Mismatch(PathBuf),
}

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("could not obtain an initial session token: {0}")]
    Credential(#[from] CredentialError),
    #[error("could not list countries: {0}")]
    Countries(#[source] FetchError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
