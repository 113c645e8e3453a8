// src/error.rs
// =============================================================================
// Typed errors for the layers below main.rs.
//
// - FetchError: one profile page could not be read. The crawl logs it and
//   keeps going, so it never reaches the user as a failure.
// - SessionError: we could not log in. Fatal, raised before any fetch.
// - TableError: a saved profile table could not be read or written.
//
// main.rs wraps all of these in anyhow::Error with extra context.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("environment variable {0} is not set")]
    MissingPassword(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no login form found at {0}")]
    LoginFormMissing(String),

    #[error("login was rejected (HTTP {0})")]
    LoginRejected(u16),
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile {0} appears more than once")]
    DuplicateProfile(String),

    #[error("the table has no rows")]
    Empty,
}
