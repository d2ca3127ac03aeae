//! Error taxonomy shared by the harvest pipeline, the Spotify clients and the
//! persistence layer.
//!
//! Only [`HarvestError::SourceUnavailable`] and [`HarvestError::SinkError`] are
//! fatal to a harvest run. Search and per-genre failures are contained by the
//! pipeline and surface as data on the per-genre report.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// The genre input is missing or unreadable.
    #[error("genre source {path} is unavailable: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// One page request failed; the genre keeps what was gathered so far.
    #[error("search for genre '{genre}' failed at offset {offset}: {reason}")]
    SearchRequestFailed {
        genre: String,
        offset: u32,
        reason: String,
    },

    /// The catalog had nothing for this genre.
    #[error("genre '{genre}' yielded no artists")]
    GenreFailed { genre: String },

    #[error("cannot write {path}: {reason}")]
    SinkError { path: PathBuf, reason: String },

    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify API responded with {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("scraping genres failed: {0}")]
    Scrape(String),
}

impl HarvestError {
    pub fn sink(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        HarvestError::SinkError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        HarvestError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
