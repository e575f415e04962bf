// src/error.rs
//! Error taxonomy.
//!
//! Only [`RunError`] ever leaves a run. Everything that can go wrong for a
//! single target ([`FetchError`]) is folded into that target's report by the
//! runner and never crosses the worker boundary.
use std::path::PathBuf;

use thiserror::Error;

/// The enable-list could not be read at all.
#[derive(Debug, Error)]
#[error("failed to read enable-list {}: {source}", path.display())]
pub struct InputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Retrieving or parsing one target's page failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to parse URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to fetch {url:?}: {reason}")]
    Request { url: String, reason: String },
    #[error("received HTTP {status} for {url:?}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url:?}: {reason}")]
    Body { url: String, reason: String },
    #[error("failed to parse response from {url:?}: {reason}")]
    Parse { url: String, reason: String },
}

/// A per-target YAML configuration was unreadable or had the wrong shape.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("selector node {label:?} must be a string or a mapping, found {found}")]
    Shape { label: String, found: &'static str },
}

/// Writing a report encoding failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Everything allowed to terminate a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
