// crates/placedb-core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the ingestion pipeline and the resolution engine.
///
/// Per-record anomalies (malformed input lines, unknown lookup keys) are
/// recovered locally and never reach this type; only whole-file or
/// whole-store failures do.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A store file did not exist when the engine was constructed, or an
    /// ingestion input file could not be opened.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid bundled data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
