//! Configuration errors
//!
//! Generation and pursuit never fail; only loading a tuning file can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
