//! Error types for report generation

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Error reading {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} not found in {}", .key, .path.display())]
    MissingKey { key: String, path: PathBuf },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

impl ReportError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
