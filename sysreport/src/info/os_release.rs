//! Distribution name from os-release metadata

use std::path::Path;

use crate::error::ReportError;

const PRETTY_NAME: &str = "PRETTY_NAME";

/// Find the `PRETTY_NAME` value in os-release content
///
/// The line is split on the first `=`; the value is trimmed and its
/// surrounding quotes removed.
pub fn parse_pretty_name(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != PRETTY_NAME {
            return None;
        }
        Some(value.trim().trim_matches('"').trim_matches('\'').to_string())
    })
}

pub fn pretty_name(path: &Path) -> Result<String, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::read(path, e))?;
    parse_pretty_name(&content).ok_or_else(|| ReportError::MissingKey {
        key: PRETTY_NAME.to_string(),
        path: path.to_path_buf(),
    })
}

/// Pretty name, or the failure as text
pub fn describe(path: &Path) -> String {
    pretty_name(path).unwrap_or_else(|e| {
        tracing::warn!("{}", e);
        e.to_string()
    })
}
