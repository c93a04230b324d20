//! Privileged principal extraction from a sudoers file
//!
//! Only lines granting "run as any user" are considered. The principal is the
//! first token of such a line; a leading `%` marks a group and is stripped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

const RUN_AS_USER: &str = "ALL=(ALL)";
const RUN_AS_USER_AND_GROUP: &str = "ALL=(ALL:ALL)";

/// Which elevation marker makes a line a candidate
///
/// `ALL=(ALL:ALL)` does not contain `ALL=(ALL)` as a substring, so the two
/// single-marker policies are disjoint. `Any` accepts both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerPolicy {
    /// Only `ALL=(ALL)`
    RunAsUser,
    /// Only `ALL=(ALL:ALL)`
    RunAsUserAndGroup,
    #[default]
    Any,
}

impl MarkerPolicy {
    fn markers(self) -> &'static [&'static str] {
        match self {
            MarkerPolicy::RunAsUser => &[RUN_AS_USER],
            MarkerPolicy::RunAsUserAndGroup => &[RUN_AS_USER_AND_GROUP],
            MarkerPolicy::Any => &[RUN_AS_USER, RUN_AS_USER_AND_GROUP],
        }
    }

    pub fn matches(self, line: &str) -> bool {
        self.markers().iter().any(|marker| line.contains(marker))
    }
}

/// Extract principals from sudoers content, in file order
pub fn parse_superusers(content: &str, policy: MarkerPolicy) -> Vec<String> {
    content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| policy.matches(line))
        .filter_map(|line| line.split_whitespace().next())
        .map(|principal| principal.strip_prefix('%').unwrap_or(principal).to_string())
        .collect()
}

/// Read and parse a sudoers file
pub fn read_superusers(path: &Path, policy: MarkerPolicy) -> Result<Vec<String>, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::read(path, e))?;
    Ok(parse_superusers(&content, policy))
}

/// Comma-joined principals, or the read error as text
pub fn describe_superusers(path: &Path, policy: MarkerPolicy) -> String {
    match read_superusers(path, policy) {
        Ok(principals) => {
            tracing::debug!(count = principals.len(), "Parsed {}", path.display());
            principals.join(", ")
        }
        Err(e) => {
            tracing::warn!("{}", e);
            e.to_string()
        }
    }
}
