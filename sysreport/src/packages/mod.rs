//! Installed package inventory
//!
//! Tries each known package manager in priority order and keeps the first
//! one that answers with a non-empty listing.

pub mod runner;

use std::time::Duration;

use crate::types::PackageList;

use runner::CommandRunner;

/// Recognized package managers, highest priority first
pub const PACKAGE_MANAGERS: [&str; 2] = ["dnf", "yum"];

/// Package names from `<manager> list installed` output
///
/// The first line is a header. Each remaining non-blank line contributes its
/// first whitespace-delimited token.
pub fn parse_package_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Query the first available manager among `candidates`
pub async fn list_installed(
    runner: &dyn CommandRunner,
    candidates: &[&str],
    timeout: Duration,
) -> PackageList {
    for &manager in candidates {
        let Some(path) = runner.locate(manager) else {
            tracing::debug!("{} not found on PATH", manager);
            continue;
        };

        tracing::info!(manager, path = %path.display(), "Listing installed packages");
        let argv = vec![
            manager.to_string(),
            "list".to_string(),
            "installed".to_string(),
        ];

        match runner.run(&argv, timeout).await {
            Ok(output) if output.succeeded() => {
                let packages = parse_package_output(&output.stdout);
                tracing::info!(manager, count = packages.len(), "Collected package list");
                return PackageList::Installed(packages);
            }
            Ok(output) => {
                tracing::warn!(
                    manager,
                    exit_code = ?output.exit_code,
                    stderr = %output.stderr.trim(),
                    "Package manager returned no usable listing"
                );
            }
            Err(e) => {
                tracing::warn!(manager, "{}", e);
                return PackageList::Failed(e.to_string());
            }
        }
    }

    tracing::warn!(tried = ?candidates, "No supported package manager available");
    PackageList::NoManager
}
