//! System Report Library
//!
//! Point-in-time diagnostic snapshot of a single host: identity, resource
//! totals, uptime, privileged principals and installed packages, exported as
//! a two-sheet xlsx workbook.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use sysreport::{collect_snapshot, Config, SysinfoHost, SystemRunner};
//!
//! let config = Config::default();
//! let runner = SystemRunner::new(config.packages.max_output_bytes);
//! let snapshot = collect_snapshot(&config, &SysinfoHost::new(), &runner).await;
//! snapshot.write(&config.paths.output)?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `sysreport`, optionally with `--config <file>` or
//! `--output <file>`.

pub mod config;
pub mod error;
pub mod info;
pub mod init;
pub mod packages;
pub mod report;
pub mod types;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use config::Config;
pub use error::ReportError;
pub use info::host::{HostFacts, SysinfoHost};
pub use packages::runner::{CommandOutput, CommandRunner, SystemRunner};
pub use types::{InfoValue, PackageList, SystemInfo};

/// Everything gathered in one run
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub info: SystemInfo,
    pub packages: PackageList,
}

impl Snapshot {
    /// Write the workbook, replacing any existing file
    pub fn write(&self, path: &Path) -> Result<PathBuf, ReportError> {
        report::write_report(&self.info, &self.packages, path)
    }
}

/// Collect system info and the package inventory
pub async fn collect_snapshot(
    config: &Config,
    host: &dyn HostFacts,
    runner: &dyn CommandRunner,
) -> Snapshot {
    tracing::info!("Collecting system information");
    let info = info::collect_system_info(host, config);

    let timeout = Duration::from_secs(config.packages.timeout_secs);
    let packages =
        packages::list_installed(runner, &packages::PACKAGE_MANAGERS, timeout).await;

    Snapshot { info, packages }
}
