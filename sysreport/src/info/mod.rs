//! System information collection

pub mod host;
pub mod os_release;
pub mod sudoers;

use crate::config::Config;
use crate::types::{InfoValue, SystemInfo};

use host::HostFacts;

/// Placeholder for identity facts the platform could not provide
pub const UNKNOWN: &str = "Unknown";

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const SECS_PER_DAY: f64 = 24.0 * 3600.0;

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bytes to GB (1024^3), rounded to 2 decimal places
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

/// Days elapsed since boot, rounded to 2 decimal places
///
/// A boot time later than `now` yields 0.
pub fn uptime_days(boot_time_secs: u64, now_secs: u64) -> f64 {
    round2(now_secs.saturating_sub(boot_time_secs) as f64 / SECS_PER_DAY)
}

fn text(value: Option<String>) -> InfoValue {
    InfoValue::Text(value.unwrap_or_else(|| UNKNOWN.to_string()))
}

/// Collect the full metric mapping in report order
pub fn collect_system_info(host: &dyn HostFacts, config: &Config) -> SystemInfo {
    let memory = host.memory();
    let swap = host.swap();

    let disk = host.root_disk();
    if disk.is_none() {
        tracing::warn!("No filesystem mounted at /, disk usage unavailable");
    }
    let disk_gb = |bytes: fn(&host::DiskFacts) -> u64| -> InfoValue {
        match &disk {
            Some(d) => bytes_to_gb(bytes(d)).into(),
            None => UNKNOWN.into(),
        }
    };

    let info: SystemInfo = vec![
        ("System", text(host.system_name())),
        ("Hostname", text(host.hostname())),
        ("Architecture", format!("{}bit", usize::BITS).into()),
        ("Kernel Version", text(host.kernel_release())),
        ("OS Version", os_release::describe(&config.paths.os_release).into()),
        ("Machine type", text(host.machine())),
        ("Processor", text(host.processor())),
        ("CPU Count", host.logical_cpus().into()),
        ("Memory Total (GB)", bytes_to_gb(memory.total_bytes).into()),
        ("Memory Available (GB)", bytes_to_gb(memory.available_bytes).into()),
        ("Disk Total (GB)", disk_gb(|d| d.total_bytes)),
        ("Disk Used (GB)", disk_gb(|d| d.used_bytes())),
        ("Disk Free (GB)", disk_gb(|d| d.available_bytes)),
        ("Swap Total (GB)", bytes_to_gb(swap.total_bytes).into()),
        ("Swap Used (GB)", bytes_to_gb(swap.used_bytes).into()),
        ("Swap Free (GB)", bytes_to_gb(swap.free_bytes).into()),
        ("Uptime (days)", uptime_days(host.boot_time(), host.now()).into()),
        ("Generator Version", env!("CARGO_PKG_VERSION").into()),
        ("Current User", text(host.current_user())),
        (
            "Superuser(s)",
            sudoers::describe_superusers(&config.paths.sudoers, config.sudoers.marker).into(),
        ),
    ]
    .into_iter()
    .collect();

    tracing::debug!(entries = info.len(), "Collected system info");
    info
}

#[cfg(test)]
mod tests {
    use super::host::{DiskFacts, MemoryFacts, SwapFacts};
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    struct FixedHost {
        disk: Option<DiskFacts>,
    }

    impl HostFacts for FixedHost {
        fn system_name(&self) -> Option<String> {
            Some("Linux".into())
        }
        fn hostname(&self) -> Option<String> {
            None
        }
        fn kernel_release(&self) -> Option<String> {
            Some("6.8.0-test".into())
        }
        fn machine(&self) -> Option<String> {
            Some("x86_64".into())
        }
        fn processor(&self) -> Option<String> {
            Some("Test CPU".into())
        }
        fn logical_cpus(&self) -> usize {
            8
        }
        fn memory(&self) -> MemoryFacts {
            MemoryFacts {
                total_bytes: 16 * GB,
                available_bytes: GB + GB / 3,
            }
        }
        fn root_disk(&self) -> Option<DiskFacts> {
            self.disk
        }
        fn swap(&self) -> SwapFacts {
            SwapFacts::default()
        }
        fn boot_time(&self) -> u64 {
            1_000_000
        }
        fn now(&self) -> u64 {
            1_000_000 + 36 * 3600
        }
        fn current_user(&self) -> Option<String> {
            Some("tester".into())
        }
    }

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.paths.sudoers = dir.join("sudoers");
        config.paths.os_release = dir.join("os-release");
        config
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(1.235001), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(0), 0.0);
        assert_eq!(bytes_to_gb(GB), 1.0);
        assert_eq!(bytes_to_gb(GB + GB / 2), 1.5);
        assert_eq!(bytes_to_gb(GB / 3), 0.33);
    }

    #[test]
    fn test_uptime_days() {
        assert_eq!(uptime_days(0, 86_400), 1.0);
        assert_eq!(uptime_days(100, 100 + 36 * 3600), 1.5);
        assert_eq!(uptime_days(500, 100), 0.0);
    }

    #[test]
    fn test_collect_orders_and_fills_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("os-release"), "PRETTY_NAME=\"Test OS 1\"\n").unwrap();
        std::fs::write(dir.path().join("sudoers"), "root ALL=(ALL:ALL) ALL\n").unwrap();

        let host = FixedHost {
            disk: Some(DiskFacts {
                total_bytes: 100 * GB,
                available_bytes: 40 * GB,
            }),
        };
        let info = collect_system_info(&host, &test_config(dir.path()));

        let keys: Vec<&str> = info.keys().collect();
        assert_eq!(keys.len(), 20);
        assert_eq!(keys[0], "System");
        assert_eq!(keys[19], "Superuser(s)");

        assert_eq!(info.get("Hostname"), Some(&InfoValue::from(UNKNOWN)));
        assert_eq!(info.get("OS Version"), Some(&InfoValue::from("Test OS 1")));
        assert_eq!(info.get("CPU Count"), Some(&InfoValue::Integer(8)));
        assert_eq!(info.get("Memory Total (GB)"), Some(&InfoValue::Float(16.0)));
        assert_eq!(info.get("Memory Available (GB)"), Some(&InfoValue::Float(1.33)));
        assert_eq!(info.get("Disk Used (GB)"), Some(&InfoValue::Float(60.0)));
        assert_eq!(info.get("Disk Free (GB)"), Some(&InfoValue::Float(40.0)));
        assert_eq!(info.get("Uptime (days)"), Some(&InfoValue::Float(1.5)));
        assert_eq!(info.get("Superuser(s)"), Some(&InfoValue::from("root")));
    }

    #[test]
    fn test_numeric_fields_non_negative_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let host = FixedHost {
            disk: Some(DiskFacts {
                total_bytes: 123_456_789_012,
                available_bytes: 9_876_543_210,
            }),
        };
        let info = collect_system_info(&host, &test_config(dir.path()));

        for (key, value) in info.iter() {
            if let InfoValue::Float(n) = value {
                assert!(*n >= 0.0, "{} is negative", key);
                let scaled = n * 100.0;
                assert!((scaled - scaled.round()).abs() < 1e-6, "{} = {}", key, n);
            }
        }
    }

    #[test]
    fn test_unreadable_sources_become_error_strings() {
        let dir = tempfile::tempdir().unwrap();
        let host = FixedHost { disk: None };
        let info = collect_system_info(&host, &test_config(dir.path()));

        let os = info.get("OS Version").unwrap().to_string();
        assert!(os.starts_with("Error reading"));
        let su = info.get("Superuser(s)").unwrap().to_string();
        assert!(su.starts_with("Error reading"));
        assert_eq!(info.get("Disk Total (GB)"), Some(&InfoValue::from(UNKNOWN)));
    }
}
