//! Host facts provider
//!
//! The collector only talks to the machine through [`HostFacts`], so tests can
//! substitute a fixed host.

use std::path::Path;

use nix::sys::utsname::{uname, UtsName};
use nix::unistd::{geteuid, User};
use sysinfo::{Disks, System};

/// Byte counters for physical memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryFacts {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Byte counters for the filesystem mounted at `/`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskFacts {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl DiskFacts {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

/// Byte counters for swap space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwapFacts {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

/// Narrow view of the OS used by the collector
///
/// Identity lookups return `None` when the platform cannot answer.
pub trait HostFacts {
    /// OS family, e.g. `Linux`
    fn system_name(&self) -> Option<String>;
    fn hostname(&self) -> Option<String>;
    fn kernel_release(&self) -> Option<String>;
    /// Machine hardware name, e.g. `x86_64`
    fn machine(&self) -> Option<String>;
    fn processor(&self) -> Option<String>;
    fn logical_cpus(&self) -> usize;
    fn memory(&self) -> MemoryFacts;
    fn root_disk(&self) -> Option<DiskFacts>;
    fn swap(&self) -> SwapFacts;
    /// Boot time as a unix timestamp in seconds
    fn boot_time(&self) -> u64;
    /// Current time as a unix timestamp in seconds
    fn now(&self) -> u64;
    fn current_user(&self) -> Option<String>;
}

/// Kernel identity fields read once from `uname(2)`
#[derive(Debug, Clone, PartialEq)]
struct KernelIdentity {
    sysname: String,
    release: String,
    machine: String,
}

impl From<&UtsName> for KernelIdentity {
    fn from(uts: &UtsName) -> Self {
        Self {
            sysname: uts.sysname().to_string_lossy().into_owned(),
            release: uts.release().to_string_lossy().into_owned(),
            machine: uts.machine().to_string_lossy().into_owned(),
        }
    }
}

/// Real host backed by `sysinfo`, `uname(2)` and the passwd database
pub struct SysinfoHost {
    system: System,
    disks: Disks,
    kernel: Option<KernelIdentity>,
}

impl SysinfoHost {
    pub fn new() -> Self {
        let kernel = match uname() {
            Ok(uts) => Some(KernelIdentity::from(&uts)),
            Err(e) => {
                tracing::warn!("uname failed: {}", e);
                None
            }
        };

        Self {
            system: System::new_all(),
            disks: Disks::new_with_refreshed_list(),
            kernel,
        }
    }

    fn kernel_field(&self, field: fn(&KernelIdentity) -> &String) -> Option<String> {
        self.kernel.as_ref().map(|k| field(k).clone())
    }
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFacts for SysinfoHost {
    fn system_name(&self) -> Option<String> {
        self.kernel_field(|k| &k.sysname)
    }

    fn hostname(&self) -> Option<String> {
        System::host_name()
    }

    fn kernel_release(&self) -> Option<String> {
        self.kernel_field(|k| &k.release)
    }

    fn machine(&self) -> Option<String> {
        self.kernel_field(|k| &k.machine)
    }

    fn processor(&self) -> Option<String> {
        self.system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    fn logical_cpus(&self) -> usize {
        self.system.cpus().len()
    }

    fn memory(&self) -> MemoryFacts {
        MemoryFacts {
            total_bytes: self.system.total_memory(),
            available_bytes: self.system.available_memory(),
        }
    }

    fn root_disk(&self) -> Option<DiskFacts> {
        self.disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .map(|disk| DiskFacts {
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
    }

    fn swap(&self) -> SwapFacts {
        SwapFacts {
            total_bytes: self.system.total_swap(),
            used_bytes: self.system.used_swap(),
            free_bytes: self.system.free_swap(),
        }
    }

    fn boot_time(&self) -> u64 {
        System::boot_time()
    }

    fn now(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }

    fn current_user(&self) -> Option<String> {
        match User::from_uid(geteuid()) {
            Ok(user) => user.map(|u| u.name),
            Err(e) => {
                tracing::warn!("passwd lookup failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_used_saturates() {
        let disk = DiskFacts {
            total_bytes: 10,
            available_bytes: 25,
        };
        assert_eq!(disk.used_bytes(), 0);
    }

    #[test]
    fn test_kernel_identity_from_uname() {
        let uts = uname().unwrap();
        let identity = KernelIdentity::from(&uts);
        assert_eq!(identity.sysname, uts.sysname().to_string_lossy());
        assert_eq!(identity.release, uts.release().to_string_lossy());
        assert_eq!(identity.machine, uts.machine().to_string_lossy());
    }

    #[test]
    fn test_kernel_fields_read_from_cached_identity() {
        let mut host = SysinfoHost::new();
        host.kernel = Some(KernelIdentity {
            sysname: "Linux".into(),
            release: "6.1.0-test".into(),
            machine: "aarch64".into(),
        });
        assert_eq!(host.system_name().as_deref(), Some("Linux"));
        assert_eq!(host.kernel_release().as_deref(), Some("6.1.0-test"));
        assert_eq!(host.machine().as_deref(), Some("aarch64"));

        host.kernel = None;
        assert_eq!(host.system_name(), None);
        assert_eq!(host.machine(), None);
    }

    #[test]
    #[ignore = "reads live host counters"]
    fn test_real_host_basics() {
        let host = SysinfoHost::new();
        assert!(host.logical_cpus() > 0);
        assert!(host.now() >= host.boot_time());
        assert!(host.memory().total_bytes > 0);
    }
}
