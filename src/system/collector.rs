use std::time::Duration;

use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use super::MetricsProvider;
use super::snapshot::{DiskStats, HostSnapshot, LoadAverages, MemoryStats, NetworkTotals};
use crate::format::bytes_to_gib;

/// Live metrics provider backed by `sysinfo`.
pub struct Collector {
    sys: System,
    networks: Networks,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        // Baseline CPU refresh; the next refresh yields usage since this one.
        sys.refresh_cpu_all();
        let networks = Networks::new_with_refreshed_list();
        Collector { sys, networks }
    }

    fn disks(&self) -> Disks {
        Disks::new_with_refreshed_list()
    }

    /// Disk stats for the root filesystem, falling back to the largest disk
    /// when no mount point is exactly `/` (Windows).
    fn primary_disk(&self) -> Option<(u64, u64)> {
        let disks = self.disks();
        let root = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"));
        let disk = root.or_else(|| {
            disks
                .list()
                .iter()
                .max_by_key(|d| d.total_space())
        })?;
        Some((disk.total_space(), disk.available_space()))
    }
}

impl MetricsProvider for Collector {
    fn host(&mut self) -> HostSnapshot {
        debug!("capturing host snapshot");
        self.sys.refresh_memory();

        let cpu_brand = self
            .sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let (disk_total, _) = self.primary_disk().unwrap_or((0, 0));

        let mut interfaces: Vec<String> = self.networks.list().keys().cloned().collect();
        interfaces.sort_unstable();

        HostSnapshot {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            cpu_brand,
            cpu_arch: System::cpu_arch(),
            logical_cores: self.sys.cpus().len(),
            total_memory_gib: bytes_to_gib(self.sys.total_memory()),
            total_disk_gib: bytes_to_gib(disk_total),
            runtime: format!(
                "{} {} ({})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                std::env::consts::ARCH
            ),
            interfaces,
        }
    }

    fn memory(&mut self) -> MemoryStats {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let used = self.sys.used_memory();
        let available = self.sys.available_memory();
        let used_percent = if total == 0 {
            0.0
        } else {
            used as f32 / total as f32 * 100.0
        };
        MemoryStats {
            total_gib: bytes_to_gib(total),
            used_gib: bytes_to_gib(used),
            free_gib: bytes_to_gib(available),
            used_percent,
        }
    }

    fn disk(&mut self) -> DiskStats {
        let (total, available) = self.primary_disk().unwrap_or((0, 0));
        let used = total.saturating_sub(available);
        let used_percent = if total == 0 {
            0.0
        } else {
            used as f32 / total as f32 * 100.0
        };
        DiskStats {
            total_gib: bytes_to_gib(total),
            used_gib: bytes_to_gib(used),
            free_gib: bytes_to_gib(available),
            used_percent,
        }
    }

    fn load_average(&self) -> Option<LoadAverages> {
        #[cfg(target_os = "windows")]
        {
            None
        }
        #[cfg(not(target_os = "windows"))]
        {
            let load = System::load_average();
            Some(LoadAverages {
                one: load.one,
                five: load.five,
                fifteen: load.fifteen,
            })
        }
    }

    fn process_count(&mut self) -> usize {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        self.sys.processes().len()
    }

    fn cpu_percent_over(&mut self, interval: Duration) -> f32 {
        // The sleep is the loop's clock: usage accumulates since the previous
        // refresh, so one call measures exactly this interval.
        std::thread::sleep(interval);
        self.sys.refresh_cpu_usage();
        let percent = self.sys.global_cpu_usage();
        debug!(percent, "cpu sample");
        percent
    }

    fn memory_percent(&mut self) -> f32 {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return 0.0;
        }
        self.sys.used_memory() as f32 / total as f32 * 100.0
    }

    fn network_totals(&mut self) -> NetworkTotals {
        self.networks.refresh(true);
        let mut totals = NetworkTotals::default();
        for data in self.networks.list().values() {
            totals.bytes_sent += data.total_transmitted();
            totals.bytes_received += data.total_received();
        }
        debug!(
            sent = totals.bytes_sent,
            received = totals.bytes_received,
            "network counter read"
        );
        totals
    }
}
