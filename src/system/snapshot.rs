/// One-shot host identity and capacity facts, captured before sampling starts.
#[derive(Clone, Debug)]
pub struct HostSnapshot {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub cpu_brand: String,
    pub cpu_arch: String,
    pub logical_cores: usize,
    pub total_memory_gib: f64,
    pub total_disk_gib: f64,
    pub runtime: String,
    pub interfaces: Vec<String>,
}

#[derive(Clone, Copy, Debug)]
pub struct MemoryStats {
    pub total_gib: f64,
    pub used_gib: f64,
    pub free_gib: f64,
    pub used_percent: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DiskStats {
    pub total_gib: f64,
    pub used_gib: f64,
    pub free_gib: f64,
    pub used_percent: f32,
}

/// Run-queue length means over 1/5/15 minute windows. Absent on platforms
/// that do not report a load average.
#[derive(Clone, Copy, Debug)]
pub struct LoadAverages {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Cumulative interface counters summed across all interfaces. Two readings
/// bracket the sampling loop; only the delta is meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkTotals {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}
