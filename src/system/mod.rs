pub mod collector;
pub mod snapshot;

use std::time::Duration;

pub use collector::Collector;
pub use snapshot::{DiskStats, HostSnapshot, LoadAverages, MemoryStats, NetworkTotals};

/// Single seam over OS telemetry. The production implementation reads live
/// counters through `sysinfo`; tests substitute a scripted fake.
pub trait MetricsProvider {
    /// Host identity and capacity facts. Read once per run.
    fn host(&mut self) -> HostSnapshot;

    fn memory(&mut self) -> MemoryStats;

    fn disk(&mut self) -> DiskStats;

    /// `None` on platforms without a load average (Windows).
    fn load_average(&self) -> Option<LoadAverages>;

    fn process_count(&mut self) -> usize;

    /// Measure global CPU utilization over exactly `interval`, returning the
    /// percentage. The call blocks for the whole interval: it is both the
    /// measurement and the loop's clock. Callers must not add their own
    /// sleep, or the loop runs at half cadence.
    fn cpu_percent_over(&mut self, interval: Duration) -> f32;

    /// Instantaneous used-memory percent.
    fn memory_percent(&mut self) -> f32;

    /// Cumulative bytes sent/received across all interfaces since boot.
    fn network_totals(&mut self) -> NetworkTotals;
}
