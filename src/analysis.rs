use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing::debug;

use crate::format::round2;
use crate::system::{MetricsProvider, NetworkTotals};

pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Raw output of one sampling pass: ordered per-second utilization samples
/// plus the network counter readings that bracket them.
#[derive(Clone, Debug)]
pub struct SamplingRun {
    pub cpu_samples: Vec<f32>,
    pub memory_samples: Vec<f32>,
    pub net_before: NetworkTotals,
    pub net_after: NetworkTotals,
    pub elapsed_secs: u64,
}

/// Final per-run summary, printed and written to CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub system_name: String,
    pub avg_cpu_percent: f64,
    pub avg_memory_percent: f64,
    pub send_rate_kib: f64,
    pub recv_rate_kib: f64,
}

/// Poll CPU and memory once per second for `seconds` seconds, strictly
/// sequentially. `cpu_percent_over` blocks for the whole interval, so the
/// measurement call is also the loop's clock. `on_tick(done, total)` fires
/// after each sample for progress display; a failing sink aborts the run.
pub fn sample_utilization<P: MetricsProvider>(
    provider: &mut P,
    seconds: u64,
    mut on_tick: impl FnMut(u64, u64) -> std::io::Result<()>,
) -> Result<SamplingRun> {
    debug!(seconds, "sampling start");
    let mut cpu_samples = Vec::with_capacity(seconds as usize);
    let mut memory_samples = Vec::with_capacity(seconds as usize);

    let net_before = provider.network_totals();
    for n in 0..seconds {
        cpu_samples.push(provider.cpu_percent_over(SAMPLE_INTERVAL));
        memory_samples.push(provider.memory_percent());
        on_tick(n + 1, seconds)?;
    }
    let net_after = provider.network_totals();
    debug!(samples = cpu_samples.len(), "sampling done");

    Ok(SamplingRun {
        cpu_samples,
        memory_samples,
        net_before,
        net_after,
        elapsed_secs: seconds,
    })
}

/// Arithmetic mean; `None` for an empty sequence.
pub fn mean(samples: &[f32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&v| f64::from(v)).sum();
    Some(sum / samples.len() as f64)
}

/// Counter delta in KiB over elapsed seconds; `None` when no time elapsed.
/// Saturating so a counter reset cannot underflow.
pub fn rate_kib_per_sec(before: u64, after: u64, elapsed_secs: u64) -> Option<f64> {
    if elapsed_secs == 0 {
        return None;
    }
    Some(after.saturating_sub(before) as f64 / 1024.0 / elapsed_secs as f64)
}

/// Reduce a sampling run to averages and throughput rates, rounded to 2
/// decimals. A zero-sample run is a reported error, never a division fault.
pub fn aggregate(run: &SamplingRun, system_name: &str) -> Result<AnalysisResult> {
    let no_samples = || eyre!("no samples collected; timeframe must be at least 1 minute");

    let avg_cpu = mean(&run.cpu_samples).ok_or_else(no_samples)?;
    let avg_memory = mean(&run.memory_samples).ok_or_else(no_samples)?;
    let send_rate = rate_kib_per_sec(
        run.net_before.bytes_sent,
        run.net_after.bytes_sent,
        run.elapsed_secs,
    )
    .ok_or_else(no_samples)?;
    let recv_rate = rate_kib_per_sec(
        run.net_before.bytes_received,
        run.net_after.bytes_received,
        run.elapsed_secs,
    )
    .ok_or_else(no_samples)?;

    Ok(AnalysisResult {
        system_name: system_name.to_string(),
        avg_cpu_percent: round2(avg_cpu),
        avg_memory_percent: round2(avg_memory),
        send_rate_kib: round2(send_rate),
        recv_rate_kib: round2(recv_rate),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn mean_of_known_samples() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(mean(&[0.0]), Some(0.0));
    }

    #[test]
    fn mean_of_empty_sequence_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn rate_matches_literal_example() {
        // 100 KiB over 10 seconds.
        assert_eq!(rate_kib_per_sec(0, 102_400, 10), Some(10.0));
    }

    #[test]
    fn rate_over_zero_elapsed_is_none() {
        assert_eq!(rate_kib_per_sec(0, 102_400, 0), None);
    }

    #[test]
    fn rate_saturates_on_counter_reset() {
        assert_eq!(rate_kib_per_sec(5000, 100, 10), Some(0.0));
    }

    #[test]
    fn aggregate_rejects_empty_run() {
        let run = SamplingRun {
            cpu_samples: Vec::new(),
            memory_samples: Vec::new(),
            net_before: NetworkTotals::default(),
            net_after: NetworkTotals::default(),
            elapsed_secs: 0,
        };
        assert!(aggregate(&run, "empty").is_err());
    }

    #[test]
    fn aggregate_rounds_to_two_decimals() {
        let run = SamplingRun {
            cpu_samples: vec![10.0, 10.0, 10.01],
            memory_samples: vec![33.3, 33.4, 33.5],
            net_before: NetworkTotals {
                bytes_sent: 1024,
                bytes_received: 0,
            },
            net_after: NetworkTotals {
                bytes_sent: 1024 + 3100,
                bytes_received: 1536,
            },
            elapsed_secs: 3,
        };
        let result = aggregate(&run, "box").unwrap();
        assert_eq!(result.system_name, "box");
        assert!((result.avg_cpu_percent - 10.0).abs() < 0.005);
        assert_eq!(result.avg_memory_percent, 33.4);
        assert_eq!(result.send_rate_kib, 1.01);
        assert_eq!(result.recv_rate_kib, 0.5);
    }

    proptest! {
        #[test]
        fn averages_stay_within_percent_bounds(
            samples in prop::collection::vec(0.0f32..=100.0, 1..512)
        ) {
            let avg = mean(&samples).unwrap();
            prop_assert!((0.0..=100.0).contains(&avg));
        }

        #[test]
        fn rate_is_non_negative_for_any_counters(
            before in any::<u64>(),
            after in any::<u64>(),
            elapsed in 1u64..=86_400
        ) {
            let rate = rate_kib_per_sec(before, after, elapsed).unwrap();
            prop_assert!(rate >= 0.0);
        }
    }
}
