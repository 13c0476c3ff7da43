use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use crate::analysis::AnalysisResult;
use crate::system::{DiskStats, HostSnapshot, LoadAverages, MemoryStats};

pub const CSV_HEADER: &str =
    "System Name,Average CPU Usage (%),Average RAM Usage (%),Send Rate (KiB/s),Receive Rate (KiB/s)";

pub fn print_services(process_count: usize) {
    println!("\n---------- Services ----------");
    println!("Running processes: {process_count}");
}

pub fn print_host_info(host: &HostSnapshot) {
    println!("\n---------- System Info ----------");
    println!("Hostname     : {}", host.hostname);
    println!("System       : {} {}", host.os_name, host.os_version);
    println!("Kernel       : {}", host.kernel_version);
    println!(
        "CPU          : {} ({} cores)",
        host.cpu_brand, host.logical_cores
    );
    println!("Architecture : {}", host.cpu_arch);
    println!("Memory       : {} GiB", host.total_memory_gib);
    println!("Disk         : {} GiB", host.total_disk_gib);
    println!("Runtime      : {}", host.runtime);
    println!("Interfaces   : {}", host.interfaces.join(", "));
}

pub fn print_load_average(load: Option<&LoadAverages>) {
    println!("\n---------- Load Average ----------");
    match load {
        Some(load) => {
            println!("Load avg (1 min) : {:.2}", load.one);
            println!("Load avg (5 min) : {:.2}", load.five);
            println!("Load avg (15 min): {:.2}", load.fifteen);
        }
        None => println!("Load average not supported on this OS."),
    }
}

pub fn print_usage(memory: &MemoryStats, disk: &DiskStats) {
    println!("\n---------- RAM & Disk Usage ----------");
    println!(
        "RAM Used         : {} GiB / {} GiB ({:.1}%)",
        memory.used_gib, memory.total_gib, memory.used_percent
    );
    println!(
        "Disk Used        : {} GiB / {} GiB ({:.1}%)",
        disk.used_gib, disk.total_gib, disk.used_percent
    );
}

pub fn print_analysis(result: &AnalysisResult) {
    println!("\n========== System Analysis Result ==========");
    println!("System Name        : {}", result.system_name);
    println!("Average CPU Usage  : {:.2}%", result.avg_cpu_percent);
    println!("Average RAM Usage  : {:.2}%", result.avg_memory_percent);
    println!("Network Send Rate  : {:.2} KiB/s", result.send_rate_kib);
    println!("Network Recv Rate  : {:.2} KiB/s", result.recv_rate_kib);
}

/// Single-line progress indicator, overwritten in place each second.
pub fn print_progress(done: u64, total: u64) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\rMonitoring {done}/{total}s")?;
    out.flush()?;
    if done == total {
        writeln!(out)?;
    }
    Ok(())
}

/// `system_analysis_<hostname>_<YYYYMMDD_HHMMSS>.csv`
pub fn csv_filename(hostname: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "system_analysis_{hostname}_{}.csv",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Write the header and exactly one data row. Failure here is fatal for the
/// run; the file handle closes on every exit path.
pub fn write_csv(path: &Path, result: &AnalysisResult) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, result)
        .wrap_err_with(|| format!("cannot write report file {}", path.display()))?;
    Ok(())
}

fn write_rows(writer: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    writeln!(
        writer,
        "{},{:.2},{:.2},{:.2},{:.2}",
        csv_field(&result.system_name),
        result.avg_cpu_percent,
        result.avg_memory_percent,
        result.send_rate_kib,
        result.recv_rate_kib,
    )?;
    writer.flush()
}

/// RFC 4180 quoting for the one free-text field.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn filename_from_fixed_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            csv_filename("host1", ts),
            "system_analysis_host1_20240102_030405.csv"
        );
    }

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(csv_field("web-01"), "web-01");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("rack 3, slot 1"), "\"rack 3, slot 1\"");
        assert_eq!(csv_field("the \"big\" box"), "\"the \"\"big\"\" box\"");
    }
}
