use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

use sysreport::analysis;
use sysreport::config::{self, RunConfig};
use sysreport::report;
use sysreport::system::{Collector, MetricsProvider};
use sysreport::term::{CrosstermScreen, NoopScreen, ScreenReset};

#[derive(Parser)]
#[command(
    name = "sysreport",
    about = "Snapshot host facts, sample CPU/memory/network over an interval, write a CSV summary"
)]
struct Cli {
    /// System name recorded in the report (prompted when omitted)
    #[arg(long)]
    name: Option<String>,

    /// Sampling timeframe in minutes (prompted when omitted)
    #[arg(long)]
    minutes: Option<u64>,

    /// Skip the screen reset before printing the report
    #[arg(long, default_value_t = false)]
    no_clear: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let mut screen: Box<dyn ScreenReset> = if cli.no_clear {
        Box::new(NoopScreen)
    } else {
        Box::new(CrosstermScreen)
    };
    screen.reset()?;

    let config = resolve_config(&cli)?;
    run(config, &mut Collector::new())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let system_name = match &cli.name {
        Some(name) => config::parse_system_name(name),
        None => config::parse_system_name(&prompt("Enter the system name (optional): ")?),
    };
    let timeframe_minutes = match cli.minutes {
        Some(minutes) => minutes,
        None => config::parse_timeframe(&prompt("Enter the timeframe (in minutes, default 30): ")?),
    };
    Ok(RunConfig {
        system_name,
        timeframe_minutes,
    })
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn run<P: MetricsProvider>(config: RunConfig, provider: &mut P) -> Result<()> {
    if config.timeframe_minutes == 0 {
        return Err(eyre!("timeframe must be at least 1 minute"));
    }

    let host = provider.host();
    report::print_services(provider.process_count());
    report::print_host_info(&host);
    report::print_load_average(provider.load_average().as_ref());
    report::print_usage(&provider.memory(), &provider.disk());

    println!("\n========== Starting System Analysis ==========");
    println!(
        "Analyzing usage over {} minutes...\n",
        config.timeframe_minutes
    );

    let seconds = config::timeframe_seconds(config.timeframe_minutes).ok_or_else(|| {
        eyre!(
            "timeframe of {} minutes is too large",
            config.timeframe_minutes
        )
    })?;
    let sampling = analysis::sample_utilization(provider, seconds, report::print_progress)?;
    let result = analysis::aggregate(&sampling, &config.system_name)?;
    report::print_analysis(&result);

    let filename = report::csv_filename(&host.hostname, Local::now().naive_local());
    report::write_csv(Path::new(&filename), &result)?;
    println!("\nResults saved to: {filename}");

    Ok(())
}
