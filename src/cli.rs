//! Command-line interface for netscan.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags are
//! merged with [`AppSettings`] once, up front, into the immutable values the
//! engine and the presentation layer need.

use crate::config::{AppSettings, ScanConfig};
use crate::error::{CliResult, ConfigResult};
use crate::output::{self, DisplayMode, OutputFormat};
use crate::scanner::ScanEngine;
use crate::types::{build_targets, AddressRange, PortSpec};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Scan every host of a CIDR block for open TCP ports.
#[derive(Parser, Debug)]
#[command(name = "netscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent TCP connect scanner for CIDR blocks", long_about = None)]
pub struct Args {
    /// CIDR block to scan (e.g. "192.168.1.0/24", "2001:db8::/120")
    #[arg(value_name = "CIDR")]
    pub cidr: String,

    /// Ports to scan: a list ("22,80,443") or a range ("1-1024") [default: 1-1024]
    #[arg(value_name = "PORTS")]
    pub ports: Option<String>,

    /// Show all ports, including closed ones
    #[arg(short = 'a', long)]
    pub show_all: bool,

    /// Only show open ports
    #[arg(short = 'o', long)]
    pub show_open: bool,

    /// Output in CSV format
    #[arg(short = 'c', long)]
    pub csv: bool,

    /// Connection timeout in milliseconds [default: 3000]
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Number of concurrent connect attempts, 0 for one per target [default: 500]
    #[arg(short = 'w', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Show a progress bar and debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a settings file to use instead of the default one
    #[arg(long, value_name = "PATH", env = "NETSCAN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Everything a run needs, resolved from flags and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Port specification string, not yet parsed.
    pub ports: String,
    /// Engine configuration.
    pub scan: ScanConfig,
    /// Which statuses to print.
    pub display: DisplayMode,
    /// How to print them.
    pub format: OutputFormat,
}

impl Args {
    /// Load the settings file named by `--config`, or the default one.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        }
    }

    /// Merge flags over `settings`; flags always win.
    pub fn resolve(&self, settings: &AppSettings) -> RunOptions {
        let timeout_ms = self.timeout.unwrap_or(settings.default_timeout_ms);
        let concurrency = self.concurrency.unwrap_or(settings.default_concurrency);

        RunOptions {
            ports: self
                .ports
                .clone()
                .unwrap_or_else(|| settings.default_ports.clone()),
            scan: ScanConfig::default()
                .with_timeout(Duration::from_millis(timeout_ms))
                .with_concurrency(concurrency),
            display: DisplayMode::from_flags(self.show_all, self.show_open),
            format: if self.csv || settings.csv {
                OutputFormat::Csv
            } else {
                OutputFormat::Table
            },
        }
    }

    /// Validate the input, run the scan and stream rows to stdout.
    ///
    /// Input errors are returned before any connection is attempted.
    pub async fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        let options = self.resolve(settings);

        let hosts = AddressRange::parse(&self.cidr)?.hosts()?;
        let ports = PortSpec::parse(&options.ports)?.to_ports();
        let engine = ScanEngine::new(&options.scan)?;

        let (host_count, port_count) = (hosts.len(), ports.len());
        let targets = build_targets(hosts, ports);
        info!(
            cidr = %self.cidr,
            hosts = host_count,
            ports = port_count,
            targets = targets.len(),
            "scan starting"
        );
        if host_count == 0 {
            output::print_warning(&format!("{} has no usable host addresses", self.cidr));
        }

        let mut writer = output::writer_for(options.format, io::stdout());
        writer.write_header()?;

        let mut results = engine.run(targets);
        let progress = self.verbose.then(|| progress_bar(results.total() as u64));
        let mut shown = 0usize;

        while let Some(result) = results.next_result().await {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            if !options.display.shows(result.status) {
                continue;
            }

            shown += 1;
            match &progress {
                Some(pb) => pb.suspend(|| writer.write_row(&result))?,
                None => writer.write_row(&result)?,
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        debug!(shown, total = results.total(), "scan finished");

        Ok(())
    }
}

/// Progress bar on stderr for `total` targets.
fn progress_bar(total: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
    )
    .map(|s| s.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    ProgressBar::new(total).with_style(style)
}
