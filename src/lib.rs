//! # netscan - Concurrent TCP Connect Scanner
//!
//! netscan expands a CIDR block into its usable host addresses, pairs every
//! host with every port of a port specification, and attempts a TCP
//! connection to each pair concurrently. Every attempt is classified as
//! open, closed or timed out and streamed back as soon as it completes.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use netscan::config::ScanConfig;
//! use netscan::scanner::ScanEngine;
//! use netscan::types::{build_targets, AddressRange, PortSpec};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hosts = AddressRange::parse("192.168.1.0/30")?.hosts()?;
//!     let ports = PortSpec::parse("22,80,443")?.to_ports();
//!
//!     let engine = ScanEngine::new(&ScanConfig::default())?;
//!     let mut results = engine.run(build_targets(hosts, ports));
//!
//!     while let Some(result) = results.next().await {
//!         println!("{} is {}", result.target, result.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - CIDR expansion, port specifications and scan targets
//! - [`scanner`] - The `Scanner` trait, TCP connect scanner and scan engine
//! - [`config`] - Engine configuration and the optional settings file
//! - [`output`] - Display filtering, table and CSV writers
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, InputError};
pub use scanner::{ResultStream, ScanEngine, ScanResult, Scanner, Status};
pub use types::{AddressRange, Port, PortSpec, ScanTarget};
