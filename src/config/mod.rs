//! Configuration management for netscan.
//!
//! Settings are read once (optional JSON file in the XDG config directory,
//! overridden by command-line flags) and turned into immutable values handed
//! to the parts that need them: [`ScanConfig`] for the engine, the display
//! mode and output format for the presentation layer.

mod settings;

pub use settings::{AppSettings, Paths};

use std::time::Duration;

/// Engine configuration, fixed before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Per-attempt connect timeout.
    pub timeout: Duration,
    /// Worker pool size; `0` runs one worker per target.
    pub concurrency: usize,
}

impl ScanConfig {
    /// Default connect timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
    /// Default worker pool size.
    pub const DEFAULT_CONCURRENCY: usize = 500;

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the worker pool size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.concurrency, 500);
    }

    #[test]
    fn test_builders() {
        let config = ScanConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_concurrency(0);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.concurrency, 0);
    }
}
