//! Scanner trait abstraction.
//!
//! Defines the interface the engine drives, so the probing mechanism can
//! be swapped out (real TCP connects in production, mocks in tests).

use crate::types::ScanTarget;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of a single connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Connection established.
    Open,
    /// Connection refused, reset or otherwise failed before the deadline.
    Closed,
    /// No answer within the configured timeout.
    Timeout,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::Timeout => write!(f, "Timed Out"),
        }
    }
}

/// A target together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanResult {
    /// The scanned (host, port) pair.
    pub target: ScanTarget,
    /// Status determined by the scan.
    pub status: Status,
}

impl ScanResult {
    /// Create a new scan result.
    pub const fn new(target: ScanTarget, status: Status) -> Self {
        Self { target, status }
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.status)
    }
}

/// Trait for port scanner implementations.
///
/// A scanner classifies one target at a time; concurrency is the engine's
/// job. Implementations must not fail: every outcome maps to a [`Status`].
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Attempt a connection to a single target and classify it.
    async fn scan(&self, target: ScanTarget) -> Status;

    /// Get the configured timeout.
    fn timeout(&self) -> Duration;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Open.to_string(), "Open");
        assert_eq!(Status::Closed.to_string(), "Closed");
        assert_eq!(Status::Timeout.to_string(), "Timed Out");
    }

    #[test]
    fn test_scan_result() {
        let target = ScanTarget::new(IpAddr::V4(Ipv4Addr::LOCALHOST), Port::new(22).unwrap());
        let result = ScanResult::new(target, Status::Open);

        assert_eq!(result.status, Status::Open);
        assert_eq!(result.to_string(), "127.0.0.1:22 Open");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Status::Timeout).unwrap();
        assert_eq!(json, "\"timeout\"");
    }
}
