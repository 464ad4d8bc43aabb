//! TCP Connect Scanner implementation.
//!
//! Performs standard TCP connect scans using the operating system's
//! socket API. The full handshake is completed and the connection is
//! dropped immediately; no data is exchanged.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::traits::{Scanner, Status};
use crate::types::ScanTarget;
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::error::Elapsed;
use tokio::time::timeout;
use tracing::trace;

/// TCP Connect Scanner.
///
/// Uses standard socket connect() calls to determine port status.
/// Does not require elevated privileges.
#[derive(Debug, Clone)]
pub struct TcpConnectScanner {
    timeout: Duration,
}

impl TcpConnectScanner {
    /// Create a new TCP connect scanner.
    ///
    /// Fails if `timeout` is zero, since no connection could ever complete.
    pub fn new(timeout: Duration) -> ConfigResult<Self> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "connect timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self { timeout })
    }
}

#[async_trait]
impl Scanner for TcpConnectScanner {
    async fn scan(&self, target: ScanTarget) -> Status {
        let addr = target.socket_addr();

        let outcome = timeout(self.timeout, TcpStream::connect(addr)).await;
        if let Ok(Err(e)) = &outcome {
            trace!(%target, error = %e, kind = ?e.kind(), "connect failed");
        }
        classify_outcome(outcome)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Map a time-limited connect attempt to a status.
///
/// An established connection is dropped here without exchanging data.
fn classify_outcome<S>(outcome: Result<io::Result<S>, Elapsed>) -> Status {
    match outcome {
        Ok(Ok(_stream)) => Status::Open,
        Ok(Err(e)) => classify_connect_error(&e),
        Err(_elapsed) => Status::Timeout,
    }
}

/// Map a failed connect to a status by error kind, never by message text.
pub fn classify_connect_error(err: &io::Error) -> Status {
    match err.kind() {
        io::ErrorKind::TimedOut => Status::Timeout,
        _ => Status::Closed,
    }
}
