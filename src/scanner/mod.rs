//! Scanner module - runs connect attempts concurrently.
//!
//! [`ScanEngine`] fans a list of targets out over a fixed pool of worker
//! tasks and fans the classified results back in through a single
//! [`ResultStream`]. Results arrive in completion order.

pub mod tcp;
pub mod traits;

use crate::config::ScanConfig;
use crate::error::ConfigResult;
use crate::types::ScanTarget;
use futures::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

pub use tcp::{classify_connect_error, TcpConnectScanner};
pub use traits::{ScanResult, Scanner, Status};

/// Shared queue the workers pull targets from, one at a time.
type TargetQueue = Arc<Mutex<Box<dyn Iterator<Item = ScanTarget> + Send>>>;

/// Upper bound on results buffered between the workers and the consumer.
const MAX_BUFFERED: usize = 1024;

/// Concurrent scan engine.
///
/// Each target is classified exactly once. The stream returned by
/// [`ScanEngine::run`] closes only after every worker has finished, so no
/// result can be written after the consumer observes the end.
pub struct ScanEngine {
    scanner: Arc<dyn Scanner>,
    concurrency: usize,
}

impl ScanEngine {
    /// Create an engine doing TCP connect scans as configured.
    pub fn new(config: &ScanConfig) -> ConfigResult<Self> {
        let scanner = TcpConnectScanner::new(config.timeout)?;
        Ok(Self::with_scanner(Arc::new(scanner), config.concurrency))
    }

    /// Create an engine around any scanner implementation.
    ///
    /// `concurrency` is the worker pool size; `0` runs one worker per target.
    pub fn with_scanner(scanner: Arc<dyn Scanner>, concurrency: usize) -> Self {
        Self {
            scanner,
            concurrency,
        }
    }

    /// Number of workers actually spawned for `total` targets.
    fn worker_count(&self, total: usize) -> usize {
        match self.concurrency {
            0 => total,
            limit => limit.min(total),
        }
    }

    /// Start scanning `targets` and return the stream of results.
    ///
    /// Targets are pulled from the iterator as workers become free, so a
    /// lazy iterator such as [`Targets`](crate::types::Targets) is never
    /// collected. Must be called from within a Tokio runtime.
    pub fn run<I>(&self, targets: I) -> ResultStream
    where
        I: IntoIterator<Item = ScanTarget>,
        I::IntoIter: ExactSizeIterator + Send + 'static,
    {
        let targets = targets.into_iter();
        let total = targets.len();
        let workers = self.worker_count(total);
        let (tx, rx) = mpsc::channel(workers.clamp(1, MAX_BUFFERED));
        let queue: TargetQueue = Arc::new(Mutex::new(Box::new(targets)));
        let delivered = Arc::new(AtomicUsize::new(0));

        debug!(
            total,
            workers,
            timeout_ms = self.scanner.timeout().as_millis() as u64,
            "starting scan"
        );

        let mut pool = JoinSet::new();
        for id in 0..workers {
            pool.spawn(worker(
                id,
                Arc::clone(&self.scanner),
                Arc::clone(&queue),
                tx.clone(),
                Arc::clone(&delivered),
            ));
        }
        // Workers hold the only senders left; the channel closes with the last one.
        drop(tx);

        tokio::spawn(coordinate(pool, total, delivered));

        ResultStream { rx, total }
    }
}

/// Pull targets until the queue is empty or the consumer goes away.
async fn worker(
    id: usize,
    scanner: Arc<dyn Scanner>,
    queue: TargetQueue,
    tx: mpsc::Sender<ScanResult>,
    delivered: Arc<AtomicUsize>,
) {
    loop {
        let Some(target) = queue.lock().await.next() else {
            break;
        };

        let status = scanner.scan(target).await;
        trace!(worker = id, %target, %status, "classified");

        if tx.send(ScanResult::new(target, status)).await.is_err() {
            debug!(worker = id, "result stream dropped, stopping");
            break;
        }
        delivered.fetch_add(1, Ordering::Relaxed);
    }
}

/// Wait for every worker, then report how the run ended.
async fn coordinate(mut pool: JoinSet<()>, total: usize, delivered: Arc<AtomicUsize>) {
    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "scan worker failed");
        }
    }

    let delivered = delivered.load(Ordering::Relaxed);
    if delivered == total {
        debug!(total, "scan complete");
    } else {
        warn!(delivered, total, "scan ended before every target was reported");
    }
}

/// Unordered stream of scan results.
///
/// Yields one [`ScanResult`] per submitted target and then ends.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<ScanResult>,
    total: usize,
}

impl ResultStream {
    /// Number of targets submitted, i.e. results to expect.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Receive the next result, or `None` once the scan is finished.
    pub async fn next_result(&mut self) -> Option<ScanResult> {
        self.rx.recv().await
    }
}

impl Stream for ResultStream {
    type Item = ScanResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
