use std::sync::Arc;
use std::time::Duration;

use hdrhistogram::Histogram;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::runner::TaskResult;
use crate::summary::RunSummary;

/// Shared tally of finished tasks. Cloned into each worker; every update takes
/// the same lock.
#[derive(Clone)]
pub struct Metrics {
    tally: Arc<Mutex<Tally>>,
}

struct Tally {
    successes: u64,
    failures: u64,
    durations: Vec<Duration>,
    /// Microseconds.
    latency: Histogram<u64>,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tally: Arc::new(Mutex::new(Tally {
                successes: 0,
                failures: 0,
                durations: Vec::new(),
                latency: Histogram::<u64>::new(3)?,
            })),
        })
    }

    pub async fn record(&self, result: &TaskResult) {
        let mut tally = self.tally.lock().await;
        if result.success() {
            tally.successes += 1;
        } else {
            tally.failures += 1;
        }
        tally.durations.push(result.elapsed);
        tally
            .latency
            .record(result.elapsed.as_micros() as u64)
            .ok();
    }

    pub async fn successes(&self) -> u64 {
        self.tally.lock().await.successes
    }

    pub async fn failures(&self) -> u64 {
        self.tally.lock().await.failures
    }

    pub async fn durations(&self) -> Vec<Duration> {
        self.tally.lock().await.durations.clone()
    }

    /// Builds the final summary; `wall` is the batch's wall-clock time.
    pub async fn summarize(&self, total: usize, wall: Duration) -> RunSummary {
        let tally = self.tally.lock().await;
        let percentile = |q: f64| {
            if tally.latency.len() == 0 {
                Duration::ZERO
            } else {
                Duration::from_micros(tally.latency.value_at_quantile(q))
            }
        };

        RunSummary::new(
            total,
            tally.successes,
            tally.failures,
            &tally.durations,
            wall,
            [percentile(0.50), percentile(0.95), percentile(0.99)],
        )
    }
}
