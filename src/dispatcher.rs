use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::credentials::CredentialPool;
use crate::error::{LoadTestError, Result};
use crate::metrics::Metrics;
use crate::runner::TaskRunner;
use crate::summary::RunSummary;

/// Runs one task per credential on a fixed-width worker pool.
pub struct Dispatcher {
    runner: Arc<TaskRunner>,
    workers: usize,
}

impl Dispatcher {
    pub fn new(runner: TaskRunner, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(LoadTestError::ZeroWorkers);
        }
        Ok(Self {
            runner: Arc::new(runner),
            workers,
        })
    }

    /// Blocks until every credential has been used exactly once.
    pub async fn run(&self, credentials: CredentialPool) -> Result<RunSummary> {
        let metrics = Metrics::new()?;
        Ok(self.run_with(credentials, &metrics).await)
    }

    /// Like [`Dispatcher::run`], recording into a caller-owned handle.
    pub async fn run_with(&self, credentials: CredentialPool, metrics: &Metrics) -> RunSummary {
        let total = credentials.len();
        let width = self.workers.min(total);
        let cursor = Arc::new(AtomicUsize::new(0));

        info!("Dispatching {} tasks over {} workers", total, width);

        let started = Instant::now();
        let mut tasks = Vec::with_capacity(width);
        for id in 0..width {
            let runner = Arc::clone(&self.runner);
            let credentials = credentials.clone();
            let cursor = Arc::clone(&cursor);
            let metrics = metrics.clone();

            tasks.push(tokio::spawn(async move {
                run_worker(id, runner, credentials, cursor, metrics).await
            }));
        }

        for joined in futures_util::future::join_all(tasks).await {
            if let Err(e) = joined {
                error!("Worker terminated abnormally: {}", e);
            }
        }
        let wall = started.elapsed();

        metrics.summarize(total, wall).await
    }
}

async fn run_worker(
    id: usize,
    runner: Arc<TaskRunner>,
    credentials: CredentialPool,
    cursor: Arc<AtomicUsize>,
    metrics: Metrics,
) {
    let mut handled = 0usize;
    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(credential) = credentials.get(index) else {
            break;
        };

        let result = runner.run(index, credential).await;
        metrics.record(&result).await;
        handled += 1;
    }
    debug!("Worker {} finished after {} tasks", id, handled);
}
