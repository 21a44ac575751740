use std::path::Path;
use std::time::Duration;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::error::{LoadTestError, Result};

fn as_secs<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Aggregate statistics for one batch. Durations serialize as seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub successes: u64,
    pub failures: u64,
    #[serde(serialize_with = "as_secs")]
    pub total_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub avg_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub max_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub min_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub p50_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub p95_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub p99_elapsed: Duration,
    /// Tasks per second of wall-clock time.
    pub throughput: f64,
}

impl RunSummary {
    pub fn new(
        total: usize,
        successes: u64,
        failures: u64,
        durations: &[Duration],
        wall: Duration,
        [p50_elapsed, p95_elapsed, p99_elapsed]: [Duration; 3],
    ) -> Self {
        let (avg_elapsed, max_elapsed, min_elapsed) = if durations.is_empty() {
            (Duration::ZERO, Duration::ZERO, Duration::ZERO)
        } else {
            let sum: Duration = durations.iter().sum();
            (
                sum / durations.len() as u32,
                durations.iter().max().copied().unwrap_or_default(),
                durations.iter().min().copied().unwrap_or_default(),
            )
        };

        let throughput = if total > 0 && !wall.is_zero() {
            total as f64 / wall.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total,
            successes,
            failures,
            total_elapsed: wall,
            avg_elapsed,
            max_elapsed,
            min_elapsed,
            p50_elapsed,
            p95_elapsed,
            p99_elapsed,
            throughput,
        }
    }

    pub fn print(&self) {
        info!("╔════════════════════════════════════════════════════════════╗");
        info!("║                      LOAD TEST SUMMARY                     ║");
        info!("╚════════════════════════════════════════════════════════════╝");
        info!("");
        info!("Records:");
        info!("  Total:      {}", self.total);
        info!("  Succeeded:  {}", self.successes);
        info!("  Failed:     {}", self.failures);
        info!("");
        info!("Elapsed (s):");
        info!("  Total:  {:.2}", self.total_elapsed.as_secs_f64());
        info!("  Avg:    {:.3}", self.avg_elapsed.as_secs_f64());
        info!("  Min:    {:.3}", self.min_elapsed.as_secs_f64());
        info!("  p50:    {:.3}", self.p50_elapsed.as_secs_f64());
        info!("  p95:    {:.3}", self.p95_elapsed.as_secs_f64());
        info!("  p99:    {:.3}", self.p99_elapsed.as_secs_f64());
        info!("  Max:    {:.3}", self.max_elapsed.as_secs_f64());
        info!("");
        info!("Throughput: {:.2} req/s", self.throughput);
        info!("═══════════════════════════════════════════════════════════");
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = sonic_rs::to_string_pretty(self).map_err(LoadTestError::SummarySerialize)?;
        std::fs::write(path, json).map_err(|source| LoadTestError::SummaryWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Summary written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonic_rs::JsonValueTrait;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn empty_run_reports_zeroes() {
        let summary = RunSummary::new(0, 0, 0, &[], ms(0), [Duration::ZERO; 3]);
        assert_eq!(summary.avg_elapsed, Duration::ZERO);
        assert_eq!(summary.max_elapsed, Duration::ZERO);
        assert_eq!(summary.min_elapsed, Duration::ZERO);
        assert_eq!(summary.throughput, 0.0);

        // Some wall time still elapses spawning nothing.
        let summary = RunSummary::new(0, 0, 0, &[], ms(3), [Duration::ZERO; 3]);
        assert_eq!(summary.throughput, 0.0);
    }

    #[test]
    fn computes_avg_min_max_and_throughput() {
        let summary = RunSummary::new(
            4,
            3,
            1,
            &[ms(100), ms(400), ms(200), ms(300)],
            ms(2000),
            [ms(200), ms(400), ms(400)],
        );
        assert_eq!(summary.avg_elapsed, ms(250));
        assert_eq!(summary.min_elapsed, ms(100));
        assert_eq!(summary.max_elapsed, ms(400));
        assert_eq!(summary.total_elapsed, ms(2000));
        assert!((summary.throughput - 2.0).abs() < 1e-9);
    }

    #[test]
    fn writes_json_in_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary::new(1, 1, 0, &[ms(1500)], ms(1500), [ms(1500); 3]);

        summary.write_json(&path).unwrap();

        let written: sonic_rs::Value =
            sonic_rs::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.get("total").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(written.get("avg_elapsed").and_then(|v| v.as_f64()), Some(1.5));
    }
}
