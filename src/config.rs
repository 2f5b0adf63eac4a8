use std::time::Duration;

pub const DEFAULT_REDUCE_WORKERS: usize = 4;
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(300);

/// Run parameters for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reduce-stage concurrency limit, independent of map parallelism.
    pub reduce_workers: usize,
    /// Optional cap on map parallelism. Without a cap the map pool runs one
    /// worker per task.
    pub map_workers: Option<usize>,
    /// Bound on how long the coordinator waits for a stage to drain. Expiry
    /// is reported as a stage failure, never a silent partial result.
    pub stage_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduce_workers: DEFAULT_REDUCE_WORKERS,
            map_workers: None,
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }
}

impl Config {
    pub fn with_reduce_workers(reduce_workers: usize) -> Self {
        Self {
            reduce_workers,
            ..Self::default()
        }
    }
}
