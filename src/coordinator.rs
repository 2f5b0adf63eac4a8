use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::PipelineError;
use crate::source::InputSource;
use crate::task::MapTask;
use crate::{map, reduce, shuffle};

/// The single entry point. Sequences the pipeline strictly: the map stage
/// fully drains, then the shuffle barrier merges, then the reduce stage fully
/// drains, then the final mapping is returned. Each stage gets its own worker
/// pool, torn down when the stage completes.
pub struct Coordinator {
    source: Arc<dyn InputSource>,
    config: Config,
}

impl Coordinator {
    pub fn new(source: Arc<dyn InputSource>, config: Config) -> Self {
        Self { source, config }
    }

    /// Counts words across `inputs` and returns the final word → total
    /// mapping, or the first stage's failure. An empty input set yields an
    /// empty mapping, not an error.
    pub async fn run(
        &self,
        inputs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<HashMap<String, u64>, PipelineError> {
        let tasks: Vec<MapTask> = inputs.into_iter().map(MapTask::new).collect();
        if tasks.is_empty() {
            return Ok(HashMap::new());
        }

        let map_workers = self
            .config
            .map_workers
            .unwrap_or(tasks.len())
            .min(tasks.len())
            .max(1);
        info!(tasks = tasks.len(), workers = map_workers, "map stage start");
        let partials = map::run(
            tasks,
            Arc::clone(&self.source),
            map_workers,
            self.config.stage_timeout,
        )
        .await?;

        let shuffled = shuffle::merge(partials);
        info!(keys = shuffled.len(), "shuffle barrier merged");
        if shuffled.is_empty() {
            return Ok(HashMap::new());
        }

        let reduce_workers = self.config.reduce_workers.min(shuffled.len()).max(1);
        info!(
            keys = shuffled.len(),
            workers = reduce_workers,
            "reduce stage start"
        );
        reduce::run(shuffled, reduce_workers, self.config.stage_timeout).await
    }
}
