use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{PipelineError, Stage, TaskFailure};
use crate::pool::WorkerPool;
use crate::source::InputSource;
use crate::task::MapTask;

/// Word counts produced by exactly one map task. Owned by that task until
/// handed to the shuffle barrier, never mutated after.
pub type PartialCounts = HashMap<String, u64>;

/// Runs one map task per descriptor with up to `workers` running at once and
/// returns every task's partial counts, or the complete list of tasks that
/// failed to read their input.
pub async fn run(
    tasks: Vec<MapTask>,
    source: Arc<dyn InputSource>,
    workers: usize,
    deadline: Duration,
) -> Result<Vec<PartialCounts>, PipelineError> {
    let mut pool = WorkerPool::new(workers, deadline);

    for task in tasks {
        let source = Arc::clone(&source);
        pool.submit(async move {
            let result = source.fetch(task.input()).await.map(|text| count_words(&text));
            debug!(task = %task.id(), input = task.input(), ok = result.is_ok(), "map task done");
            (task, result)
        })
        .await;
    }

    let outcomes = pool
        .drain()
        .await
        .map_err(|err| err.for_stage(Stage::Map))?;

    let mut partials = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (task, result) in outcomes {
        match result {
            Ok(counts) => partials.push(counts),
            Err(source) => failures.push(TaskFailure {
                task: task.id(),
                input: task.input().to_string(),
                source,
            }),
        }
    }

    if !failures.is_empty() {
        return Err(PipelineError::MapStage(failures));
    }

    Ok(partials)
}

/// Splits on runs of whitespace and counts the resulting tokens. Tokens that
/// are empty after trimming are discarded, never counted under "".
pub fn count_words(contents: &str) -> PartialCounts {
    let mut counts = PartialCounts::new();
    for word in contents.split_whitespace() {
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }
    counts
}
