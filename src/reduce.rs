use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::error::{CountOverflow, PipelineError, Stage};
use crate::pool::WorkerPool;
use crate::shuffle::ShuffleMap;

/// Runs one reduce task per distinct word with up to `workers` running at
/// once and assembles the final word → total mapping. An overflowing word is
/// reported attached to that word without corrupting sibling results.
pub async fn run(
    shuffled: ShuffleMap,
    workers: usize,
    deadline: Duration,
) -> Result<HashMap<String, u64>, PipelineError> {
    let mut pool = WorkerPool::new(workers, deadline);

    for (word, counts) in shuffled {
        pool.submit(async move {
            let result = sum_counts(&counts);
            debug!(word = %word, ok = result.is_ok(), "reduce task done");
            (word, result)
        })
        .await;
    }

    let outcomes = pool
        .drain()
        .await
        .map_err(|err| err.for_stage(Stage::Reduce))?;

    let mut totals = HashMap::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (word, result) in outcomes {
        match result {
            Ok(total) => {
                totals.insert(word, total);
            }
            Err(()) => failures.push(CountOverflow { word }),
        }
    }

    if !failures.is_empty() {
        return Err(PipelineError::ReduceStage(failures));
    }

    Ok(totals)
}

fn sum_counts(counts: &[u64]) -> Result<u64, ()> {
    counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c).ok_or(()))
}
