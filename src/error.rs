use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::task::TaskId;

/// Which bounded-concurrency stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Map,
    Reduce,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Map => write!(f, "map"),
            Stage::Reduce => write!(f, "reduce"),
        }
    }
}

/// A map task that could not obtain its input content.
#[derive(Debug, Error)]
#[error("map task {task} on {input:?}: {source}")]
pub struct TaskFailure {
    pub task: TaskId,
    pub input: String,
    #[source]
    pub source: io::Error,
}

/// A reduce task whose running total no longer fits in a u64.
#[derive(Debug, Error)]
#[error("count for {word:?} overflowed u64")]
pub struct CountOverflow {
    pub word: String,
}

/// Terminal outcome of a failed pipeline run. Map failures are reported
/// before the shuffle barrier ever runs, so a partial result map is never
/// exposed as if it were complete.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{} map task(s) failed: {}", .0.len(), list(.0))]
    MapStage(Vec<TaskFailure>),

    #[error("{} reduce task(s) failed: {}", .0.len(), list(.0))]
    ReduceStage(Vec<CountOverflow>),

    #[error(
        "{stage} stage timed out after {timeout:?} with {completed} of {submitted} tasks finished"
    )]
    StageTimeout {
        stage: Stage,
        timeout: Duration,
        completed: usize,
        submitted: usize,
    },

    #[error("{stage} stage workers exited with {completed} of {submitted} tasks finished")]
    StageIncomplete {
        stage: Stage,
        completed: usize,
        submitted: usize,
    },
}

fn list<E: fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(E::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
