use std::fmt;

use uuid::Uuid;

/// Opaque task identity, only used for diagnostics and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One unit of map work: a generated id plus the input reference to process.
/// Immutable after creation, lives for a single pipeline run.
#[derive(Debug, Clone)]
pub struct MapTask {
    id: TaskId,
    input: String,
}

impl MapTask {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            input: input.into(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
