//! Single-process, in-memory MapReduce-style word counting: a bounded map
//! worker pool, a shuffle barrier, and a bounded reduce worker pool, run
//! strictly in sequence by the [`Coordinator`].

pub mod config;
pub mod coordinator;
pub mod error;
pub mod map;
pub mod pool;
pub mod reduce;
pub mod shuffle;
pub mod source;
pub mod task;

pub use config::Config;
pub use coordinator::Coordinator;
pub use error::{CountOverflow, PipelineError, Stage, TaskFailure};
pub use source::{FsSource, InputSource, MemorySource};
pub use task::{MapTask, TaskId};
