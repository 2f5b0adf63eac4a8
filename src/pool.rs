use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_channel::{Receiver, Sender};
use futures::future;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};

use crate::error::{PipelineError, Stage};

type Job<R> = Pin<Box<dyn Future<Output = R> + Send + 'static>>;

/// Bounded-concurrency pool for one pipeline stage: a fixed set of worker
/// tasks consuming jobs from a bounded channel. Created for a single stage
/// and consumed by [`WorkerPool::drain`], never reused.
pub struct WorkerPool<R> {
    sender: Sender<Job<R>>,
    results: Receiver<R>,
    workers: Vec<JoinHandle<()>>,
    submitted: usize,
    deadline: Duration,
}

/// A stage drain that did not deliver every submitted outcome.
#[derive(Debug)]
pub enum DrainError {
    /// The deadline expired; outstanding jobs were aborted.
    Timeout {
        timeout: Duration,
        completed: usize,
        submitted: usize,
    },
    /// All workers exited before every outcome arrived (a job panicked).
    Stalled { completed: usize, submitted: usize },
}

impl DrainError {
    pub fn for_stage(self, stage: Stage) -> PipelineError {
        match self {
            DrainError::Timeout {
                timeout,
                completed,
                submitted,
            } => PipelineError::StageTimeout {
                stage,
                timeout,
                completed,
                submitted,
            },
            DrainError::Stalled {
                completed,
                submitted,
            } => PipelineError::StageIncomplete {
                stage,
                completed,
                submitted,
            },
        }
    }
}

impl<R: Send + 'static> WorkerPool<R> {
    pub fn new(size: usize, deadline: Duration) -> WorkerPool<R> {
        assert!(size > 0);

        let (sender, receiver) = async_channel::bounded::<Job<R>>(size);
        let (result_tx, results) = async_channel::unbounded();

        let workers = (0..size)
            .map(|_| {
                let receiver = receiver.clone();
                let result_tx = result_tx.clone();
                tokio::spawn(async move {
                    while let Ok(job) = receiver.recv().await {
                        let outcome = job.await;
                        if result_tx.send(outcome).await.is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        WorkerPool {
            sender,
            results,
            workers,
            submitted: 0,
            deadline,
        }
    }

    /// Queues one job. Blocks (asynchronously) while all workers are busy and
    /// the job channel is full.
    pub async fn submit<F>(&mut self, job: F)
    where
        F: Future<Output = R> + Send + 'static,
    {
        self.submitted += 1;
        // workers hold the receiving end open until the pool is drained
        let _ = self.sender.send(Box::pin(job)).await;
    }

    /// Waits until every submitted job has reached a terminal state and
    /// returns the outcomes, in completion order. On deadline expiry all
    /// outstanding workers are aborted rather than left running.
    pub async fn drain(self) -> Result<Vec<R>, DrainError> {
        self.sender.close();

        let deadline = Instant::now() + self.deadline;
        let mut outcomes = Vec::with_capacity(self.submitted);

        while outcomes.len() < self.submitted {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match timeout(remaining, self.results.recv()).await {
                Ok(Ok(outcome)) => outcomes.push(outcome),
                Ok(Err(_)) => {
                    return Err(DrainError::Stalled {
                        completed: outcomes.len(),
                        submitted: self.submitted,
                    });
                }
                Err(_) => {
                    for worker in &self.workers {
                        worker.abort();
                    }
                    return Err(DrainError::Timeout {
                        timeout: self.deadline,
                        completed: outcomes.len(),
                        submitted: self.submitted,
                    });
                }
            }
        }

        // workers exit on their own once the closed job channel runs dry
        let _ = future::join_all(self.workers).await;

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn delivers_every_outcome_with_more_jobs_than_workers() {
        let mut pool = WorkerPool::new(3, Duration::from_secs(10));
        let ran = Arc::new(AtomicUsize::new(0));

        for i in 0..20usize {
            let ran = Arc::clone(&ran);
            pool.submit(async move {
                ran.fetch_add(1, Ordering::SeqCst);
                i
            })
            .await;
        }

        let mut outcomes = pool.drain().await.unwrap();
        outcomes.sort_unstable();
        assert_eq!(outcomes, (0..20).collect::<Vec<_>>());
        assert_eq!(ran.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn drain_of_an_empty_pool_returns_nothing() {
        let pool: WorkerPool<()> = WorkerPool::new(2, Duration::from_secs(10));
        assert!(pool.drain().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn panicked_job_surfaces_as_incomplete_stage() {
        let mut pool = WorkerPool::new(2, Duration::from_secs(10));

        pool.submit(async { 1u32 }).await;
        pool.submit(async { panic!("boom") }).await;
        pool.submit(async { 3 }).await;

        match pool.drain().await {
            Err(DrainError::Stalled {
                completed,
                submitted,
            }) => {
                assert_eq!(completed, 2);
                assert_eq!(submitted, 3);
            }
            other => panic!("expected stalled drain, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn expired_deadline_reports_progress_and_aborts() {
        let mut pool = WorkerPool::new(2, Duration::from_millis(50));

        pool.submit(async { 1u32 }).await;
        pool.submit(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            2
        })
        .await;

        match pool.drain().await {
            Err(DrainError::Timeout {
                completed,
                submitted,
                ..
            }) => {
                assert_eq!(completed, 1);
                assert_eq!(submitted, 2);
            }
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }
}
