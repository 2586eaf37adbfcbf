use thiserror::Error;

/// Errors raised while configuring or running an estimation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid worker count: must be a positive integer")]
    InvalidWorkerCount,
    #[error("Invalid interval: must be at least 1")]
    InvalidInterval,
    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },
    #[error("Accumulator lock poisoned")]
    PoisonedAccumulator,
    #[error("Accumulator still shared after join")]
    AccumulatorStillShared,
    #[error("Failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
