use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;
use tracing::{debug, info};

use crate::accumulator::SharedTally;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::estimate::Estimate;
use crate::sampler::{clock_seed, worker_rng, Sampler};

/// Per-run counts before they are folded into an [`Estimate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunCounts {
    /// Value read back from the shared accumulator.
    pub in_circle: u64,
    /// Each worker's own tally, indexed by worker id.
    pub local_counts: Vec<u64>,
}

/// Estimates pi with one OS thread per configured worker.
pub fn estimate(config: &Config) -> Result<Estimate> {
    let start = Instant::now();
    let shares = config.shares();
    info!(
        workers = config.workers(),
        total_points = config.total_points(),
        points_per_worker = config.points_per_worker(),
        "starting threaded estimation"
    );

    let counts = run_workers(config, &shares)?;
    debug_assert_eq!(counts.in_circle, counts.local_counts.iter().sum::<u64>());
    let estimate = Estimate::from_counts(
        counts.in_circle,
        config.total_points(),
        shares.iter().sum(),
    );

    info!(
        in_circle = estimate.in_circle,
        pi = estimate.pi,
        error = estimate.abs_error(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "threaded estimation finished"
    );
    Ok(estimate)
}

pub(crate) fn run_workers(config: &Config, shares: &[u64]) -> Result<RunCounts> {
    let sampler = Sampler::new(config.interval());
    let tally = SharedTally::new();

    let local_counts = thread::scope(|s| -> Result<Vec<u64>> {
        let mut handles = Vec::with_capacity(shares.len());

        for (worker_id, &points) in shares.iter().enumerate() {
            let tally = &tally;
            let handle = thread::Builder::new()
                .name(format!("pi-worker-{worker_id}"))
                .spawn_scoped(s, move || -> Result<u64> {
                    let mut rng = worker_rng(worker_id, clock_seed());
                    let inside = sampler.count_in_circle(worker_id, points, &mut rng);
                    tally.merge(inside)?;
                    debug!(worker_id, points, inside, "worker merged");
                    Ok(inside)
                })
                .map_err(|source| Error::Spawn {
                    worker: worker_id,
                    source,
                })?;
            handles.push(handle);
        }

        join_all(handles)
    })?;

    Ok(RunCounts {
        in_circle: tally.into_total()?,
        local_counts,
    })
}

/// Joins every handle before reporting the first failure, so no worker is
/// left for the scope to join.
fn join_all(handles: Vec<ScopedJoinHandle<'_, Result<u64>>>) -> Result<Vec<u64>> {
    let results: Vec<Result<u64>> = handles
        .into_iter()
        .enumerate()
        .map(|(worker_id, handle)| {
            handle
                .join()
                .map_err(|_| Error::WorkerPanicked { worker: worker_id })?
        })
        .collect();
    results.into_iter().collect()
}
