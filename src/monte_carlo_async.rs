use std::time::Instant;
use tokio::runtime::Runtime;
use tokio::task;
use tracing::{debug, info};

use crate::accumulator::AsyncTally;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::estimate::Estimate;
use crate::monte_carlo::RunCounts;
use crate::sampler::{clock_seed, worker_rng, Sampler};

/// Estimates pi with one blocking tokio task per configured worker.
///
/// Workers run on the runtime's blocking pool. When the worker count exceeds
/// that pool's `max_blocking_threads`, the extra workers wait for a free
/// thread instead of starting together; [`estimate_on_runtime`] sizes the
/// pool to the worker count.
pub async fn estimate_async(config: &Config) -> Result<Estimate> {
    let start = Instant::now();
    let shares = config.shares();
    info!(
        workers = config.workers(),
        total_points = config.total_points(),
        points_per_worker = config.points_per_worker(),
        "starting async estimation"
    );

    let counts = run_tasks(config, &shares).await?;
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
        "async estimation finished"
    );
    Ok(estimate)
}

pub(crate) async fn run_tasks(config: &Config, shares: &[u64]) -> Result<RunCounts> {
    let sampler = Sampler::new(config.interval());
    let tally = AsyncTally::new();
    let mut handles = Vec::with_capacity(shares.len());

    for (task_id, &points) in shares.iter().enumerate() {
        let tally = tally.clone();
        let handle = task::spawn(async move {
            // Sampling is CPU bound, keep it off the async workers
            let inside = task::spawn_blocking(move || {
                let mut rng = worker_rng(task_id, clock_seed());
                sampler.count_in_circle(task_id, points, &mut rng)
            })
            .await?;
            tally.merge(inside).await;
            debug!(worker_id = task_id, points, inside, "worker merged");
            Ok::<u64, Error>(inside)
        });
        handles.push(handle);
    }

    // Await every task before surfacing the first failure
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.map_err(Error::from).and_then(|inside| inside));
    }
    let local_counts = results.into_iter().collect::<Result<Vec<u64>>>()?;

    Ok(RunCounts {
        in_circle: tally.into_total()?,
        local_counts,
    })
}

/// Builds the runtime used by [`estimate_on_runtime`], with a blocking pool
/// large enough for every worker to sample at once.
pub(crate) fn build_runtime(config: &Config) -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("pi-runtime")
        .max_blocking_threads(config.workers())
        .build()
        .map_err(Error::Runtime)
}

/// Runs [`estimate_async`] on a fresh multi-threaded runtime.
pub fn estimate_on_runtime(config: &Config) -> Result<Estimate> {
    build_runtime(config)?.block_on(estimate_async(config))
}
