use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Resolution of a single coordinate draw; the point budget is its square.
pub const INTERVAL: u32 = 10_000;

/// What happens to the points left over by `total_points / workers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Leftover points are never sampled.
    #[default]
    Drop,
    /// The last worker samples the leftover points on top of its share.
    LastWorker,
}

/// Which coordinator runs the workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// One OS thread per worker.
    #[default]
    Threads,
    /// One blocking tokio task per worker. The runtime's blocking pool is
    /// sized to the worker count; a blocking thread tokio cannot create
    /// panics inside tokio rather than surfacing as a spawn error.
    Tokio,
}

/// Immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    workers: NonZeroUsize,
    interval: u32,
    remainder: RemainderPolicy,
}

impl Config {
    pub fn new(workers: usize) -> Result<Self> {
        let workers = NonZeroUsize::new(workers).ok_or(Error::InvalidWorkerCount)?;
        Ok(Config {
            workers,
            interval: INTERVAL,
            remainder: RemainderPolicy::Drop,
        })
    }

    pub fn with_interval(mut self, interval: u32) -> Result<Self> {
        if interval == 0 {
            return Err(Error::InvalidInterval);
        }
        self.interval = interval;
        Ok(self)
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder
    }

    /// The configured point budget, `interval²`.
    pub fn total_points(&self) -> u64 {
        u64::from(self.interval) * u64::from(self.interval)
    }

    pub fn points_per_worker(&self) -> u64 {
        self.total_points() / self.workers() as u64
    }

    /// Point count for each worker, indexed by worker id.
    pub fn shares(&self) -> Vec<u64> {
        let num_workers = self.workers();
        let per_worker = self.points_per_worker();
        let mut shares = vec![per_worker; num_workers];
        if self.remainder == RemainderPolicy::LastWorker {
            shares[num_workers - 1] += self.total_points() % num_workers as u64;
        }
        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = Config::new(4).unwrap();
        assert_eq!(config.total_points(), 100_000_000);
        assert_eq!(config.points_per_worker(), 25_000_000);
        assert_eq!(config.shares(), vec![25_000_000; 4]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(Config::new(0), Err(Error::InvalidWorkerCount)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = Config::new(1).unwrap().with_interval(0);
        assert!(matches!(result, Err(Error::InvalidInterval)));
    }

    #[test]
    fn test_remainder_dropped_by_default() {
        let config = Config::new(3).unwrap().with_interval(10).unwrap();
        assert_eq!(config.shares(), vec![33, 33, 33]);
        assert_eq!(config.shares().iter().sum::<u64>(), 99);
    }

    #[test]
    fn test_remainder_to_last_worker() {
        let config = Config::new(3)
            .unwrap()
            .with_interval(10)
            .unwrap()
            .with_remainder(RemainderPolicy::LastWorker);
        assert_eq!(config.shares(), vec![33, 33, 34]);
        assert_eq!(config.shares().iter().sum::<u64>(), config.total_points());
    }

    #[test]
    fn test_more_workers_than_points() {
        let config = Config::new(5).unwrap().with_interval(2).unwrap();
        assert_eq!(config.points_per_worker(), 0);
        assert!(config.shares().iter().all(|&share| share == 0));
    }
}
