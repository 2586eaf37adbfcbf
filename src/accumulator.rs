//! The cross-worker in-circle total.
//!
//! Workers may only add their local count; the total is read once, by
//! consuming the tally after every worker has been joined.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Total guarded by a `std` mutex, shared by reference with scoped threads.
#[derive(Debug, Default)]
pub struct SharedTally {
    total: Mutex<u64>,
}

impl SharedTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, local: u64) -> Result<()> {
        let mut total = self.total.lock().map_err(|_| Error::PoisonedAccumulator)?;
        *total += local;
        Ok(())
    }

    pub fn into_total(self) -> Result<u64> {
        self.total.into_inner().map_err(|_| Error::PoisonedAccumulator)
    }
}

/// Total guarded by a tokio mutex, shared with spawned tasks through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AsyncTally {
    total: Arc<tokio::sync::Mutex<u64>>,
}

impl AsyncTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn merge(&self, local: u64) {
        let mut total = self.total.lock().await;
        *total += local;
    }

    /// Fails if any clone is still alive.
    pub fn into_total(self) -> Result<u64> {
        Arc::try_unwrap(self.total)
            .map(tokio::sync::Mutex::into_inner)
            .map_err(|_| Error::AccumulatorStillShared)
    }
}
