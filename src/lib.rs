//! Monte Carlo estimation of pi.
//!
//! Workers sample points of the unit square independently and add their
//! in-circle counts to a single mutex-guarded total once they finish.

pub mod accumulator;
pub mod config;
pub mod error;
pub mod estimate;
pub mod monte_carlo;
pub mod monte_carlo_async;
pub mod sampler;

pub use config::{Backend, Config, RemainderPolicy, INTERVAL};
pub use error::{Error, Result};
pub use estimate::Estimate;
pub use monte_carlo::estimate;
pub use monte_carlo_async::{estimate_async, estimate_on_runtime};
