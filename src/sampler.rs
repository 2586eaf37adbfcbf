use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

// Samples per worker echoed at trace level
const TRACED_SAMPLES: u64 = 5;

/// Counts random points of the unit square that land in the quarter circle.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    interval: u32,
}

impl Sampler {
    pub fn new(interval: u32) -> Self {
        Sampler { interval }
    }

    /// Maps a raw draw onto `[0, 1]`. Both ends are reachable.
    pub fn coordinate(&self, draw: u32) -> f64 {
        let modulus = u64::from(self.interval) + 1;
        (u64::from(draw) % modulus) as f64 / f64::from(self.interval)
    }

    pub fn count_in_circle<R: Rng + ?Sized>(
        &self,
        worker_id: usize,
        points: u64,
        rng: &mut R,
    ) -> u64 {
        let mut inside = 0;

        for i in 0..points {
            let x = self.coordinate(rng.next_u32());
            let y = self.coordinate(rng.next_u32());
            if in_quarter_circle(x, y) {
                inside += 1;
            }

            if i < TRACED_SAMPLES {
                trace!(worker_id, x, y, inside, "sample");
            }
        }

        inside
    }
}

/// Inclusive: points at distance exactly 1 count as inside.
pub fn in_quarter_circle(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

/// Nanoseconds since the epoch, truncated to 64 bits.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Random source for one worker, distinct per `worker_id` for the same clock reading.
pub fn worker_rng(worker_id: usize, clock_seed: u64) -> SmallRng {
    let mut x = clock_seed ^ (worker_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    SmallRng::seed_from_u64(x ^ (x >> 31))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INTERVAL;
    use rand::rngs::mock::StepRng;
    use rand::RngCore;

    #[test]
    fn test_boundary_point_is_inside() {
        assert!(in_quarter_circle(1.0, 0.0));
        assert!(in_quarter_circle(0.0, 1.0));
        assert!(in_quarter_circle(0.6, 0.8));
        assert!(!in_quarter_circle(1.0, 0.01));
    }

    #[test]
    fn test_coordinate_range_is_inclusive() {
        let sampler = Sampler::new(INTERVAL);
        assert_eq!(sampler.coordinate(0), 0.0);
        assert_eq!(sampler.coordinate(INTERVAL), 1.0);
        assert_eq!(sampler.coordinate(INTERVAL + 1), 0.0);
        assert_eq!(sampler.coordinate(INTERVAL / 2), 0.5);
    }

    #[test]
    fn test_zero_points() {
        let mut rng = worker_rng(0, 42);
        assert_eq!(Sampler::new(INTERVAL).count_in_circle(0, 0, &mut rng), 0);
    }

    #[test]
    fn test_origin_always_inside() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(Sampler::new(INTERVAL).count_in_circle(0, 100, &mut rng), 100);
    }

    #[test]
    fn test_far_corner_always_outside() {
        let mut rng = StepRng::new(u64::from(INTERVAL), 0);
        assert_eq!(Sampler::new(INTERVAL).count_in_circle(0, 100, &mut rng), 0);
    }

    #[test]
    fn test_count_never_exceeds_points() {
        let mut rng = worker_rng(3, clock_seed());
        let inside = Sampler::new(INTERVAL).count_in_circle(3, 10_000, &mut rng);
        assert!(inside <= 10_000);
    }

    #[test]
    fn test_worker_streams_differ() {
        let seed = clock_seed();
        let mut a = worker_rng(0, seed);
        let mut b = worker_rng(1, seed);
        let first: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
        let second: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
        assert_ne!(first, second);
    }
}
