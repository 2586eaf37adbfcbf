use std::fmt;

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// The configured budget, used as the denominator.
    pub total_points: u64,
    /// Points actually drawn; smaller than the budget when a remainder is dropped.
    pub sampled_points: u64,
    pub in_circle: u64,
    pub pi: f64,
}

impl Estimate {
    pub fn from_counts(in_circle: u64, total_points: u64, sampled_points: u64) -> Self {
        let pi = 4.0 * in_circle as f64 / total_points as f64;
        Estimate {
            total_points,
            sampled_points,
            in_circle,
            pi,
        }
    }

    pub fn abs_error(&self) -> f64 {
        (std::f64::consts::PI - self.pi).abs()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Final Estimation of Pi = {:.6}", self.pi)
    }
}
