//! Pass/fail thresholds for uniformity tests.

use super::statistics::UniformityTest;
use serde::{Deserialize, Serialize};

/// Thresholds applied to a [`UniformityTest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformityThresholds {
    /// One-sided z-score of the chi-square critical value.
    pub z_score: f64,
    /// Minimum expected count per bin for the statistic to be meaningful.
    pub min_expected_per_bin: f64,
}

impl Default for UniformityThresholds {
    fn default() -> Self {
        Self {
            z_score: 3.090,            // p = 0.001
            min_expected_per_bin: 5.0, // usual chi-square validity bound
        }
    }
}

impl UniformityThresholds {
    /// Creates stricter thresholds (more false alarms).
    pub fn conservative() -> Self {
        Self {
            z_score: 2.326, // p = 0.01
            min_expected_per_bin: 10.0,
        }
    }

    /// Creates more permissive thresholds (for testing).
    pub fn permissive() -> Self {
        Self {
            z_score: 4.265, // p = 0.00001
            min_expected_per_bin: 5.0,
        }
    }

    /// Checks a test against the thresholds.
    pub fn check(&self, test: &UniformityTest) -> Result<(), UniformityViolation> {
        let expected = test.expected_per_bin();
        if expected < self.min_expected_per_bin {
            return Err(UniformityViolation::InsufficientSamples {
                expected,
                threshold: self.min_expected_per_bin,
            });
        }

        let critical = test.critical_value(self.z_score);
        if test.chi_square > critical {
            return Err(UniformityViolation::ChiSquare {
                observed: test.chi_square,
                critical,
                bins: test.bins,
            });
        }

        Ok(())
    }
}

/// Uniformity violation types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UniformityViolation {
    /// The histogram deviates from uniform beyond the critical value.
    #[error("chi-square {observed:.2} exceeds critical value {critical:.2} over {bins} bins")]
    ChiSquare {
        observed: f64,
        critical: f64,
        bins: usize,
    },

    /// Too few draws per bin for the chi-square approximation.
    #[error("expected {expected:.2} samples per bin, need at least {threshold:.2}")]
    InsufficientSamples { expected: f64, threshold: f64 },
}
