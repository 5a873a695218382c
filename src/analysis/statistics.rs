//! Chi-square goodness of fit against the uniform distribution.

use crate::source::{ByteSource, UnbiasedSelector};

/// Pearson's chi-square test of a histogram against uniform.
#[derive(Debug, Clone)]
pub struct UniformityTest {
    /// Number of histogram bins (the selector range).
    pub bins: usize,
    /// Total observations.
    pub samples: u64,
    /// Chi-square statistic.
    pub chi_square: f64,
    /// Largest relative deviation of a bin from its expected count.
    pub max_deviation: f64,
}

impl UniformityTest {
    /// Computes the statistic for observed bin counts.
    pub fn from_counts(counts: &[u64]) -> Self {
        let bins = counts.len();
        let samples: u64 = counts.iter().sum();

        if bins == 0 || samples == 0 {
            return Self {
                bins,
                samples,
                chi_square: 0.0,
                max_deviation: 0.0,
            };
        }

        let expected = samples as f64 / bins as f64;
        let mut chi_square = 0.0;
        let mut max_deviation: f64 = 0.0;
        for &observed in counts {
            let diff = observed as f64 - expected;
            chi_square += diff * diff / expected;
            max_deviation = max_deviation.max(diff.abs() / expected);
        }

        Self {
            bins,
            samples,
            chi_square,
            max_deviation,
        }
    }

    /// Draws `samples` indices over `[0, max)` and tests their histogram.
    ///
    /// # Panics
    ///
    /// Panics if the selector cannot draw from `max` (zero or above
    /// [`MAX_RANGE`](crate::source::MAX_RANGE)).
    pub fn sample<S: ByteSource>(
        selector: &mut UnbiasedSelector<S>,
        max: usize,
        samples: u64,
    ) -> Self {
        let mut counts = vec![0u64; max];
        for _ in 0..samples {
            counts[selector.index(max)] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Bins less one.
    pub fn degrees_of_freedom(&self) -> usize {
        self.bins.saturating_sub(1)
    }

    /// Expected observations per bin under uniformity.
    pub fn expected_per_bin(&self) -> f64 {
        if self.bins == 0 {
            return 0.0;
        }
        self.samples as f64 / self.bins as f64
    }

    /// Upper critical value for a one-sided test at the given z-score.
    ///
    /// Uses the Wilson–Hilferty cube approximation, which is within a few
    /// percent of the exact quantile for the degrees of freedom used here.
    pub fn critical_value(&self, z_score: f64) -> f64 {
        let k = self.degrees_of_freedom() as f64;
        if k == 0.0 {
            return 0.0;
        }
        let h = 2.0 / (9.0 * k);
        k * (1.0 - h + z_score * h.sqrt()).powi(3)
    }
}
