//! Statistical checks of selector output.
//!
//! These are sanity checks that catch gross bias (such as a plain
//! modulo reduction), not proofs of uniformity.

mod statistics;
mod threshold;

pub use self_test::{RangeResult, SelfTest, SelfTestReport, DEFAULT_RANGES};
pub use statistics::UniformityTest;
pub use threshold::{UniformityThresholds, UniformityViolation};
