//! Secure random bytes and unbiased index selection.
//!
//! The byte source amortizes calls into the underlying CSPRNG by
//! refilling a fixed-size batch; the selector turns that byte stream
//! into indices that are exactly uniform over an arbitrary range.

mod batch;
mod selector;

pub use batch::{ByteSource, RandomBytes, BATCH_SIZE};
pub use selector::{UnbiasedSelector, MAX_RANGE};
