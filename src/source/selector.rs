//! Rejection-sampling index selection.
//!
//! `byte % max` over-represents low values whenever 256 is not a
//! multiple of `max`. The selector instead rejects any byte at or above
//! the largest multiple of `max` that fits in the byte range, and draws
//! again. The retry loop has no upper bound: it terminates with
//! probability 1, but a pathological byte stream could in theory keep it
//! spinning indefinitely.

use super::ByteSource;

/// Largest range the selector accepts (two bytes per draw).
pub const MAX_RANGE: usize = 1 << 16;

const BYTE_RANGE: usize = 1 << 8;

/// Draws uniformly distributed indices from a byte source.
#[derive(Debug)]
pub struct UnbiasedSelector<S> {
    /// Underlying byte stream.
    source: S,
    /// Indices returned.
    draws: u64,
    /// Raw samples discarded to avoid bias.
    rejections: u64,
}

impl<S: ByteSource> UnbiasedSelector<S> {
    /// Creates a selector with zeroed counters.
    pub fn new(source: S) -> Self {
        Self {
            source,
            draws: 0,
            rejections: 0,
        }
    }

    /// Returns an index uniformly distributed over `[0, max)`.
    ///
    /// Ranges up to 256 consume one byte per sample; larger ranges (up to
    /// [`MAX_RANGE`]) combine two bytes big-endian.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero or exceeds [`MAX_RANGE`].
    pub fn index(&mut self, max: usize) -> usize {
        assert!(
            max > 0 && max <= MAX_RANGE,
            "selector range must be in 1..={MAX_RANGE}, got {max}"
        );

        let (space, wide) = if max <= BYTE_RANGE {
            (BYTE_RANGE, false)
        } else {
            (MAX_RANGE, true)
        };
        let limit = space - (space % max);

        loop {
            let sample = if wide {
                (usize::from(self.source.next_byte()) << 8) | usize::from(self.source.next_byte())
            } else {
                usize::from(self.source.next_byte())
            };

            if sample < limit {
                self.draws += 1;
                return sample % max;
            }
            self.rejections += 1;
        }
    }

    /// Returns the number of indices produced.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Returns the number of samples rejected.
    pub fn rejections(&self) -> u64 {
        self.rejections
    }

    /// Returns the byte source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
