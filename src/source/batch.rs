//! Batched CSPRNG byte source.
//!
//! Bytes are served from a 256-byte batch that is refilled from the
//! wrapped CSPRNG whenever the cursor reaches its end. Each source is an
//! owned value; threads that need independent streams take their own
//! source (see [`RandomBytes::fork`]) rather than sharing one.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, OsRng, RngCore, SeedableRng};

/// Number of bytes fetched from the CSPRNG per refill.
pub const BATCH_SIZE: usize = 256;

/// A lazy, unbounded stream of random bytes.
///
/// This abstraction allows the selector to run against scripted byte
/// sequences in tests.
pub trait ByteSource {
    /// Returns the next byte in `[0, 255]`.
    fn next_byte(&mut self) -> u8;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

/// Cryptographically secure bytes served from a refillable batch.
///
/// The generic parameter is restricted to [`CryptoRng`]; statistical
/// PRNGs cannot back a password source.
pub struct RandomBytes<R = OsRng> {
    /// The underlying CSPRNG.
    rng: R,
    /// Current batch of bytes.
    batch: [u8; BATCH_SIZE],
    /// Index of the next unread byte in `batch`.
    cursor: usize,
    /// Total refills performed.
    refills: u64,
}

impl RandomBytes<OsRng> {
    /// Creates a source backed by the operating system's CSPRNG.
    ///
    /// This is the recommended way to create a source.
    pub fn from_os_entropy() -> Self {
        Self::new(OsRng)
    }
}

impl Default for RandomBytes<OsRng> {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl RandomBytes<ChaCha20Rng> {
    /// Creates a ChaCha20-backed source from a fixed seed.
    ///
    /// Output is fully determined by the seed, which makes this suitable
    /// for reproducible tests and benchmarks. Seeds must come from a
    /// secure source when used for real passwords.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(ChaCha20Rng::from_seed(seed))
    }
}

impl<R: RngCore + CryptoRng> RandomBytes<R> {
    /// Wraps a CSPRNG. No bytes are fetched until the first draw.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            batch: [0u8; BATCH_SIZE],
            cursor: BATCH_SIZE,
            refills: 0,
        }
    }

    /// Derives an independent ChaCha20 source seeded from this one.
    ///
    /// Used to hand each worker thread its own stream.
    pub fn fork(&mut self) -> RandomBytes<ChaCha20Rng> {
        let mut seed = [0u8; 32];
        for byte in seed.iter_mut() {
            *byte = self.next_byte();
        }
        RandomBytes::from_seed(seed)
    }

    /// Returns the number of batch refills performed.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    fn refill(&mut self) {
        // A missing secure RNG is an environment defect, not a value-level error.
        if let Err(err) = self.rng.try_fill_bytes(&mut self.batch) {
            tracing::error!(error = %err, "secure random source unavailable");
            panic!("secure random source unavailable: {err}");
        }
        self.cursor = 0;
        self.refills += 1;

        tracing::trace!(refills = self.refills, "Refilled random byte batch");
    }
}

impl<R: RngCore + CryptoRng> ByteSource for RandomBytes<R> {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        if self.cursor >= BATCH_SIZE {
            self.refill();
        }
        let byte = self.batch[self.cursor];
        self.cursor += 1;
        byte
    }
}

impl<R> std::fmt::Debug for RandomBytes<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomBytes")
            .field("remaining", &(BATCH_SIZE - self.cursor))
            .field("refills", &self.refills)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    /// A CSPRNG whose entropy source has gone away.
    struct Unavailable;

    impl RngCore for Unavailable {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
            Err(rand_core::Error::from(code))
        }
    }

    impl CryptoRng for Unavailable {}

    #[test]
    #[should_panic(expected = "secure random source unavailable")]
    fn test_unavailable_rng_is_fatal() {
        let mut source = RandomBytes::new(Unavailable);
        source.next_byte();
    }

    #[test]
    fn test_unavailable_rng_not_touched_until_draw() {
        let source = RandomBytes::new(Unavailable);
        assert_eq!(source.refills(), 0);
    }

    #[test]
    fn test_no_refill_before_first_draw() {
        let source = RandomBytes::from_seed([7u8; 32]);
        assert_eq!(source.refills(), 0);
    }

    #[test]
    fn test_refills_once_per_batch() {
        let mut source = RandomBytes::from_seed([7u8; 32]);

        for _ in 0..BATCH_SIZE {
            source.next_byte();
        }
        assert_eq!(source.refills(), 1);

        source.next_byte();
        assert_eq!(source.refills(), 2);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomBytes::from_seed([0x42u8; 32]);
        let mut b = RandomBytes::from_seed([0x42u8; 32]);

        let left: Vec<u8> = (0..600).map(|_| a.next_byte()).collect();
        let right: Vec<u8> = (0..600).map(|_| b.next_byte()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_batches_differ() {
        let mut source = RandomBytes::from_seed([1u8; 32]);

        let first: Vec<u8> = (0..BATCH_SIZE).map(|_| source.next_byte()).collect();
        let second: Vec<u8> = (0..BATCH_SIZE).map(|_| source.next_byte()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fork_is_independent_of_parent() {
        let mut parent = RandomBytes::from_seed([3u8; 32]);
        let mut child = parent.fork();

        let from_parent: Vec<u8> = (0..64).map(|_| parent.next_byte()).collect();
        let from_child: Vec<u8> = (0..64).map(|_| child.next_byte()).collect();
        assert_ne!(from_parent, from_child);
    }

    #[test]
    fn test_os_entropy_produces_bytes() {
        let mut source = RandomBytes::from_os_entropy();

        let bytes: Vec<u8> = (0..1024).map(|_| source.next_byte()).collect();
        assert_eq!(source.refills(), 4);
        // 1024 identical bytes from the OS would be a broken RNG
        assert!(bytes.iter().any(|&b| b != bytes[0]));
    }
}
