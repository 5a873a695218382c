//! Candidate generation and strict-mode regeneration.

use super::pool::CharacterPool;
use super::rules::StrictRules;
use crate::config::GeneratorOptions;
use crate::error::GenerateError;
use crate::source::{ByteSource, RandomBytes, UnbiasedSelector};
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore};
use std::num::NonZeroUsize;
use std::thread;

/// Generates passwords for one set of options.
///
/// All configuration errors are detected at construction; once built, a
/// generator cannot fail. In strict mode a candidate that misses an
/// enabled class is discarded whole and redrawn. The number of redraws
/// is unbounded but finite with probability 1, since construction
/// rejects lengths and pools that cannot satisfy the rules.
pub struct PasswordGenerator<S = RandomBytes> {
    options: GeneratorOptions,
    pool: CharacterPool,
    /// Present only in strict mode.
    rules: Option<StrictRules>,
    selector: UnbiasedSelector<S>,
    /// Candidates drawn, including rejected ones.
    candidates: u64,
}

impl PasswordGenerator<RandomBytes> {
    /// Creates a generator backed by OS entropy.
    pub fn new(options: GeneratorOptions) -> Result<Self, GenerateError> {
        Self::with_source(options, RandomBytes::from_os_entropy())
    }
}

impl<S: ByteSource> PasswordGenerator<S> {
    /// Creates a generator drawing from the given byte source.
    pub fn with_source(options: GeneratorOptions, source: S) -> Result<Self, GenerateError> {
        options.validate()?;
        let pool = CharacterPool::assemble(&options)?;

        let rules = if options.strict {
            let rules = StrictRules::from_options(&options);
            rules.ensure_satisfiable(&pool)?;
            Some(rules)
        } else {
            None
        };

        tracing::debug!(
            length = options.length,
            pool_size = pool.len(),
            strict_rules = rules.as_ref().map_or(0, |r| r.rules().len()),
            "Password generator ready"
        );

        Ok(Self {
            options,
            pool,
            rules,
            selector: UnbiasedSelector::new(source),
            candidates: 0,
        })
    }

    /// Generates one password.
    pub fn generate(&mut self) -> String {
        let mut candidate = Vec::with_capacity(self.options.length);

        loop {
            self.draw_candidate(&mut candidate);

            let Some(rules) = &self.rules else { break };
            match rules.check(&candidate) {
                Ok(()) => break,
                Err(violation) => {
                    tracing::trace!(
                        rule = %violation.rule,
                        candidates = self.candidates,
                        "Discarded candidate failing strict rule"
                    );
                }
            }
        }

        candidate.into_iter().collect()
    }

    /// Generates `count` independent passwords.
    pub fn generate_multiple(&mut self, count: usize) -> Vec<String> {
        let passwords: Vec<String> = (0..count).map(|_| self.generate()).collect();

        tracing::debug!(
            count,
            candidates = self.candidates,
            "Generated password batch"
        );

        passwords
    }

    /// Returns the options this generator was built from.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Returns the assembled pool.
    pub fn pool(&self) -> &CharacterPool {
        &self.pool
    }

    /// Returns the number of candidates drawn, including rejected ones.
    pub fn candidates_drawn(&self) -> u64 {
        self.candidates
    }

    /// Returns the selector, for draw and rejection counts.
    pub fn selector(&self) -> &UnbiasedSelector<S> {
        &self.selector
    }

    fn draw_candidate(&mut self, candidate: &mut Vec<char>) {
        candidate.clear();
        let pool = self.pool.as_slice();
        for _ in 0..self.options.length {
            candidate.push(pool[self.selector.index(pool.len())]);
        }
        self.candidates += 1;
    }
}

impl<R: RngCore + CryptoRng> PasswordGenerator<RandomBytes<R>> {
    /// Generates `count` passwords across `workers` threads.
    ///
    /// Each worker draws from its own source forked from this one, so
    /// no byte stream is shared between threads. Results are returned
    /// in worker order.
    pub fn generate_parallel(&mut self, count: usize, workers: NonZeroUsize) -> Vec<String> {
        let workers = workers.get().min(count.max(1));
        if workers == 1 {
            return self.generate_multiple(count);
        }

        let mut forks: Vec<PasswordGenerator<RandomBytes<ChaCha20Rng>>> =
            Vec::with_capacity(workers);
        for _ in 0..workers {
            forks.push(PasswordGenerator {
                options: self.options.clone(),
                pool: self.pool.clone(),
                rules: self.rules.clone(),
                selector: UnbiasedSelector::new(self.selector.source_mut().fork()),
                candidates: 0,
            });
        }

        let per_worker = count / workers;
        let remainder = count % workers;

        let batches: Vec<Vec<String>> = thread::scope(|scope| {
            let handles: Vec<_> = forks
                .iter_mut()
                .enumerate()
                .map(|(i, worker)| {
                    let share = per_worker + usize::from(i < remainder);
                    scope.spawn(move || worker.generate_multiple(share))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                .collect()
        });

        self.candidates += forks.iter().map(|f| f.candidates).sum::<u64>();

        tracing::debug!(count, workers, "Generated password batch in parallel");

        batches.concat()
    }
}

impl<S> std::fmt::Debug for PasswordGenerator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGenerator")
            .field("options", &self.options)
            .field("pool_size", &self.pool.len())
            .field("candidates", &self.candidates)
            .finish()
    }
}

/// Generates one password from OS entropy.
pub fn generate(options: &GeneratorOptions) -> Result<String, GenerateError> {
    Ok(PasswordGenerator::new(options.clone())?.generate())
}

/// Generates `count` passwords from OS entropy.
///
/// Options are validated even when `count` is zero; on error no
/// passwords are returned.
pub fn generate_multiple(
    count: usize,
    options: &GeneratorOptions,
) -> Result<Vec<String>, GenerateError> {
    Ok(PasswordGenerator::new(options.clone())?.generate_multiple(count))
}
