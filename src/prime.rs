//! Random probable primes of a caller-chosen bit width.

use log::{debug, warn};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::Rng;

use crate::error::{PrimeGenError, Result, SearchStage};
use crate::primality::{MillerRabin, Primality, Rounds};
use crate::random::random_bits;

/// Smallest width for which a prime exists.
pub const MIN_PRIME_BITS: u64 = 2;

/// How the generator moves to the next candidate after a composite.
///
/// The walk-down strategies pick primes that follow a long prime gap more
/// often than others, so their output is not uniform over the primes of the
/// requested width. `Resample` is uniform but draws more entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Subtract one from the candidate.
    #[default]
    Decrement,
    /// Force the candidate odd, then subtract two.
    StepByTwo,
    /// Draw a fresh random candidate.
    Resample,
}

/// Produces random probable primes of a caller-chosen bit width.
#[derive(Debug, Clone, Default)]
pub struct PrimeGenerator {
    tester: MillerRabin,
    strategy: SearchStrategy,
    max_candidates: Option<u64>,
}

impl PrimeGenerator {
    /// Decrement search, bit-length round count, default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Miller-Rabin round count.
    pub fn with_rounds(mut self, rounds: Rounds) -> Self {
        self.tester = MillerRabin::new(rounds);
        self
    }

    /// Set how the next candidate is chosen after a composite.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap on the number of candidates tested per call.
    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    /// The primality tester applied to each candidate.
    pub fn tester(&self) -> &MillerRabin {
        &self.tester
    }

    /// The configured candidate search strategy.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Candidate budget applied to a search at `bit_width`.
    pub fn candidate_budget(&self, bit_width: u64) -> u64 {
        self.max_candidates
            .unwrap_or_else(|| bit_width.saturating_mul(100).max(10_000))
    }

    /// Generate a probable prime with bit length at most `bit_width`.
    ///
    /// The first candidate has exactly `bit_width` bits; the walk-down
    /// strategies may settle on a prime one bit shorter.
    pub fn generate<R: Rng + ?Sized>(&self, bit_width: u64, rng: &mut R) -> Result<BigUint> {
        if bit_width < MIN_PRIME_BITS {
            return Err(PrimeGenError::InvalidBitWidth {
                min: MIN_PRIME_BITS,
                got: bit_width,
            });
        }
        if bit_width < 16 {
            warn!("generating a {bit_width}-bit prime; only suitable for testing");
        }

        let budget = self.candidate_budget(bit_width);
        let mut candidate = random_bits(rng, bit_width)?;
        if self.strategy == SearchStrategy::StepByTwo && candidate.is_even() {
            candidate |= BigUint::one();
        }

        let two = BigUint::from(2u32);
        for attempt in 1..=budget {
            if self.tester.test(&candidate, rng) == Primality::ProbablyPrime {
                debug!("found {}-bit prime after {attempt} candidates", candidate.bits());
                return Ok(candidate);
            }

            candidate = match self.strategy {
                SearchStrategy::Decrement => candidate - 1u32,
                SearchStrategy::StepByTwo if candidate > two => candidate - 2u32,
                // Walked down to 1.
                SearchStrategy::StepByTwo => two.clone(),
                SearchStrategy::Resample => random_bits(rng, bit_width)?,
            };
        }

        Err(PrimeGenError::Exhausted {
            stage: SearchStage::Prime,
            attempts: budget,
        })
    }
}
