//! DSA-style domain parameters built on a safe prime `p = 2q + 1`.

use std::fmt;

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;

use crate::error::{PrimeGenError, Result, SearchStage};
use crate::modexp::mod_pow;
use crate::primality::{MillerRabin, Rounds};
use crate::prime::{MIN_PRIME_BITS, PrimeGenerator, SearchStrategy};

/// Bit width of `q` used when none is given.
pub const DEFAULT_Q_BITS: u64 = 256;

/// Largest generator candidate tried before giving up.
pub const DEFAULT_MAX_GENERATOR: u64 = 1 << 16;

/// Public parameters `(p, q, g)` of a discrete-log scheme.
///
/// `p = 2q + 1` with both `p` and `q` prime, and `g^q mod p != 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl DomainParameters {
    /// Re-check every invariant; primality is probabilistic.
    pub fn verify<R: Rng + ?Sized>(&self, tester: &MillerRabin, rng: &mut R) -> bool {
        let two = BigUint::from(2u32);
        self.p == (&self.q << 1usize) + BigUint::one()
            && self.g >= two
            && tester.is_probably_prime(&self.q, rng)
            && tester.is_probably_prime(&self.p, rng)
            && !mod_pow(&self.g, &self.q, &self.p).is_one()
    }
}

impl fmt::Display for DomainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.p, self.q, self.g)
    }
}

/// Searches for a safe prime pair and then for the smallest usable generator.
#[derive(Debug, Clone)]
pub struct DomainParameterGenerator {
    q_bits: u64,
    primes: PrimeGenerator,
    max_safe_prime_attempts: Option<u64>,
    max_generator: u64,
}

impl Default for DomainParameterGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_Q_BITS)
    }
}

impl DomainParameterGenerator {
    /// Generator for a `q` of `q_bits` bits with default search settings.
    pub fn new(q_bits: u64) -> Self {
        Self {
            q_bits,
            primes: PrimeGenerator::new(),
            max_safe_prime_attempts: None,
            max_generator: DEFAULT_MAX_GENERATOR,
        }
    }

    /// Set the Miller-Rabin round count for both `q` and `p`.
    pub fn with_rounds(mut self, rounds: Rounds) -> Self {
        self.primes = self.primes.with_rounds(rounds);
        self
    }

    /// Set the candidate search strategy used for `q`.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.primes = self.primes.with_strategy(strategy);
        self
    }

    /// Replace the prime generator used for `q`, keeping its own settings.
    pub fn with_prime_generator(mut self, primes: PrimeGenerator) -> Self {
        self.primes = primes;
        self
    }

    /// Cap on how many `q` are drawn before giving up on a safe prime.
    pub fn with_max_safe_prime_attempts(mut self, attempts: u64) -> Self {
        self.max_safe_prime_attempts = Some(attempts);
        self
    }

    /// Largest `g` tried before giving up.
    pub fn with_max_generator(mut self, max_generator: u64) -> Self {
        self.max_generator = max_generator;
        self
    }

    /// Requested bit width of `q`.
    pub fn q_bits(&self) -> u64 {
        self.q_bits
    }

    /// The primality tester shared by the `q` and `p` checks.
    pub fn tester(&self) -> &MillerRabin {
        self.primes.tester()
    }

    /// Safe-prime attempt budget for this width.
    pub fn safe_prime_budget(&self) -> u64 {
        self.max_safe_prime_attempts
            .unwrap_or_else(|| self.q_bits.saturating_mul(64).max(4096))
    }

    /// Run the safe-prime search, then the generator search.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DomainParameters> {
        if self.q_bits < MIN_PRIME_BITS {
            return Err(PrimeGenError::InvalidBitWidth {
                min: MIN_PRIME_BITS,
                got: self.q_bits,
            });
        }

        let (p, q) = self.search_safe_prime(rng)?;
        let g = self.search_generator(&p, &q)?;
        info!("domain parameters ready: p has {} bits, g = {g}", p.bits());
        Ok(DomainParameters { p, q, g })
    }

    /// Draw fresh `q` until `2q + 1` is also prime.
    fn search_safe_prime<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(BigUint, BigUint)> {
        let budget = self.safe_prime_budget();
        for attempt in 1..=budget {
            let q = self.primes.generate(self.q_bits, rng)?;
            let p = (&q << 1usize) + BigUint::one();
            if self.tester().is_probably_prime(&p, rng) {
                debug!("safe prime found after {attempt} attempts");
                return Ok((p, q));
            }
        }

        Err(PrimeGenError::Exhausted {
            stage: SearchStage::SafePrime,
            attempts: budget,
        })
    }

    /// Smallest `g >= 2` with `g^q mod p != 1`.
    fn search_generator(&self, p: &BigUint, q: &BigUint) -> Result<BigUint> {
        let mut g = BigUint::from(2u32);
        let limit = BigUint::from(self.max_generator);
        let mut tried = 0u64;
        while g < *p && g <= limit {
            tried += 1;
            if !mod_pow(&g, q, p).is_one() {
                return Ok(g);
            }
            g += 1u32;
        }

        Err(PrimeGenError::Exhausted {
            stage: SearchStage::Generator,
            attempts: tried,
        })
    }
}
