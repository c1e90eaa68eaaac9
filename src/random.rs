//! Uniform sampling over big-integer ranges and random source plumbing.
//!
//! Callers own the random source and pass it in by `&mut`, so its state
//! advances across calls instead of being reseeded each time.

use std::sync::{Arc, Mutex, PoisonError};

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};

use crate::error::{PrimeGenError, Result};

/// Sample a value uniformly from the inclusive range `[low, high]`.
///
/// Uses rejection sampling, so range widths that are not a power of two
/// carry no modulo bias.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, low: &BigUint, high: &BigUint) -> Result<BigUint> {
    if low > high {
        return Err(PrimeGenError::EmptyRange {
            low: low.clone(),
            high: high.clone(),
        });
    }
    if low == high {
        return Ok(low.clone());
    }
    let high_exclusive = high + BigUint::one();
    Ok(rng.gen_biguint_range(low, &high_exclusive))
}

/// Sample a uniformly random value of exactly `bits` bits (top bit forced).
pub fn random_bits<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> Result<BigUint> {
    if bits == 0 {
        return Err(PrimeGenError::InvalidBitWidth { min: 1, got: 0 });
    }
    let mut n = rng.gen_biguint(bits);
    n.set_bit(bits - 1, true);
    Ok(n)
}

/// Deterministic source for reproducible runs.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A cloneable handle that serializes access to one random source.
///
/// Clones share the same underlying generator, so draws from different
/// threads never replay the same state.
#[derive(Debug)]
pub struct SharedRng<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> SharedRng<R> {
    /// Wrap `rng` so clones draw from the same state.
    pub fn new(rng: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        // Poisoning leaves the generator state intact.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<R> Clone for SharedRng<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RngCore> RngCore for SharedRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.with(|rng| rng.next_u32())
    }

    fn next_u64(&mut self) -> u64 {
        self.with(|rng| rng.next_u64())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.with(|rng| rng.fill_bytes(dest))
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.with(|rng| rng.try_fill_bytes(dest))
    }
}

impl<R: RngCore + CryptoRng> CryptoRng for SharedRng<R> {}
