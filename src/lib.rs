//! Probable-prime and safe-prime domain parameter generation.
//!
//! The building blocks, leaf first:
//!
//! - [`mod_pow`]: right-to-left binary modular exponentiation
//! - [`random_range`]: unbiased sampling from an inclusive `BigUint` range
//! - [`MillerRabin`]: small-prime filter followed by random-witness rounds
//! - [`PrimeGenerator`]: random probable primes of a chosen bit width
//! - [`DomainParameterGenerator`]: `(p, q, g)` with `p = 2q + 1`
//!
//! Every operation takes the random source explicitly, so one generator can
//! be seeded once and reused, or swapped for a deterministic one in tests.
//!
//! ```rust
//! use safe_prime_params::{DomainParameterGenerator, seeded_rng};
//!
//! let mut rng = seeded_rng(7);
//! let generator = DomainParameterGenerator::new(32);
//! let params = generator.generate(&mut rng)?;
//! assert!(params.verify(generator.tester(), &mut rng));
//! # Ok::<(), safe_prime_params::PrimeGenError>(())
//! ```

pub mod error;
pub mod modexp;
pub mod params;
pub mod primality;
pub mod prime;
pub mod random;

pub use error::{PrimeGenError, Result, SearchStage};
pub use modexp::mod_pow;
pub use params::{DEFAULT_Q_BITS, DomainParameterGenerator, DomainParameters};
pub use primality::{MillerRabin, Primality, Rounds, SMALL_PRIMES};
pub use prime::{PrimeGenerator, SearchStrategy};
pub use random::{SharedRng, random_bits, random_range, seeded_rng};
