//! Miller-Rabin probabilistic primality testing.
//!
//! A `Composite` verdict is always correct. A `ProbablyPrime` verdict can be
//! wrong for a composite input with probability at most `4^-k`, where `k` is
//! the number of witness rounds. With the default round count (one round per
//! bit of the input) that bound is far below any practical concern, but it is
//! never zero.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

use crate::modexp::mod_pow;
use crate::random::random_range;

/// Every prime below 1000, ascending.
pub const SMALL_PRIMES: [u32; 168] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53,
    59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131,
    137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223,
    227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307, 311,
    313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409,
    419, 421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503,
    509, 521, 523, 541, 547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613,
    617, 619, 631, 641, 643, 647, 653, 659, 661, 673, 677, 683, 691, 701, 709, 719,
    727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797, 809, 811, 821, 823, 827,
    829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929, 937, 941,
    947, 953, 967, 971, 977, 983, 991, 997,
];

/// Outcome of a primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Survived every round; see the module docs for the residual error.
    ProbablyPrime,
    Composite,
}

impl Primality {
    /// `true` for `ProbablyPrime`.
    pub fn is_probably_prime(self) -> bool {
        self == Primality::ProbablyPrime
    }
}

/// How many witness rounds to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounds {
    /// `floor(log2(n))` rounds, scaling with the size of the input.
    #[default]
    BitLength,
    /// A fixed count, clamped to at least one.
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MillerRabin {
    rounds: Rounds,
}

impl MillerRabin {
    /// Tester running the given number of witness rounds.
    pub fn new(rounds: Rounds) -> Self {
        Self { rounds }
    }

    /// The configured round policy.
    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// Number of witness rounds used for `n`.
    pub fn rounds_for(&self, n: &BigUint) -> usize {
        match self.rounds {
            Rounds::BitLength => n.bits().saturating_sub(1) as usize,
            Rounds::Fixed(k) => k.max(1),
        }
    }

    /// Shorthand for `test(n, rng).is_probably_prime()`.
    pub fn is_probably_prime<R: Rng + ?Sized>(&self, n: &BigUint, rng: &mut R) -> bool {
        self.test(n, rng).is_probably_prime()
    }

    /// Classify `n`, drawing witnesses from `rng`.
    pub fn test<R: Rng + ?Sized>(&self, n: &BigUint, rng: &mut R) -> Primality {
        if let Some(verdict) = small_prime_verdict(n) {
            return verdict;
        }

        let two = BigUint::from(2u32);
        let three = BigUint::from(3u32);
        if *n == two || *n == three {
            return Primality::ProbablyPrime;
        }
        if *n <= BigUint::one() || n.is_even() {
            return Primality::Composite;
        }

        let one = BigUint::one();
        let n_minus_one = n - &one;
        let n_minus_two = n - &two;
        let (s, d) = factor_out_twos(&n_minus_one);

        'witness: for _ in 0..self.rounds_for(n) {
            let a = random_range(rng, &two, &n_minus_two)
                .expect("n passed the small-prime table, so [2, n - 2] is non-empty");
            let mut x = mod_pow(&a, &d, n);

            if x == one || x == n_minus_one {
                continue 'witness;
            }

            for _ in 1..s {
                x = (&x * &x) % n;
                if x == one {
                    return Primality::Composite;
                }
                if x == n_minus_one {
                    continue 'witness;
                }
            }

            return Primality::Composite;
        }

        Primality::ProbablyPrime
    }
}

/// Trial division against `SMALL_PRIMES`; `None` when the table is inconclusive.
fn small_prime_verdict(n: &BigUint) -> Option<Primality> {
    if let Some(small) = n.to_u32() {
        if SMALL_PRIMES.binary_search(&small).is_ok() {
            return Some(Primality::ProbablyPrime);
        }
    }
    for &p in SMALL_PRIMES.iter() {
        if (n % p).is_zero() {
            return Some(Primality::Composite);
        }
    }
    None
}

/// Express n as d * 2^s with d odd, returning (s, d).
fn factor_out_twos(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0u64;
    let mut d = n.clone();
    while !d.is_zero() && d.is_even() {
        d >>= 1;
        s += 1;
    }
    (s, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    fn first_primes(count: usize) -> Vec<u64> {
        let limit = 10_000usize;
        let mut sieve = vec![true; limit];
        sieve[0] = false;
        sieve[1] = false;
        let mut i = 2;
        while i * i < limit {
            if sieve[i] {
                let mut j = i * i;
                while j < limit {
                    sieve[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        sieve
            .iter()
            .enumerate()
            .filter(|(_, is_prime)| **is_prime)
            .map(|(n, _)| n as u64)
            .take(count)
            .collect()
    }

    fn verdict(n: u64) -> Primality {
        MillerRabin::default().test(&BigUint::from(n), &mut seeded_rng(n))
    }

    #[test]
    fn test_small_prime_table_is_sorted_primes() {
        let reference = first_primes(168);
        let table: Vec<u64> = SMALL_PRIMES.iter().map(|&p| p as u64).collect();
        assert_eq!(table, reference);
        assert_eq!(*SMALL_PRIMES.last().unwrap(), 997);
    }

    #[test]
    fn test_first_thousand_primes() {
        let primes = first_primes(1000);
        assert_eq!(primes.len(), 1000);
        assert_eq!(primes[999], 7919);
        for p in primes {
            assert_eq!(verdict(p), Primality::ProbablyPrime, "{p} should be prime");
        }
    }

    #[test]
    fn test_composites_below_ten_thousand() {
        let primes = first_primes(1229);
        for n in 0u64..10_000 {
            let expected = if primes.binary_search(&n).is_ok() {
                Primality::ProbablyPrime
            } else {
                Primality::Composite
            };
            assert_eq!(verdict(n), expected, "wrong verdict for {n}");
        }
    }

    #[test]
    fn test_edge_values() {
        assert_eq!(verdict(0), Primality::Composite);
        assert_eq!(verdict(1), Primality::Composite);
        assert_eq!(verdict(2), Primality::ProbablyPrime);
        assert_eq!(verdict(3), Primality::ProbablyPrime);
        assert_eq!(verdict(4), Primality::Composite);
    }

    #[test]
    fn test_carmichael_numbers() {
        for n in [561u64, 1105, 1729, 2465, 2821, 6601, 8911] {
            assert_eq!(verdict(n), Primality::Composite, "{n} is a Carmichael number");
        }
        // 1171 * 2341 * 3511, no factor in the small-prime table.
        assert_eq!(verdict(9_624_742_921), Primality::Composite);
    }

    #[test]
    fn test_values_just_past_the_table_use_witness_rounds() {
        // Smallest primes above 997 and their product: nothing in the table divides them.
        assert_eq!(verdict(1009), Primality::ProbablyPrime);
        assert_eq!(verdict(1013), Primality::ProbablyPrime);
        assert_eq!(verdict(1009 * 1013), Primality::Composite);
        assert_eq!(verdict(1009 * 1009), Primality::Composite);
    }

    #[test]
    fn test_strong_pseudoprime_base_two() {
        // Passes a single base-2 round but has the factor 151.
        assert_eq!(verdict(3_215_031_751), Primality::Composite);
        // 2^32 + 1 = 641 * 6700417
        assert_eq!(verdict(4_294_967_297), Primality::Composite);
    }

    #[test]
    fn test_large_values() {
        let mut rng = seeded_rng(11);
        let mr = MillerRabin::default();
        let m127 = (BigUint::one() << 127u32) - BigUint::one();
        let m521 = (BigUint::one() << 521u32) - BigUint::one();
        assert!(mr.is_probably_prime(&m127, &mut rng));
        assert!(mr.is_probably_prime(&m521, &mut rng));

        let semiprime = &m127 * &m127;
        assert!(!mr.is_probably_prime(&semiprime, &mut rng));
        assert!(!mr.is_probably_prime(&(&m521 + 2u32), &mut rng));
    }

    #[test]
    fn test_round_counts() {
        let n = BigUint::from(1_000_003u32);
        assert_eq!(MillerRabin::default().rounds_for(&n), 19);
        assert_eq!(MillerRabin::new(Rounds::Fixed(5)).rounds_for(&n), 5);
        assert_eq!(MillerRabin::new(Rounds::Fixed(0)).rounds_for(&n), 1);
    }

    #[test]
    fn test_factor_out_twos() {
        let (s, d) = factor_out_twos(&BigUint::from(96u32));
        assert_eq!(s, 5);
        assert_eq!(d, BigUint::from(3u32));
    }
}
