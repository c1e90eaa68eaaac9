use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Compute `base^exponent mod modulus` with right-to-left binary exponentiation.
///
/// Every intermediate product is a `BigUint`, so squaring a value just below
/// the modulus never overflows before it is reduced.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be non-zero");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exponent = exponent.clone();

    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exponent >>= 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(mod_pow(&big(4), &big(13), &big(497)), big(445));
        assert_eq!(mod_pow(&big(2), &big(10), &big(1000)), big(24));
    }

    #[test]
    fn test_zero_exponent_is_one() {
        for n in 2u64..50 {
            for a in 0u64..20 {
                assert_eq!(mod_pow(&big(a), &BigUint::zero(), &big(n)), BigUint::one());
            }
        }
    }

    #[test]
    fn test_modulus_one() {
        assert_eq!(mod_pow(&big(7), &big(3), &BigUint::one()), BigUint::zero());
    }

    #[test]
    fn test_base_larger_than_modulus() {
        assert_eq!(mod_pow(&big(1003), &big(2), &big(1000)), big(9));
    }

    #[test]
    fn test_matches_builtin_modpow_on_wide_operands() {
        let modulus = (BigUint::one() << 1024u32) - big(105);
        let base = (BigUint::one() << 1000u32) + big(12345);
        let exponent = (BigUint::one() << 512u32) - big(3);
        assert_eq!(
            mod_pow(&base, &exponent, &modulus),
            base.modpow(&exponent, &modulus)
        );
    }

    #[test]
    #[should_panic(expected = "modulus must be non-zero")]
    fn test_zero_modulus_panics() {
        mod_pow(&big(3), &big(3), &BigUint::zero());
    }
}
