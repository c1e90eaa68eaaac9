//! Error types for prime and domain parameter generation

use std::fmt;

use num_bigint::BigUint;
use thiserror::Error;

/// The search loop that ran out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Prime,
    SafePrime,
    Generator,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStage::Prime => write!(f, "prime"),
            SearchStage::SafePrime => write!(f, "safe prime"),
            SearchStage::Generator => write!(f, "generator"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimeGenError {
    #[error("bit width must be at least {min}, got {got}")]
    InvalidBitWidth { min: u64, got: u64 },

    #[error("empty range: low bound {low} exceeds high bound {high}")]
    EmptyRange { low: BigUint, high: BigUint },

    #[error("{stage} search gave up after {attempts} attempts")]
    Exhausted { stage: SearchStage, attempts: u64 },
}

pub type Result<T> = std::result::Result<T, PrimeGenError>;
