//! Error type.

use crate::{ChildNumber, MAX_SEED_SIZE, MIN_SEED_SIZE};
use thiserror::Error;

/// Failures of the primitives underneath a derivation step. These do not
/// occur for well-formed inputs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationFailure {
    #[error("Hmac -> {0}")]
    Hmac(#[from] hmac::digest::InvalidLength),

    #[error("Secp256k1 -> {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("digest split produced a slice of unexpected length")]
    Decode,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("seed length {0} is outside of {min}..={max} bytes", min = MIN_SEED_SIZE, max = MAX_SEED_SIZE)]
    InvalidSeedLength(usize),

    #[error("seed produces an unusable master key")]
    UnusableSeed,

    #[error("child {0} produces an invalid key")]
    InvalidChildKey(ChildNumber),

    #[error("internal derivation failure -> {0}")]
    InternalDerivationFailure(#[from] DerivationFailure),

    #[error("maximum derivation depth exceeded")]
    Depth,

    #[error("invalid child number {0}")]
    ChildNumber(u32),

    #[error("hardened child {0} cannot be derived from a public key")]
    HardenedPublicDerivation(ChildNumber),

    #[error("invalid derivation path -> {0}")]
    DerivationPath(String),
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(err: hmac::digest::InvalidLength) -> Error {
        Error::InternalDerivationFailure(err.into())
    }
}

impl From<secp256k1::Error> for Error {
    fn from(err: secp256k1::Error) -> Error {
        Error::InternalDerivationFailure(err.into())
    }
}

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Error {
        Error::InternalDerivationFailure(DerivationFailure::Decode)
    }
}
