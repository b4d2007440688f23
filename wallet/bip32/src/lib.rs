//!
//! BIP32 hierarchical deterministic key tree over secp256k1.
//!
//! A root [`ExtendedPrivateKey`] is produced from a seed and children are
//! derived one [`ChildNumber`] at a time, either hardened (mixing in the
//! parent's private scalar) or normal (mixing in the parent's public point).
//!

pub use secp256k1;
pub use secp256k1::{PublicKey as Secp256k1PublicKey, SecretKey};

mod address_type;
mod attrs;
mod child_number;
mod derivation_path;
mod error;
mod private_key;
mod public_key;
mod result;
mod scalar;
pub mod types;
mod xprivate_key;
mod xpublic_key;

pub use address_type::AddressType;
pub use attrs::ExtendedKeyAttrs;
pub use child_number::ChildNumber;
pub use derivation_path::DerivationPath;
pub use error::{DerivationFailure, Error};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use result::Result;
pub use scalar::ScalarField;
pub use types::*;
pub use xprivate_key::ExtendedPrivateKey;
pub use xpublic_key::ExtendedPublicKey;
