//! Trait for deriving child keys on a given type.

use crate::{Error, PrivateKeyBytes, PublicKey, Result, ScalarField};

/// Trait for key types which can be derived using BIP32.
pub trait PrivateKey: Sized {
    /// Public key type which corresponds to this private key.
    type PublicKey: PublicKey;

    /// Initialize this key from bytes.
    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self>;

    /// Serialize this key as bytes.
    fn to_bytes(&self) -> PrivateKeyBytes;

    /// Derive a child key from a parent key and the left half of the
    /// derivation digest (`Il`).
    ///
    /// Returns `None` when `Il` or the resulting scalar is out of range.
    fn derive_child(&self, other: PrivateKeyBytes) -> Option<Self>;

    /// Get the [`Self::PublicKey`] that corresponds to this private key.
    fn public_key(&self) -> Self::PublicKey;
}

impl PrivateKey for secp256k1::SecretKey {
    type PublicKey = secp256k1::PublicKey;

    fn from_bytes(bytes: &PrivateKeyBytes) -> Result<Self> {
        ScalarField::secret_key(bytes).ok_or(Error::InternalDerivationFailure(secp256k1::Error::InvalidSecretKey.into()))
    }

    fn to_bytes(&self) -> PrivateKeyBytes {
        self.secret_bytes()
    }

    fn derive_child(&self, other: PrivateKeyBytes) -> Option<Self> {
        ScalarField::tweak_add(self, &other)
    }

    fn public_key(&self) -> Self::PublicKey {
        secp256k1::PublicKey::from_secret_key_global(self)
    }
}
