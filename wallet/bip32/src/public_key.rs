//! Trait for deriving child keys on a given type.

use crate::{KeyFingerprint, PrivateKeyBytes, PublicKeyBytes, PublicKeyPayload, Result, ScalarField, KEY_SIZE};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Trait for key types which can be derived using BIP32.
pub trait PublicKey: Sized {
    /// Initialize this key from SEC1-compressed bytes.
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self>;

    /// Serialize this key as SEC1-compressed bytes.
    fn to_bytes(&self) -> PublicKeyBytes;

    /// Serialize this key as the uncompressed `x || y` coordinates, without
    /// the SEC1 tag byte.
    fn to_uncompressed_payload(&self) -> PublicKeyPayload;

    /// Derive a child key from a parent key and the left half of the
    /// derivation digest (`Il`).
    ///
    /// Returns `None` when `Il` is out of range or the result is the point
    /// at infinity.
    fn derive_child(&self, other: PrivateKeyBytes) -> Option<Self>;

    /// Compute a 4-byte key fingerprint for this public key.
    ///
    /// Default implementation uses `RIPEMD160(SHA256(public_key))`.
    fn fingerprint(&self) -> KeyFingerprint {
        let digest = Ripemd160::digest(Sha256::digest(self.to_bytes()));
        let mut fingerprint = KeyFingerprint::default();
        fingerprint.copy_from_slice(&digest[..4]);
        fingerprint
    }
}

impl PublicKey for secp256k1::PublicKey {
    fn from_bytes(bytes: PublicKeyBytes) -> Result<Self> {
        Ok(secp256k1::PublicKey::from_slice(&bytes)?)
    }

    fn to_bytes(&self) -> PublicKeyBytes {
        self.serialize()
    }

    fn to_uncompressed_payload(&self) -> PublicKeyPayload {
        let mut payload = [0u8; KEY_SIZE * 2];
        payload.copy_from_slice(&self.serialize_uncompressed()[1..]);
        payload
    }

    fn derive_child(&self, other: PrivateKeyBytes) -> Option<Self> {
        ScalarField::tweak_add_point(self, &other)
    }
}
