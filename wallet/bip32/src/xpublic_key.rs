//! Extended public keys
//!
use crate::{types::*, ChildNumber, DerivationPath, Error, ExtendedKeyAttrs, ExtendedPrivateKey, PrivateKey, PublicKey, Result};
use hmac::Mac;
use log::trace;
use zeroize::Zeroize;

/// Extended public keys derived using BIP32.
///
/// Generic around a [`PublicKey`] type. Only non-hardened children can be
/// derived from an extended public key.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct ExtendedPublicKey<K: PublicKey> {
    /// Derived public key
    pub public_key: K,

    /// Extended key attributes.
    pub attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPublicKey<K>
where
    K: PublicKey,
{
    /// Obtain the non-extended public key value `K`.
    pub fn public_key(&self) -> &K {
        &self.public_key
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Compute a 4-byte key fingerprint for this extended public key.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.public_key().fingerprint()
    }

    /// Derive a child key for a particular [`ChildNumber`].
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        if child_number.is_hardened() {
            return Err(Error::HardenedPublicDerivation(child_number));
        }

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        hmac.update(&self.public_key.to_bytes());
        hmac.update(&child_number.to_bytes());

        let mut result = hmac.finalize().into_bytes();
        let (child_key, chain_code) = result.split_at(KEY_SIZE);
        let child_key: PrivateKeyBytes = child_key.try_into()?;
        let chain_code: ChainCode = chain_code.try_into()?;
        result.as_mut_slice().zeroize();

        self.child_from_digest(child_number, child_key, chain_code)
    }

    /// Public counterpart of the private child construction: `P + Il * G`.
    fn child_from_digest(&self, child_number: ChildNumber, child_key: PrivateKeyBytes, chain_code: ChainCode) -> Result<Self> {
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::Depth)?;
        let public_key = self.public_key.derive_child(child_key).ok_or(Error::InvalidChildKey(child_number))?;

        let attrs = ExtendedKeyAttrs { parent_fingerprint: self.public_key.fingerprint(), child_number, chain_code, depth };

        trace!("derived public child {} at depth {}", child_number, depth);

        Ok(ExtendedPublicKey { public_key, attrs })
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self>
    where
        K: Clone,
    {
        path.iter().try_fold(self.clone(), |key, child_num| key.derive_child(child_num))
    }

    /// Serialize the raw public key as a byte array (e.g. SEC1-encoded).
    pub fn to_bytes(&self) -> PublicKeyBytes {
        self.public_key.to_bytes()
    }
}

impl<K> From<&ExtendedPrivateKey<K>> for ExtendedPublicKey<K::PublicKey>
where
    K: PrivateKey,
{
    fn from(xprv: &ExtendedPrivateKey<K>) -> ExtendedPublicKey<K::PublicKey> {
        ExtendedPublicKey { public_key: xprv.private_key().public_key(), attrs: xprv.attrs().clone() }
    }
}
