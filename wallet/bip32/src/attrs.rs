use crate::{ChainCode, ChildNumber, Depth, KeyFingerprint};
use zeroize::Zeroize;

/// Extended key attributes: fields common to extended keys including depth,
/// fingerprints, child numbers, and chain codes.
#[derive(Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy.
    pub depth: Depth,

    /// Parent fingerprint.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number.
    pub child_number: ChildNumber,

    /// Chain code.
    pub chain_code: ChainCode,
}

impl Drop for ExtendedKeyAttrs {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}
