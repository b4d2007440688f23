//!
//! Wallet path configuration.
//!

use ethhd_bip32::{ChildNumber, DerivationPath};
use serde::{Deserialize, Serialize};

/// BIP44 purpose level.
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 registered coin type for Ethereum.
pub const ETHEREUM_COIN_TYPE: u32 = 60;

/// Hardened levels every wallet derives once at initialization:
/// `m/<purpose>'/<coin_type>'`. Missing fields deserialize to the
/// Ethereum defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathConfig {
    pub purpose: u32,
    pub coin_type: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self { purpose: BIP44_PURPOSE, coin_type: ETHEREUM_COIN_TYPE }
    }
}

impl PathConfig {
    /// Path from the master key to the retained wallet root. Both levels are
    /// offset by the hardened flag with `u32` wrap-around.
    pub fn root_path(&self) -> DerivationPath {
        [ChildNumber::hardened_offset(self.purpose), ChildNumber::hardened_offset(self.coin_type)].into_iter().collect()
    }
}
