//!
//! Error types used by the wallet.
//!

use ethhd_bip32::Error as BIP32Error;
use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Bip32 -> {0}")]
    Bip32(#[from] BIP32Error),
}
