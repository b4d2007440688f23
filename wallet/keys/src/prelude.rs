//!
//! Re-exports of the most commonly used types and traits in this crate.
//!

pub use crate::config::*;
pub use crate::wallet::*;
pub use ethhd_addresses::Address;
pub use ethhd_bip32::{AddressType, ChildNumber, DerivationPath};
