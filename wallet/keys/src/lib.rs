//!
//! # Ethhd Wallet Keys
//!
//! BIP44 hierarchical deterministic wallet for Ethereum. A wallet is
//! initialized once from a seed and then hands out addresses and their
//! private keys along `m/44'/60'/<account>'/<chain>/<address_index>'`.
//!

pub mod config;
pub mod error;
pub mod prelude;
pub mod result;
pub mod wallet;
