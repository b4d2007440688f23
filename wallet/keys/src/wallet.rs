//!
//! BIP44 wallet rooted at `m/<purpose>'/<coin_type>'`.
//!

use crate::config::PathConfig;
use crate::result::Result;
use ethhd_addresses::{Address, ADDRESS_SIZE};
use ethhd_bip32::{AddressType, ChildNumber, DerivationPath, ExtendedKeyAttrs, ExtendedPrivateKey, PrivateKey, SecretKey};
use faster_hex::hex_string;
use log::{debug, trace};
use std::fmt::{self, Debug};
use std::ops::Range;
use zeroize::Zeroizing;

/// Hierarchical deterministic wallet.
///
/// The master key and the purpose/coin-type levels are derived once in
/// [`HdWallet::init`]. Every later call derives from that retained root
/// without mutating it, so a wallet can be shared freely between threads.
#[derive(Clone)]
pub struct HdWallet {
    root: ExtendedPrivateKey<SecretKey>,
    config: PathConfig,
}

impl HdWallet {
    /// Create a wallet for the default Ethereum path `m/44'/60'`.
    ///
    /// The seed must be 16 to 64 bytes long.
    pub fn init<S>(seed: S) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        Self::with_config(seed, &PathConfig::default())
    }

    pub fn with_config<S>(seed: S, config: &PathConfig) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let root_path = config.root_path();
        let master = ExtendedPrivateKey::<SecretKey>::new(seed)?;
        let root = master.derive_path(&root_path)?;
        debug!("wallet initialized at {root_path} (fingerprint {})", hex_string(&root.fingerprint()));
        Ok(Self { root, config: config.clone() })
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Attributes of the retained `m/<purpose>'/<coin_type>'` key.
    pub fn root_attrs(&self) -> &ExtendedKeyAttrs {
        self.root.attrs()
    }

    /// Full path of the key at `(account, flag, address_index)`:
    /// `m/<purpose>'/<coin_type>'/<account>'/<flag & 1>/<address_index>'`.
    pub fn derivation_path(&self, account: u32, flag: u8, address_index: u32) -> DerivationPath {
        let mut path = self.config.root_path();
        path.extend(Self::relative_path(account, AddressType::from_flag(flag), address_index));
        path
    }

    /// Derive the address and private key at `(account, flag, address_index)`.
    ///
    /// Only the low bit of `flag` selects the chain: even values are
    /// external addresses, odd values change addresses. `account` and
    /// `address_index` are offset by the hardened flag in wrapping `u32`
    /// arithmetic, so values at or above 2^31 select normal children
    /// `value - 2^31`.
    pub fn address(&self, account: u32, flag: u8, address_index: u32) -> Result<DerivedAddress> {
        let address_type = AddressType::from_flag(flag);
        let relative = Self::relative_path(account, address_type, address_index);
        let leaf = self.root.derive_path(&relative)?;

        let private_key = *leaf.private_key();
        let address = Address::from_public_key(&PrivateKey::public_key(&private_key));

        let mut path = self.config.root_path();
        path.extend(relative);
        trace!("derived {address_type} address {address} at {path}");

        Ok(DerivedAddress { address, private_key, path })
    }

    /// Derive consecutive addresses of one account and chain. Each entry
    /// is walked from the retained root like a single [`HdWallet::address`] call.
    pub fn addresses(&self, account: u32, flag: u8, indexes: Range<u32>) -> Result<Vec<DerivedAddress>> {
        indexes.map(|index| self.address(account, flag, index)).collect()
    }

    fn relative_path(account: u32, address_type: AddressType, address_index: u32) -> DerivationPath {
        [ChildNumber::hardened_offset(account), address_type.child_number(), ChildNumber::hardened_offset(address_index)]
            .into_iter()
            .collect()
    }
}

impl Debug for HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdWallet").field("config", &self.config).field("root", &self.root).finish()
    }
}

/// Address together with the private key that controls it.
#[derive(Clone)]
pub struct DerivedAddress {
    address: Address,
    private_key: SecretKey,
    path: DerivationPath,
}

impl DerivedAddress {
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn address_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.address.to_bytes()
    }

    /// Raw 32-byte private key, cleared from memory when dropped.
    pub fn private_key_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.private_key.secret_bytes())
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.private_key
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }
}

impl Debug for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedAddress")
            .field("address", &self.address)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for DerivedAddress {
    fn drop(&mut self) {
        self.private_key.non_secure_erase();
    }
}
