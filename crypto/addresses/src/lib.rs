//!
//! Ethereum-style account addresses: the low 20 bytes of the Keccak-256
//! digest of an uncompressed secp256k1 public point.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

mod checksum;

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Textual prefix of an address.
pub const PREFIX: &str = "0x";

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Prefix `0x` is missing")]
    MissingPrefix,

    #[error("Invalid hex length {0}")]
    InvalidLength(usize),

    #[error("Invalid hex character")]
    InvalidHex,

    #[error("Checksum is invalid")]
    BadChecksum,
}

/// 20-byte account address that serializes to and from its EIP-55 form:
/// `0xD43E2870777916Ede1f5Cc43F14f8C0741e11f96`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// Derive the address of `public_key`: Keccak-256 over the 64-byte
    /// `x || y` encoding, keeping the last 20 bytes.
    pub fn from_public_key(public_key: &secp256k1::PublicKey) -> Self {
        let uncompressed = public_key.serialize_uncompressed();
        let digest = Keccak256::digest(&uncompressed[1..]);

        let mut payload = [0u8; ADDRESS_SIZE];
        payload.copy_from_slice(&digest[digest.len() - ADDRESS_SIZE..]);
        Address(payload)
    }

    pub fn from_payload(payload: [u8; ADDRESS_SIZE]) -> Self {
        Address(payload)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}{}", self.encode_checksummed())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.strip_prefix(PREFIX) {
            Some(hex) => Self::decode_checksummed(hex),
            None => Err(AddressError::MissingPrefix),
        }
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(AddressVisitor)
    }
}

struct AddressVisitor;

impl serde::de::Visitor<'_> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "a 0x-prefixed hex address")
    }

    fn visit_str<E>(self, str: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Address::from_str(str).map_err(|_| serde::de::Error::invalid_value(serde::de::Unexpected::Str(str), &self))
    }
}
