use crate::{Address, AddressError, ADDRESS_SIZE};
use sha3::{Digest, Keccak256};

const HEX_LEN: usize = ADDRESS_SIZE * 2;

// Mixed-case checksum encoding
// https://eips.ethereum.org/EIPS/eip-55
fn checksum_case(lower: &str) -> String {
    let hash = Keccak256::digest(lower.as_bytes());
    lower
        .char_indices()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
            if nibble >= 8 { c.to_ascii_uppercase() } else { c }
        })
        .collect()
}

impl Address {
    pub(crate) fn encode_checksummed(&self) -> String {
        checksum_case(&faster_hex::hex_string(&self.0))
    }

    pub(crate) fn decode_checksummed(hex: &str) -> Result<Self, AddressError> {
        if hex.len() != HEX_LEN {
            return Err(AddressError::InvalidLength(hex.len()));
        }

        let mut payload = [0u8; ADDRESS_SIZE];
        faster_hex::hex_decode(hex.as_bytes(), &mut payload).map_err(|_| AddressError::InvalidHex)?;
        let address = Address(payload);

        // all-lowercase and all-uppercase forms carry no checksum
        let has_lower = hex.bytes().any(|c| c.is_ascii_lowercase());
        let has_upper = hex.bytes().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.encode_checksummed() != hex {
            return Err(AddressError::BadChecksum);
        }

        Ok(address)
    }
}
