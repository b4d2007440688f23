use hmac::Hmac;
use sha2::Sha512;

/// Size of a private scalar or the x-coordinate of a public point.
pub const KEY_SIZE: usize = 32;

/// Accepted seed lengths in bytes (BIP32: 128 to 512 bits).
pub const MIN_SEED_SIZE: usize = 16;
pub const MAX_SEED_SIZE: usize = 64;

/// Chain code: extension for both private and public keys which provides an
/// additional 256-bits of entropy.
pub type ChainCode = [u8; KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// BIP32 key fingerprints.
pub type KeyFingerprint = [u8; 4];

/// Bytes which represent a private key.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Bytes which represent a SEC1-compressed public key.
pub type PublicKeyBytes = [u8; KEY_SIZE + 1];

/// Uncompressed public point without the SEC1 tag (x || y).
pub type PublicKeyPayload = [u8; KEY_SIZE * 2];

/// HMAC with SHA-512
pub type HmacSha512 = Hmac<Sha512>;
