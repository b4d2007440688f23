//! Arithmetic over the secp256k1 scalar group.

use crate::{PrivateKeyBytes, KEY_SIZE};
use secp256k1::{constants::CURVE_ORDER, PublicKey, Scalar, SecretKey, SECP256K1};

/// Validation and tweak helpers for scalars of the secp256k1 group.
///
/// All checks interpret 32-byte arrays as big-endian unsigned integers, so
/// lexicographic comparison against [`ScalarField::ORDER`] is numeric
/// comparison.
pub struct ScalarField;

impl ScalarField {
    /// Group order `n`.
    pub const ORDER: [u8; KEY_SIZE] = CURVE_ORDER;

    /// `true` when `bytes` encodes an integer in `1..n`.
    pub fn is_valid(bytes: &PrivateKeyBytes) -> bool {
        *bytes != [0u8; KEY_SIZE] && *bytes < Self::ORDER
    }

    /// Interpret `bytes` as a private scalar, `None` when it is out of range.
    pub fn secret_key(bytes: &PrivateKeyBytes) -> Option<SecretKey> {
        if !Self::is_valid(bytes) {
            return None;
        }
        SecretKey::from_slice(bytes).ok()
    }

    /// `(tweak + key) mod n`.
    ///
    /// `None` when `tweak >= n` or the sum is zero.
    pub fn tweak_add(key: &SecretKey, tweak: &PrivateKeyBytes) -> Option<SecretKey> {
        let tweak = Scalar::from_be_bytes(*tweak).ok()?;
        key.add_tweak(&tweak).ok()
    }

    /// `point + tweak * G`.
    ///
    /// `None` when `tweak >= n` or the sum is the point at infinity.
    pub fn tweak_add_point(point: &PublicKey, tweak: &PrivateKeyBytes) -> Option<PublicKey> {
        let tweak = Scalar::from_be_bytes(*tweak).ok()?;
        point.add_exp_tweak(SECP256K1, &tweak).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarField;
    use secp256k1::{PublicKey, SecretKey, SECP256K1};

    fn order_minus(k: u8) -> [u8; 32] {
        let mut bytes = ScalarField::ORDER;
        // low byte of n is 0x41, so small subtractions never borrow
        bytes[31] -= k;
        bytes
    }

    #[test]
    fn validity_bounds() {
        let mut one = [0u8; 32];
        one[31] = 1;

        assert!(!ScalarField::is_valid(&[0u8; 32]));
        assert!(ScalarField::is_valid(&one));
        assert!(ScalarField::is_valid(&order_minus(1)));
        assert!(!ScalarField::is_valid(&ScalarField::ORDER));
        assert!(!ScalarField::is_valid(&[0xff; 32]));

        assert!(ScalarField::secret_key(&order_minus(1)).is_some());
        assert!(ScalarField::secret_key(&ScalarField::ORDER).is_none());
        assert!(ScalarField::secret_key(&[0u8; 32]).is_none());
    }

    #[test]
    fn tweak_add_wraps_and_rejects() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let mut two = [0u8; 32];
        two[31] = 2;

        // (n - 1) + 2 = 1 mod n
        let key = SecretKey::from_slice(&order_minus(1)).unwrap();
        let sum = ScalarField::tweak_add(&key, &two).unwrap();
        assert_eq!(sum.secret_bytes(), one);

        // (n - 1) + 1 = 0 mod n
        assert!(ScalarField::tweak_add(&key, &one).is_none());

        // tweak out of range
        assert!(ScalarField::tweak_add(&key, &ScalarField::ORDER).is_none());
    }

    #[test]
    fn tweak_add_point_matches_scalar_addition() {
        let mut three = [0u8; 32];
        three[31] = 3;
        let mut five = [0u8; 32];
        five[31] = 5;
        let mut eight = [0u8; 32];
        eight[31] = 8;

        let key = SecretKey::from_slice(&five).unwrap();
        let point = PublicKey::from_secret_key(SECP256K1, &key);
        let sum = ScalarField::tweak_add_point(&point, &three).unwrap();
        let expected = PublicKey::from_secret_key(SECP256K1, &SecretKey::from_slice(&eight).unwrap());
        assert_eq!(sum, expected);

        // P + (n - 5) * G is the identity
        assert!(ScalarField::tweak_add_point(&point, &order_minus(5)).is_none());
        assert!(ScalarField::tweak_add_point(&point, &ScalarField::ORDER).is_none());
    }
}
