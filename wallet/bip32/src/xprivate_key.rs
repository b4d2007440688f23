use hmac::Mac;
use log::trace;
use std::fmt::{self, Debug};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    types::*, ChildNumber, DerivationPath, Error, ExtendedKeyAttrs, ExtendedPublicKey, PrivateKey, PublicKey, Result, ScalarField,
};

/// Derivation domain separator for BIP32 master keys ("Bitcoin seed").
const BIP32_DOMAIN_SEPARATOR: [u8; 12] = [0x42, 0x69, 0x74, 0x63, 0x6f, 0x69, 0x6e, 0x20, 0x73, 0x65, 0x65, 0x64];

/// Extended private keys derived using BIP32.
///
/// Generic around a [`PrivateKey`] type.
#[derive(Clone)]
pub struct ExtendedPrivateKey<K: PrivateKey> {
    /// Derived private key
    private_key: K,

    /// Extended key attributes.
    attrs: ExtendedKeyAttrs,
}

impl<K> ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    /// Maximum derivation depth.
    pub const MAX_DEPTH: Depth = u8::MAX;

    /// Create the root extended key for the given seed value.
    pub fn new<S>(seed: S) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let seed = seed.as_ref();
        if !(MIN_SEED_SIZE..=MAX_SEED_SIZE).contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let mut hmac = HmacSha512::new_from_slice(&BIP32_DOMAIN_SEPARATOR)?;
        hmac.update(seed);

        let mut result = hmac.finalize().into_bytes();
        let (secret_key, chain_code) = result.split_at(KEY_SIZE);
        let secret_key: Zeroizing<PrivateKeyBytes> = Zeroizing::new(secret_key.try_into()?);
        let chain_code: ChainCode = chain_code.try_into()?;
        result.as_mut_slice().zeroize();

        Self::master_from_digest(&secret_key, chain_code)
    }

    /// Build the master key from the two halves of the seed digest.
    fn master_from_digest(secret_key: &PrivateKeyBytes, chain_code: ChainCode) -> Result<Self> {
        if !ScalarField::is_valid(secret_key) {
            return Err(Error::UnusableSeed);
        }

        let private_key = K::from_bytes(secret_key)?;
        let attrs = ExtendedKeyAttrs {
            depth: 0,
            parent_fingerprint: KeyFingerprint::default(),
            child_number: ChildNumber::default(),
            chain_code,
        };

        Ok(ExtendedPrivateKey { private_key, attrs })
    }

    /// Derive a child key for a particular [`ChildNumber`].
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        if child_number.is_hardened() {
            let mut secret = self.private_key.to_bytes();
            hmac.update(&[0]);
            hmac.update(&secret);
            secret.zeroize();
        } else {
            hmac.update(&self.private_key.public_key().to_bytes());
        }

        hmac.update(&child_number.to_bytes());

        let mut result = hmac.finalize().into_bytes();
        let (child_key, chain_code) = result.split_at(KEY_SIZE);
        let child_key: Zeroizing<PrivateKeyBytes> = Zeroizing::new(child_key.try_into()?);
        let chain_code: ChainCode = chain_code.try_into()?;
        result.as_mut_slice().zeroize();

        self.child_from_digest(child_number, &child_key, chain_code)
    }

    /// Build the child at `child_number` from the two halves of its
    /// derivation digest.
    fn child_from_digest(&self, child_number: ChildNumber, child_key: &PrivateKeyBytes, chain_code: ChainCode) -> Result<Self> {
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::Depth)?;

        // BIP32 asks to move on to the next index when `Il` or the child key
        // is out of range. Existing wallets were derived without that retry,
        // so the index is reported as invalid instead.
        let private_key = self.private_key.derive_child(*child_key).ok_or(Error::InvalidChildKey(child_number))?;

        let attrs = ExtendedKeyAttrs { parent_fingerprint: self.fingerprint(), child_number, chain_code, depth };

        trace!("derived private child {} at depth {}", child_number, depth);

        Ok(ExtendedPrivateKey { private_key, attrs })
    }

    /// Derive the descendant at `path` by applying [`Self::derive_child`] in
    /// order. An empty path yields a copy of `self`.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self>
    where
        K: Clone,
    {
        path.iter().try_fold(self.clone(), |key, child_num| key.derive_child(child_num))
    }

    /// Borrow the derived private key value.
    pub fn private_key(&self) -> &K {
        &self.private_key
    }

    /// Serialize the derived public key as bytes.
    pub fn public_key(&self) -> ExtendedPublicKey<K::PublicKey> {
        self.into()
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Compute a 4-byte key fingerprint for this extended private key.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.private_key.public_key().fingerprint()
    }

    /// Serialize the raw private key as a byte array.
    pub fn to_bytes(&self) -> Zeroizing<PrivateKeyBytes> {
        Zeroizing::new(self.private_key.to_bytes())
    }
}

impl<K> ConstantTimeEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let key_a = self.to_bytes();
        let key_b = other.to_bytes();

        key_a[..].ct_eq(&key_b[..])
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.attrs.parent_fingerprint[..].ct_eq(&other.attrs.parent_fingerprint[..])
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0)
            & self.attrs.chain_code[..].ct_eq(&other.attrs.chain_code[..])
    }
}

impl<K> Debug for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("private_key", &"...")
            .field("depth", &self.attrs.depth)
            .field("parent_fingerprint", &self.attrs.parent_fingerprint)
            .field("child_number", &self.attrs.child_number)
            .finish_non_exhaustive()
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> Eq for ExtendedPrivateKey<K> where K: PrivateKey {}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<K> PartialEq for ExtendedPrivateKey<K>
where
    K: PrivateKey,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedPrivateKey;
    use crate::{ChildNumber, DerivationPath, Error, ScalarField};
    use faster_hex::hex_string;
    use rand::RngCore;
    use secp256k1::SecretKey;

    type XPrv = ExtendedPrivateKey<SecretKey>;

    macro_rules! hex {
        ($str: literal) => {{
            let len = $str.as_bytes().len() / 2;
            let mut dst = vec![0; len];
            faster_hex::hex_decode($str.as_bytes(), &mut dst).unwrap();
            dst
        }};
    }

    fn hardened(index: u32) -> ChildNumber {
        ChildNumber::new(index, true).unwrap()
    }

    #[test]
    fn bip32_test_vector_1_master() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let master = XPrv::new(&seed).unwrap();

        assert_eq!(hex_string(&*master.to_bytes()), "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35");
        assert_eq!(hex_string(&master.attrs().chain_code), "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508");
        assert_eq!(master.attrs().depth, 0);
        assert_eq!(master.attrs().parent_fingerprint, [0u8; 4]);
        assert_eq!(master.attrs().child_number, ChildNumber(0));
        assert_eq!(master.fingerprint(), [0x34, 0x42, 0x19, 0x3e]);
    }

    #[test]
    fn bip32_test_vector_1_children() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let master = XPrv::new(&seed).unwrap();

        let m_0h = master.derive_child(hardened(0)).unwrap();
        assert_eq!(hex_string(&*m_0h.to_bytes()), "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea");
        assert_eq!(hex_string(&m_0h.attrs().chain_code), "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141");
        assert_eq!(m_0h.attrs().depth, 1);
        assert_eq!(m_0h.attrs().parent_fingerprint, master.fingerprint());
        assert_eq!(m_0h.attrs().child_number, hardened(0));

        let m_0h_1 = m_0h.derive_child(ChildNumber(1)).unwrap();
        assert_eq!(hex_string(&*m_0h_1.to_bytes()), "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368");
        assert_eq!(hex_string(&m_0h_1.attrs().chain_code), "2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19");
        assert_eq!(
            hex_string(&m_0h_1.public_key().to_bytes()),
            "03501e454bf00751f24b1b489aa925215d66af2234e3891c3b21a52bedb3cd711c"
        );
        assert_eq!(m_0h_1.attrs().depth, 2);

        let path = "m/0'/1".parse::<DerivationPath>().unwrap();
        assert_eq!(master.derive_path(&path).unwrap(), m_0h_1);
    }

    #[test]
    fn seed_length_boundaries() {
        assert_eq!(XPrv::new([7u8; 15]).unwrap_err(), Error::InvalidSeedLength(15));
        assert_eq!(XPrv::new([7u8; 65]).unwrap_err(), Error::InvalidSeedLength(65));
        assert_eq!(XPrv::new([0u8; 0]).unwrap_err(), Error::InvalidSeedLength(0));

        let short = XPrv::new([7u8; 16]).unwrap();
        assert_eq!(hex_string(&*short.to_bytes()), "68373b150fa8613e287d08567f34a082162b50a58b97c85779688035b92ada3e");
        let long = XPrv::new([7u8; 64]).unwrap();
        assert_eq!(hex_string(&*long.to_bytes()), "ad1d9556b8004dc49511340b642accb9d6bfaae8726f5c424fda613a2b8a09c6");
        assert!(XPrv::new([7u8; 32]).is_ok());
    }

    #[test]
    fn hardened_and_normal_children_differ() {
        let master = XPrv::new([3u8; 64]).unwrap();
        for index in 0..8 {
            let normal = master.derive_child(ChildNumber::new(index, false).unwrap()).unwrap();
            let hardened = master.derive_child(hardened(index)).unwrap();
            assert_ne!(*normal.to_bytes(), *hardened.to_bytes());
            assert_ne!(normal.attrs().chain_code, hardened.attrs().chain_code);
            assert_eq!(normal.attrs().parent_fingerprint, hardened.attrs().parent_fingerprint);
        }
    }

    #[test]
    fn derivation_is_deterministic_and_leaves_parent_untouched() {
        let master = XPrv::new([9u8; 64]).unwrap();
        let snapshot = master.clone();

        let a = master.derive_child(hardened(44)).unwrap();
        let b = master.derive_child(hardened(44)).unwrap();
        assert_eq!(a, b);
        assert_eq!(master, snapshot);
    }

    #[test]
    fn depth_is_bounded() {
        let mut key = XPrv::new([5u8; 32]).unwrap();
        for _ in 0..XPrv::MAX_DEPTH {
            key = key.derive_child(ChildNumber(0)).unwrap();
        }
        assert_eq!(key.attrs().depth, u8::MAX);
        assert_eq!(key.derive_child(ChildNumber(0)).unwrap_err(), Error::Depth);
    }

    #[test]
    fn random_seeds_yield_valid_scalars() {
        let mut rng = rand::thread_rng();
        let mut seed = [0u8; 64];
        for _ in 0..10_000 {
            rng.fill_bytes(&mut seed);
            let master = XPrv::new(seed).unwrap();
            assert!(ScalarField::is_valid(&master.to_bytes()));

            let child = master.derive_child(hardened(rng.next_u32() >> 1)).unwrap();
            assert!(ScalarField::is_valid(&child.to_bytes()));
            let child = child.derive_child(ChildNumber(rng.next_u32() >> 1)).unwrap();
            assert!(ScalarField::is_valid(&child.to_bytes()));
        }
    }

    #[test]
    fn debug_hides_key_material() {
        let master = XPrv::new([1u8; 16]).unwrap();
        let debug = format!("{master:?}");
        assert!(!debug.contains(&hex_string(&*master.to_bytes())));
    }

    /// `n - k` for a key `k`, so that `Il + k = 0 mod n`.
    fn order_minus(key: &[u8; 32]) -> [u8; 32] {
        let mut out = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = ScalarField::ORDER[i] as i16 - key[i] as i16 - borrow;
            borrow = 0;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            }
            out[i] = diff as u8;
        }
        out
    }

    #[test]
    fn out_of_range_master_digest_is_unusable() {
        let chain_code = [0x11u8; 32];
        assert_eq!(XPrv::master_from_digest(&[0u8; 32], chain_code).unwrap_err(), Error::UnusableSeed);
        assert_eq!(XPrv::master_from_digest(&ScalarField::ORDER, chain_code).unwrap_err(), Error::UnusableSeed);
        assert_eq!(XPrv::master_from_digest(&[0xffu8; 32], chain_code).unwrap_err(), Error::UnusableSeed);

        let mut one = [0u8; 32];
        one[31] = 1;
        let master = XPrv::master_from_digest(&one, chain_code).unwrap();
        assert_eq!(*master.to_bytes(), one);
        assert_eq!(master.attrs().depth, 0);
    }

    #[test]
    fn out_of_range_child_digest_is_not_retried() {
        let parent = XPrv::new([0x2au8; 64]).unwrap();
        let chain_code = [0x22u8; 32];

        for child_number in [hardened(7), ChildNumber(7)] {
            let cancelling = order_minus(&parent.to_bytes());
            assert_eq!(
                parent.child_from_digest(child_number, &cancelling, chain_code).unwrap_err(),
                Error::InvalidChildKey(child_number)
            );
            assert_eq!(
                parent.child_from_digest(child_number, &ScalarField::ORDER, chain_code).unwrap_err(),
                Error::InvalidChildKey(child_number)
            );
        }

        // an in-range digest yields exactly the requested child, never a neighbour
        let mut one = [0u8; 32];
        one[31] = 1;
        let child = parent.child_from_digest(hardened(7), &one, chain_code).unwrap();
        assert_eq!(child.attrs().child_number, hardened(7));
        assert_eq!(child.attrs().chain_code, chain_code);
        assert_eq!(child.attrs().parent_fingerprint, parent.fingerprint());
        assert_eq!(child.attrs().depth, 1);
    }
}
