//! Named hash functions used by the symmetric-primitive strategies.
//!
//! Strategies look their hashes up by name once, at construction, and hand
//! out fresh instances afterwards. A name that is unknown, or whose backing
//! crate was compiled out, fails with [`Error::AlgorithmNotFound`]; nothing is
//! ever substituted.

use core::fmt;

#[cfg(feature = "aes-ctr")]
use sha2::{Sha256, Sha512};
use sha3::digest::generic_array::GenericArray;
use sha3::digest::{ExtendableOutput, FixedOutput, OutputSizeUser, Update, XofReader};
use sha3::{Sha3_256, Sha3_512, Shake256};
use zeroize::Zeroizing;

use crate::error::Error;

/// SHA3-512 / SHA-512 output length.
pub const HASH_512_LEN: usize = 64;

/// SHA3-256 / SHA-256 output length.
pub const HASH_256_LEN: usize = 32;

/// Largest output accepted for `SHAKE-256(<bits>)`.
pub const MAX_SHAKE256_BITS: usize = 8192;

/// A hash function instance with a fixed output length.
///
/// SHAKE-256 is included with a caller-chosen output length so that it can
/// stand in wherever a fixed-output hash is expected (Kyber's KDF).
#[derive(Clone)]
pub enum HashFunction {
    Sha3_512(Sha3_512),
    Sha3_256(Sha3_256),
    Shake256 { state: Shake256, output_len: usize },
    #[cfg(feature = "aes-ctr")]
    Sha512(Sha512),
    #[cfg(feature = "aes-ctr")]
    Sha256(Sha256),
}

impl HashFunction {
    /// Look up a hash function by name.
    ///
    /// Recognised names: `SHA-3(512)`, `SHA-3(256)`, `SHAKE-256(<bits>)`,
    /// `SHA-512`, `SHA-256`. The SHA-2 names require the `aes-ctr` feature.
    pub fn create(name: &str) -> Result<Self, Error> {
        match name {
            "SHA-3(512)" => Ok(Self::Sha3_512(Sha3_512::default())),
            "SHA-3(256)" => Ok(Self::Sha3_256(Sha3_256::default())),
            #[cfg(feature = "aes-ctr")]
            "SHA-512" => Ok(Self::Sha512(Sha512::default())),
            #[cfg(feature = "aes-ctr")]
            "SHA-256" => Ok(Self::Sha256(Sha256::default())),
            _ => Self::parse_shake256(name)
                .ok_or_else(|| Error::AlgorithmNotFound(name.to_owned())),
        }
    }

    fn parse_shake256(name: &str) -> Option<Self> {
        let bits: usize = name
            .strip_prefix("SHAKE-256(")?
            .strip_suffix(')')?
            .parse()
            .ok()?;
        if bits == 0 || bits % 8 != 0 || bits > MAX_SHAKE256_BITS {
            return None;
        }
        Some(Self::Shake256 {
            state: Shake256::default(),
            output_len: bits / 8,
        })
    }

    /// A fresh, empty instance of the same algorithm.
    pub fn new_object(&self) -> Self {
        match self {
            Self::Sha3_512(_) => Self::Sha3_512(Sha3_512::default()),
            Self::Sha3_256(_) => Self::Sha3_256(Sha3_256::default()),
            Self::Shake256 { output_len, .. } => Self::Shake256 {
                state: Shake256::default(),
                output_len: *output_len,
            },
            #[cfg(feature = "aes-ctr")]
            Self::Sha512(_) => Self::Sha512(Sha512::default()),
            #[cfg(feature = "aes-ctr")]
            Self::Sha256(_) => Self::Sha256(Sha256::default()),
        }
    }

    /// Absorb more input.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha3_512(h) => Update::update(h, data),
            Self::Sha3_256(h) => Update::update(h, data),
            Self::Shake256 { state, .. } => Update::update(state, data),
            #[cfg(feature = "aes-ctr")]
            Self::Sha512(h) => Update::update(h, data),
            #[cfg(feature = "aes-ctr")]
            Self::Sha256(h) => Update::update(h, data),
        }
    }

    /// Consume the instance and return the digest.
    ///
    /// Outputs feed key material (seeds, shared secrets), so they are
    /// zeroized on drop.
    pub fn finalize(self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Sha3_512(h) => finalize_fixed(h),
            Self::Sha3_256(h) => finalize_fixed(h),
            Self::Shake256 { state, output_len } => {
                let mut out = Zeroizing::new(vec![0u8; output_len]);
                state.finalize_xof().read(out.as_mut_slice());
                out
            }
            #[cfg(feature = "aes-ctr")]
            Self::Sha512(h) => finalize_fixed(h),
            #[cfg(feature = "aes-ctr")]
            Self::Sha256(h) => finalize_fixed(h),
        }
    }

    /// Hash `data` in one shot.
    pub fn process(mut self, data: &[u8]) -> Zeroizing<Vec<u8>> {
        self.update(data);
        self.finalize()
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha3_512(_) => HASH_512_LEN,
            Self::Sha3_256(_) => HASH_256_LEN,
            Self::Shake256 { output_len, .. } => *output_len,
            #[cfg(feature = "aes-ctr")]
            Self::Sha512(_) => HASH_512_LEN,
            #[cfg(feature = "aes-ctr")]
            Self::Sha256(_) => HASH_256_LEN,
        }
    }
}

fn finalize_fixed<D: FixedOutput>(hash: D) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(vec![0u8; <D as OutputSizeUser>::output_size()]);
    hash.finalize_into(GenericArray::from_mut_slice(out.as_mut_slice()));
    out
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha3_512(_) => f.write_str("SHA-3(512)"),
            Self::Sha3_256(_) => f.write_str("SHA-3(256)"),
            Self::Shake256 { output_len, .. } => write!(f, "SHAKE-256({})", output_len * 8),
            #[cfg(feature = "aes-ctr")]
            Self::Sha512(_) => f.write_str("SHA-512"),
            #[cfg(feature = "aes-ctr")]
            Self::Sha256(_) => f.write_str("SHA-256"),
        }
    }
}

impl fmt::Debug for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashFunction({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn sha3_512_empty() {
        let out = HashFunction::create("SHA-3(512)").unwrap().process(b"");
        assert_eq!(
            hex(&out),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );
    }

    #[test]
    fn sha3_256_abc() {
        let out = HashFunction::create("SHA-3(256)").unwrap().process(b"abc");
        assert_eq!(
            hex(&out),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
    }

    #[test]
    fn shake256_256_empty() {
        let h = HashFunction::create("SHAKE-256(256)").unwrap();
        assert_eq!(h.output_len(), 32);
        assert_eq!(
            hex(&h.process(b"")),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
        );
    }

    #[cfg(feature = "aes-ctr")]
    #[test]
    fn sha256_abc() {
        let out = HashFunction::create("SHA-256").unwrap().process(b"abc");
        assert_eq!(
            hex(&out),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[cfg(feature = "aes-ctr")]
    #[test]
    fn sha512_empty() {
        let out = HashFunction::create("SHA-512").unwrap().process(b"");
        assert_eq!(
            hex(&out),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn incremental_update_matches_one_shot() {
        let mut h = HashFunction::create("SHA-3(256)").unwrap();
        h.update(b"ab");
        h.update(b"c");
        let one_shot = HashFunction::create("SHA-3(256)").unwrap().process(b"abc");
        assert_eq!(*h.finalize(), *one_shot);
    }

    #[test]
    fn new_object_is_empty() {
        let mut h = HashFunction::create("SHAKE-256(512)").unwrap();
        h.update(b"garbage");
        let fresh = h.new_object();
        assert_eq!(fresh.to_string(), "SHAKE-256(512)");
        assert_eq!(
            *fresh.process(b""),
            *HashFunction::create("SHAKE-256(512)").unwrap().process(b"")
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in [
            "MD5",
            "SHAKE-256(0)",
            "SHAKE-256(12)",
            "SHAKE-256(abc)",
            "SHAKE-256(8200)",
            "SHAKE-256(18446744073709551608)",
            "SHA-3(384)",
        ] {
            assert_eq!(
                HashFunction::create(name).unwrap_err(),
                Error::AlgorithmNotFound(name.to_owned())
            );
        }
    }

    #[test]
    fn shake256_output_is_capped() {
        let h = HashFunction::create("SHAKE-256(8192)").unwrap();
        assert_eq!(h.output_len(), MAX_SHAKE256_BITS / 8);
        assert_eq!(h.process(b"").len(), 1024);
    }

    #[cfg(not(feature = "aes-ctr"))]
    #[test]
    fn sha2_unavailable_without_feature() {
        assert!(matches!(
            HashFunction::create("SHA-256"),
            Err(Error::AlgorithmNotFound(_))
        ));
    }
}
