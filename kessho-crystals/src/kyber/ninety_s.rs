use zeroize::Zeroizing;

use super::KyberSymmetricPrimitives;
use crate::error::Error;
use crate::hash::HashFunction;
use crate::xof::aes_ctr::AesCtrXof;
use crate::xof::{PositionedXof, Xof};

/// Kyber "90s" primitives built from SHA-2 and AES-256-CTR.
///
/// The seed is the AES key. The XOF counter block starts with the matrix
/// position, the PRF counter block with the nonce.
#[derive(Debug, Clone)]
pub struct Kyber90sPrimitives {
    sha512: HashFunction,
    sha256: HashFunction,
}

impl Kyber90sPrimitives {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            sha512: HashFunction::create("SHA-512")?,
            sha256: HashFunction::create("SHA-256")?,
        })
    }
}

impl KyberSymmetricPrimitives for Kyber90sPrimitives {
    fn name(&self) -> &'static str {
        "kyber-90s"
    }

    fn g(&self) -> HashFunction {
        self.sha512.new_object()
    }

    fn h(&self) -> HashFunction {
        self.sha256.new_object()
    }

    fn kdf(&self) -> HashFunction {
        self.sha256.new_object()
    }

    fn xof(&self, seed: &[u8]) -> Result<Box<dyn PositionedXof>, Error> {
        Ok(Box::new(AesCtrXof::new(seed, &[0, 0])?))
    }

    fn prf(&self, seed: &[u8], nonce: u8, out_len: usize) -> Result<Zeroizing<Vec<u8>>, Error> {
        Ok(AesCtrXof::new(seed, &[nonce])?.output(out_len))
    }
}
