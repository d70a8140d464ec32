use zeroize::Zeroizing;

use super::KyberSymmetricPrimitives;
use crate::error::Error;
use crate::hash::HashFunction;
use crate::xof::shake::{Shake128Xof, ShakeStream};
use crate::xof::{PositionedXof, Xof};

/// Kyber primitives built from SHA-3.
///
/// | op  | primitive            |
/// |-----|----------------------|
/// | G   | SHA3-512             |
/// | H   | SHA3-256             |
/// | KDF | SHAKE-256, 256 bits  |
/// | XOF | SHAKE-128(seed‖i‖j)  |
/// | PRF | SHAKE-256(seed‖n)    |
#[derive(Debug, Clone)]
pub struct KyberModernPrimitives {
    sha3_512: HashFunction,
    sha3_256: HashFunction,
    shake256_256: HashFunction,
}

impl KyberModernPrimitives {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            sha3_512: HashFunction::create("SHA-3(512)")?,
            sha3_256: HashFunction::create("SHA-3(256)")?,
            shake256_256: HashFunction::create("SHAKE-256(256)")?,
        })
    }
}

impl KyberSymmetricPrimitives for KyberModernPrimitives {
    fn name(&self) -> &'static str {
        "kyber-modern"
    }

    fn g(&self) -> HashFunction {
        self.sha3_512.new_object()
    }

    fn h(&self) -> HashFunction {
        self.sha3_256.new_object()
    }

    fn kdf(&self) -> HashFunction {
        self.shake256_256.new_object()
    }

    fn xof(&self, seed: &[u8]) -> Result<Box<dyn PositionedXof>, Error> {
        Ok(Box::new(Shake128Xof::new(seed)))
    }

    fn prf(&self, seed: &[u8], nonce: u8, out_len: usize) -> Result<Zeroizing<Vec<u8>>, Error> {
        Ok(ShakeStream::shake256(&[seed, core::slice::from_ref(&nonce)]).output(out_len))
    }
}
