use super::{DilithiumSymmetricPrimitives, XofType};
use crate::error::Error;
use crate::xof::Xof;
use crate::xof::aes_ctr::{AES_KEY_LEN, AesCtrXof};

/// AES-256-CTR keyed with the first 32 seed bytes; the counter block starts
/// with `le16(nonce)`. Both XOF types map to the same construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DilithiumAesPrimitives;

impl DilithiumSymmetricPrimitives for DilithiumAesPrimitives {
    fn name(&self) -> &'static str {
        "dilithium-aes"
    }

    fn xof(&self, _xof_type: XofType, seed: &[u8], nonce: u16) -> Result<Box<dyn Xof>, Error> {
        let key = seed.get(..AES_KEY_LEN).ok_or(Error::InvalidKeyLength {
            expected: AES_KEY_LEN,
            actual: seed.len(),
        })?;
        Ok(Box::new(AesCtrXof::new(key, &nonce.to_le_bytes())?))
    }
}
