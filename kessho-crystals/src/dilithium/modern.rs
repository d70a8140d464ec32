use super::{DilithiumSymmetricPrimitives, XofType};
use crate::error::Error;
use crate::xof::Xof;
use crate::xof::shake::ShakeStream;

/// SHAKE-128/256 over `seed || le16(nonce)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DilithiumModernPrimitives;

impl DilithiumSymmetricPrimitives for DilithiumModernPrimitives {
    fn name(&self) -> &'static str {
        "dilithium-modern"
    }

    fn xof(&self, xof_type: XofType, seed: &[u8], nonce: u16) -> Result<Box<dyn Xof>, Error> {
        let nonce = nonce.to_le_bytes();
        let parts = [seed, nonce.as_slice()];
        let xof: Box<dyn Xof> = match xof_type {
            XofType::K128 => Box::new(ShakeStream::shake128(&parts)),
            XofType::K256 => Box::new(ShakeStream::shake256(&parts)),
        };
        Ok(xof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_little_endian() {
        let p = DilithiumModernPrimitives;
        let mut xof = p.xof(XofType::K128, b"rho", 0x0102).unwrap();
        let expected = ShakeStream::shake128(&[&b"rho"[..], &[0x02u8, 0x01][..]]).output(32);
        assert_eq!(*xof.output(32), *expected);
    }

    #[test]
    fn xof_types_differ() {
        let p = DilithiumModernPrimitives;
        let a = p.xof(XofType::K128, b"seed", 7).unwrap().output(32);
        let b = p.xof(XofType::K256, b"seed", 7).unwrap().output(32);
        assert_ne!(*a, *b);
    }
}
