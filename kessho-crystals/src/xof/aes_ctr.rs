use aes::Aes256;
use aes::cipher::KeyInit;
use ctr::Ctr32BE;
use ctr::cipher::{InnerIvInit, Iv, StreamCipher, StreamCipherCoreWrapper};

use super::{MatrixPosition, PositionedXof, Xof};
use crate::error::Error;

type Aes256Ctr = Ctr32BE<Aes256>;

/// AES-256 key length; seeds used as keys must be exactly this long.
pub const AES_KEY_LEN: usize = 32;

/// Maximum nonce length. The remaining 4 bytes of the counter block hold a
/// big-endian block counter starting at zero.
pub const AES_NONCE_LEN: usize = 12;

/// AES-256-CTR keystream used as an XOF or PRF.
///
/// The key schedule is computed once in [`AesCtrXof::new`]; changing the
/// nonce only rebuilds the counter block. Cipher state is zeroized on drop.
pub struct AesCtrXof {
    cipher: Aes256,
    stream: Aes256Ctr,
}

impl AesCtrXof {
    /// Key the cipher with `key` and start the keystream at `nonce`.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, Error> {
        let cipher = Aes256::new_from_slice(key).map_err(|_| Error::InvalidKeyLength {
            expected: AES_KEY_LEN,
            actual: key.len(),
        })?;
        let stream = Self::stream_at(&cipher, nonce);
        Ok(Self { cipher, stream })
    }

    /// Restart the keystream at `nonce` under the same key.
    ///
    /// Nonces longer than [`AES_NONCE_LEN`] are truncated.
    pub fn set_nonce(&mut self, nonce: &[u8]) {
        self.stream = Self::stream_at(&self.cipher, nonce);
    }

    fn stream_at(cipher: &Aes256, nonce: &[u8]) -> Aes256Ctr {
        let mut block = [0u8; 16];
        let n = nonce.len().min(AES_NONCE_LEN);
        block[..n].copy_from_slice(&nonce[..n]);
        StreamCipherCoreWrapper::from_core(ctr::CtrCore::inner_iv_init(
            cipher.clone(),
            &Iv::<Aes256Ctr>::from(block),
        ))
    }
}

impl Xof for AesCtrXof {
    fn write_output(&mut self, out: &mut [u8]) {
        out.fill(0);
        self.stream.apply_keystream(out);
    }
}

impl PositionedXof for AesCtrXof {
    fn set_position(&mut self, (row, col): MatrixPosition) {
        self.set_nonce(&[row, col]);
    }
}
