//! Keystream generators handed out by the strategies.
//!
//! - [`shake`]: SHAKE-128/256 streams, including the matrix-positioned XOF
//! - [`aes_ctr`]: AES-256 in counter mode used as an XOF/PRF (`aes-ctr` feature)

#[cfg(feature = "aes-ctr")]
pub mod aes_ctr;
pub mod shake;

use zeroize::Zeroizing;

/// A `(row, column)` coordinate in the public matrix.
pub type MatrixPosition = (u8, u8);

/// An extendable-output stream.
///
/// Successive calls continue the same stream.
pub trait Xof: Send {
    /// Fill `out` with the next `out.len()` bytes of output.
    fn write_output(&mut self, out: &mut [u8]);

    /// Squeeze `len` bytes into a fresh buffer.
    fn output(&mut self, len: usize) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(vec![0u8; len]);
        self.write_output(out.as_mut_slice());
        out
    }
}

/// An [`Xof`] bound to one seed that can be moved to another matrix position.
///
/// `set_position` restarts the stream: the output after it depends only on
/// `(seed, row, col)`, never on what was read before.
pub trait PositionedXof: Xof {
    fn set_position(&mut self, position: MatrixPosition);
}
