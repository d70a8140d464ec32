use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};
use zeroize::Zeroizing;

use super::{MatrixPosition, PositionedXof, Xof};

/// A SHAKE output stream over the concatenation of some input parts.
pub struct ShakeStream<R> {
    reader: R,
}

impl ShakeStream<Shake128Reader> {
    /// SHAKE-128 over `parts[0] || parts[1] || ...`.
    pub fn shake128(parts: &[&[u8]]) -> Self {
        let mut state = Shake128::default();
        for part in parts {
            state.update(part);
        }
        Self {
            reader: state.finalize_xof(),
        }
    }
}

impl ShakeStream<Shake256Reader> {
    /// SHAKE-256 over `parts[0] || parts[1] || ...`.
    pub fn shake256(parts: &[&[u8]]) -> Self {
        let mut state = Shake256::default();
        for part in parts {
            state.update(part);
        }
        Self {
            reader: state.finalize_xof(),
        }
    }
}

impl<R: XofReader + Send> Xof for ShakeStream<R> {
    fn write_output(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE-128 keyed by `seed || row || col`.
///
/// The absorbed input is kept (zeroized on drop) with the position in its
/// last two bytes; repositioning rewrites those bytes and re-absorbs.
pub struct Shake128Xof {
    input: Zeroizing<Vec<u8>>,
    stream: ShakeStream<Shake128Reader>,
}

impl Shake128Xof {
    /// Bind `seed`; the stream starts at position `(0, 0)`.
    pub fn new(seed: &[u8]) -> Self {
        let mut input = Zeroizing::new(Vec::with_capacity(seed.len() + 2));
        input.extend_from_slice(seed);
        input.extend_from_slice(&[0, 0]);
        let stream = ShakeStream::shake128(&[input.as_slice()]);
        Self { input, stream }
    }
}

impl Xof for Shake128Xof {
    fn write_output(&mut self, out: &mut [u8]) {
        self.stream.write_output(out);
    }
}

impl PositionedXof for Shake128Xof {
    fn set_position(&mut self, (row, col): MatrixPosition) {
        let len = self.input.len();
        self.input[len - 2] = row;
        self.input[len - 1] = col;
        self.stream = ShakeStream::shake128(&[self.input.as_slice()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake128_empty_known_answer() {
        let out = ShakeStream::shake128(&[]).output(32);
        let hex: String = out.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
        );
    }

    #[test]
    fn parts_are_concatenated() {
        let a = ShakeStream::shake256(&[&b"ab"[..], &b"cd"[..]]).output(48);
        let b = ShakeStream::shake256(&[&b"abcd"[..]]).output(48);
        assert_eq!(*a, *b);
    }

    #[test]
    fn stream_continues_across_reads() {
        let mut split = ShakeStream::shake128(&[&b"seed"[..]]);
        let mut first = split.output(10).to_vec();
        first.extend_from_slice(&split.output(22));
        let whole = ShakeStream::shake128(&[&b"seed"[..]]).output(32);
        assert_eq!(first, *whole);
    }

    #[test]
    fn position_is_appended_to_seed() {
        let mut xof = Shake128Xof::new(b"seed");
        xof.set_position((3, 1));
        let expected = ShakeStream::shake128(&[&b"seed"[..], &[3u8, 1][..]]).output(64);
        assert_eq!(*xof.output(64), *expected);
    }

    #[test]
    fn repositioning_ignores_history() {
        let mut xof = Shake128Xof::new(b"seed");
        xof.set_position((1, 2));
        let first = xof.output(40);
        xof.set_position((0, 0));
        let _ = xof.output(17);
        xof.set_position((1, 2));
        assert_eq!(*xof.output(40), *first);
    }
}
