use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{HandshakeType, Message};

/// The Finished MAC over the handshake transcript.
///
/// `verify_data` is derived from traffic secrets, so it is compared in
/// constant time and wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Finished13 {
    verify_data: Vec<u8>,
}

impl Finished13 {
    pub fn new(verify_data: Vec<u8>) -> Self {
        Self { verify_data }
    }

    pub fn verify_data(&self) -> &[u8] {
        &self.verify_data
    }

    /// Compare against the locally computed MAC in constant time.
    pub fn verify(&self, expected: &[u8]) -> bool {
        self.verify_data.as_slice().ct_eq(expected).into()
    }
}

impl Message for Finished13 {
    const TYPE: HandshakeType = HandshakeType::Finished;
}

impl fmt::Debug for Finished13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finished13")
            .field("len", &self.verify_data.len())
            .finish_non_exhaustive()
    }
}
