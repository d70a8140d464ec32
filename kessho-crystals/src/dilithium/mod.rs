//! Dilithium symmetric primitives and mode selection.
//!
//! Dilithium expands its matrix and samples its vectors from SHAKE keyed by
//! `seed || le16(nonce)`, or from AES-256-CTR in the AES variants. The
//! collision-resistant hash (CRH) is SHAKE-256 in every mode.

mod modern;
#[cfg(feature = "aes-ctr")]
mod aes_ctr;

use core::fmt;
use core::str::FromStr;

use tracing::debug;
use zeroize::Zeroizing;

use crate::Flavor;
use crate::error::Error;
use crate::xof::Xof;

#[cfg(feature = "aes-ctr")]
pub use aes_ctr::DilithiumAesPrimitives;
pub use modern::DilithiumModernPrimitives;

/// Which SHAKE instance a modern-mode XOF uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XofType {
    /// SHAKE-128; matrix expansion.
    K128,
    /// SHAKE-256; secret and mask sampling.
    K256,
}

/// The symmetric building blocks of a Dilithium instance.
pub trait DilithiumSymmetricPrimitives: Send + Sync {
    /// Short name of the strategy, for logs.
    fn name(&self) -> &'static str;

    /// CRH: SHAKE-256 of `input`, `out_len` bytes.
    fn h(&self, input: &[u8], out_len: usize) -> Zeroizing<Vec<u8>> {
        crate::xof::shake::ShakeStream::shake256(&[input]).output(out_len)
    }

    /// A new stream determined by `(xof_type, seed, nonce)`.
    fn xof(&self, xof_type: XofType, seed: &[u8], nonce: u16) -> Result<Box<dyn Xof>, Error>;
}

/// Dilithium matrix shape `k x l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DilithiumLevel {
    Dilithium4x4,
    Dilithium6x5,
    Dilithium8x7,
}

/// A Dilithium parameter set combined with a primitive flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DilithiumMode {
    pub level: DilithiumLevel,
    pub flavor: Flavor,
}

impl DilithiumMode {
    pub const fn new(level: DilithiumLevel, flavor: Flavor) -> Self {
        Self { level, flavor }
    }

    pub fn is_aes(&self) -> bool {
        self.flavor == Flavor::Aes
    }

    pub fn is_modern(&self) -> bool {
        self.flavor == Flavor::Modern
    }

    /// Rows of the public matrix.
    pub fn k(&self) -> usize {
        match self.level {
            DilithiumLevel::Dilithium4x4 => 4,
            DilithiumLevel::Dilithium6x5 => 6,
            DilithiumLevel::Dilithium8x7 => 8,
        }
    }

    /// Columns of the public matrix.
    pub fn l(&self) -> usize {
        match self.level {
            DilithiumLevel::Dilithium4x4 => 4,
            DilithiumLevel::Dilithium6x5 => 5,
            DilithiumLevel::Dilithium8x7 => 7,
        }
    }

    /// Construct the strategy for this mode.
    pub fn symmetric_primitives(&self) -> Result<Box<dyn DilithiumSymmetricPrimitives>, Error> {
        symmetric_primitives(*self)
    }
}

impl fmt::Display for DilithiumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aes = if self.is_aes() { "-AES" } else { "" };
        write!(f, "Dilithium-{}x{}{aes}-r3", self.k(), self.l())
    }
}

impl FromStr for DilithiumMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownMode(s.to_owned());
        let rest = s
            .strip_prefix("Dilithium-")
            .and_then(|r| r.strip_suffix("-r3"))
            .ok_or_else(unknown)?;
        let (shape, flavor) = match rest.strip_suffix("-AES") {
            Some(shape) => (shape, Flavor::Aes),
            None => (rest, Flavor::Modern),
        };
        let level = match shape {
            "4x4" => DilithiumLevel::Dilithium4x4,
            "6x5" => DilithiumLevel::Dilithium6x5,
            "8x7" => DilithiumLevel::Dilithium8x7,
            _ => return Err(unknown()),
        };
        Ok(Self::new(level, flavor))
    }
}

/// Bind `mode` to its symmetric-primitive strategy.
pub fn symmetric_primitives(
    mode: DilithiumMode,
) -> Result<Box<dyn DilithiumSymmetricPrimitives>, Error> {
    let primitives: Box<dyn DilithiumSymmetricPrimitives> = match mode.flavor {
        Flavor::Modern => Box::new(DilithiumModernPrimitives),
        #[cfg(feature = "aes-ctr")]
        Flavor::Aes => Box::new(DilithiumAesPrimitives),
        #[cfg(not(feature = "aes-ctr"))]
        Flavor::Aes => return Err(Error::AlgorithmNotFound("AES-256/CTR".to_owned())),
    };
    debug!(%mode, strategy = primitives.name(), "selected dilithium symmetric primitives");
    Ok(primitives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip() {
        for name in [
            "Dilithium-4x4-r3",
            "Dilithium-4x4-AES-r3",
            "Dilithium-6x5-r3",
            "Dilithium-6x5-AES-r3",
            "Dilithium-8x7-r3",
            "Dilithium-8x7-AES-r3",
        ] {
            let mode: DilithiumMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), name);
        }
    }

    #[test]
    fn mode_shape() {
        let mode: DilithiumMode = "Dilithium-6x5-AES-r3".parse().unwrap();
        assert!(mode.is_aes());
        assert_eq!((mode.k(), mode.l()), (6, 5));
    }

    #[test]
    fn unknown_mode_names() {
        for name in ["Dilithium-5x5-r3", "Dilithium-4x4", "Dilithium-4x4-aes-r3"] {
            assert!(matches!(
                name.parse::<DilithiumMode>(),
                Err(Error::UnknownMode(_))
            ));
        }
    }

    #[test]
    fn crh_is_shake256_in_every_flavor() {
        let modern = symmetric_primitives("Dilithium-4x4-r3".parse().unwrap()).unwrap();
        let expected = crate::hash::HashFunction::create("SHAKE-256(384)")
            .unwrap()
            .process(b"tr");
        assert_eq!(*modern.h(b"tr", 48), *expected);

        #[cfg(feature = "aes-ctr")]
        {
            let aes = symmetric_primitives("Dilithium-4x4-AES-r3".parse().unwrap()).unwrap();
            assert_eq!(*aes.h(b"tr", 48), *expected);
        }
    }
}
