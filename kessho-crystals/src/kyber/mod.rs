//! Kyber symmetric primitives and mode selection.
//!
//! The lattice algorithm calls `G`, `H`, `KDF`, `XOF` and `PRF` through the
//! [`KyberSymmetricPrimitives`] trait, so the same key generation and
//! encapsulation code runs in both the modern and the 90s profile.
//!
//! ```
//! use kessho_crystals::{KyberMode, Xof};
//!
//! let mode: KyberMode = "Kyber-768-r3".parse()?;
//! let primitives = mode.symmetric_primitives()?;
//! let mut xof = primitives.xof_at(&[0u8; 32], (1, 0))?;
//! let block = xof.output(168);
//! assert_eq!(block.len(), 168);
//! # Ok::<(), kessho_crystals::Error>(())
//! ```

mod modern;
#[cfg(feature = "aes-ctr")]
mod ninety_s;

use core::fmt;
use core::str::FromStr;

use tracing::debug;
use zeroize::Zeroizing;

use crate::Flavor;
use crate::error::Error;
use crate::hash::HashFunction;
use crate::xof::{MatrixPosition, PositionedXof};

pub use modern::KyberModernPrimitives;
#[cfg(feature = "aes-ctr")]
pub use ninety_s::Kyber90sPrimitives;

/// Length of Kyber seeds (`rho`, `sigma`, `d`, `z`).
pub const SEED_LEN: usize = 32;

/// The symmetric building blocks of a Kyber instance.
///
/// Implementations hold no per-call scratch state: every `xof` call returns
/// an independent handle and `prf` allocates its own stream. A single
/// strategy can therefore be shared read-only between threads.
pub trait KyberSymmetricPrimitives: Send + Sync {
    /// Short name of the strategy, for logs.
    fn name(&self) -> &'static str;

    /// Fresh 512-bit hash used to expand a seed into `(rho, sigma)`.
    fn g(&self) -> HashFunction;

    /// Fresh 256-bit hash used for public-key and ciphertext hashing.
    fn h(&self) -> HashFunction;

    /// Fresh hash used to derive the final shared secret.
    fn kdf(&self) -> HashFunction;

    /// A new XOF handle bound to `seed`, starting at position `(0, 0)`.
    fn xof(&self, seed: &[u8]) -> Result<Box<dyn PositionedXof>, Error>;

    /// A new XOF handle bound to `seed` and moved to `position`.
    fn xof_at(
        &self,
        seed: &[u8],
        position: MatrixPosition,
    ) -> Result<Box<dyn PositionedXof>, Error> {
        let mut xof = self.xof(seed)?;
        xof.set_position(position);
        Ok(xof)
    }

    /// `out_len` pseudorandom bytes determined by `(seed, nonce)`.
    fn prf(&self, seed: &[u8], nonce: u8, out_len: usize) -> Result<Zeroizing<Vec<u8>>, Error>;
}

/// Kyber parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KyberLevel {
    Kyber512,
    Kyber768,
    Kyber1024,
}

impl KyberLevel {
    fn bits(self) -> u16 {
        match self {
            Self::Kyber512 => 512,
            Self::Kyber768 => 768,
            Self::Kyber1024 => 1024,
        }
    }
}

/// A Kyber parameter set combined with a primitive flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KyberMode {
    pub level: KyberLevel,
    pub flavor: Flavor,
}

impl KyberMode {
    pub const fn new(level: KyberLevel, flavor: Flavor) -> Self {
        Self { level, flavor }
    }

    pub fn is_90s(&self) -> bool {
        self.flavor == Flavor::Aes
    }

    pub fn is_modern(&self) -> bool {
        self.flavor == Flavor::Modern
    }

    /// Module rank.
    pub fn k(&self) -> usize {
        match self.level {
            KyberLevel::Kyber512 => 2,
            KyberLevel::Kyber768 => 3,
            KyberLevel::Kyber1024 => 4,
        }
    }

    /// Noise parameter for the secret and error vectors at key generation.
    pub fn eta1(&self) -> usize {
        match self.level {
            KyberLevel::Kyber512 => 3,
            KyberLevel::Kyber768 | KyberLevel::Kyber1024 => 2,
        }
    }

    /// Noise parameter for encryption errors.
    pub fn eta2(&self) -> usize {
        2
    }

    /// Claimed classical security level in bits.
    pub fn estimated_strength(&self) -> usize {
        match self.level {
            KyberLevel::Kyber512 => 128,
            KyberLevel::Kyber768 => 192,
            KyberLevel::Kyber1024 => 256,
        }
    }

    /// Construct the strategy for this mode.
    pub fn symmetric_primitives(&self) -> Result<Box<dyn KyberSymmetricPrimitives>, Error> {
        symmetric_primitives(*self)
    }
}

impl fmt::Display for KyberMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flavor {
            Flavor::Modern => write!(f, "Kyber-{}-r3", self.level.bits()),
            Flavor::Aes => write!(f, "Kyber-{}-90s-r3", self.level.bits()),
        }
    }
}

impl FromStr for KyberMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownMode(s.to_owned());
        let rest = s
            .strip_prefix("Kyber-")
            .and_then(|r| r.strip_suffix("-r3"))
            .ok_or_else(unknown)?;
        let (bits, flavor) = match rest.strip_suffix("-90s") {
            Some(bits) => (bits, Flavor::Aes),
            None => (rest, Flavor::Modern),
        };
        let level = match bits {
            "512" => KyberLevel::Kyber512,
            "768" => KyberLevel::Kyber768,
            "1024" => KyberLevel::Kyber1024,
            _ => return Err(unknown()),
        };
        Ok(Self::new(level, flavor))
    }
}

/// Bind `mode` to its symmetric-primitive strategy.
///
/// Fails with [`Error::AlgorithmNotFound`] if the flavor's primitives were
/// not compiled in.
pub fn symmetric_primitives(mode: KyberMode) -> Result<Box<dyn KyberSymmetricPrimitives>, Error> {
    let primitives: Box<dyn KyberSymmetricPrimitives> = match mode.flavor {
        Flavor::Modern => Box::new(KyberModernPrimitives::new()?),
        #[cfg(feature = "aes-ctr")]
        Flavor::Aes => Box::new(Kyber90sPrimitives::new()?),
        #[cfg(not(feature = "aes-ctr"))]
        Flavor::Aes => return Err(Error::AlgorithmNotFound("AES-256/CTR".to_owned())),
    };
    debug!(%mode, strategy = primitives.name(), "selected kyber symmetric primitives");
    Ok(primitives)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 6] = [
        "Kyber-512-r3",
        "Kyber-512-90s-r3",
        "Kyber-768-r3",
        "Kyber-768-90s-r3",
        "Kyber-1024-r3",
        "Kyber-1024-90s-r3",
    ];

    #[test]
    fn mode_names_round_trip() {
        for name in ALL {
            let mode: KyberMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), name);
        }
    }

    #[test]
    fn mode_flags() {
        let mode: KyberMode = "Kyber-768-90s-r3".parse().unwrap();
        assert!(mode.is_90s());
        assert!(!mode.is_modern());
        assert_eq!(mode.k(), 3);
        assert_eq!(mode.eta1(), 2);
        assert_eq!(mode.estimated_strength(), 192);

        let mode = KyberMode::new(KyberLevel::Kyber512, Flavor::Modern);
        assert!(mode.is_modern());
        assert_eq!(mode.eta1(), 3);
    }

    #[test]
    fn unknown_mode_names() {
        for name in ["Kyber-256-r3", "Kyber-512", "kyber-512-r3", "Kyber-512-90s", ""] {
            assert_eq!(
                name.parse::<KyberMode>().unwrap_err(),
                Error::UnknownMode(name.to_owned())
            );
        }
    }

    #[test]
    fn selector_picks_matching_strategy() {
        let modern = symmetric_primitives("Kyber-512-r3".parse().unwrap()).unwrap();
        assert_eq!(modern.name(), "kyber-modern");
        assert_eq!(modern.g().to_string(), "SHA-3(512)");
        assert_eq!(modern.h().to_string(), "SHA-3(256)");
        assert_eq!(modern.kdf().to_string(), "SHAKE-256(256)");
    }

    #[cfg(feature = "aes-ctr")]
    #[test]
    fn selector_picks_90s_strategy() {
        let aes = symmetric_primitives("Kyber-1024-90s-r3".parse().unwrap()).unwrap();
        assert_eq!(aes.name(), "kyber-90s");
        assert_eq!(aes.g().to_string(), "SHA-512");
        assert_eq!(aes.h().to_string(), "SHA-256");
        assert_eq!(aes.kdf().to_string(), "SHA-256");
    }

    #[cfg(not(feature = "aes-ctr"))]
    #[test]
    fn selector_fails_without_aes() {
        assert!(matches!(
            symmetric_primitives("Kyber-512-90s-r3".parse().unwrap()),
            Err(Error::AlgorithmNotFound(_))
        ));
    }
}
