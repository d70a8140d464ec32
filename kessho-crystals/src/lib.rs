#![deny(unsafe_code)]

//! # kessho-crystals
//!
//! Interchangeable symmetric primitives for CRYSTALS-style lattice schemes.
//!
//! Kyber and Dilithium both come in two profiles that differ only in their
//! symmetric building blocks: a SHA-3/SHAKE profile and an AES-256-CTR
//! profile (Kyber "90s", Dilithium "AES"). This crate packages each profile
//! as a strategy object behind a trait, and selects the strategy from a mode
//! name, so the surrounding lattice algorithm is written once.
//!
//! ## Properties
//!
//! - Strategy selection fails before any key material is touched if the
//!   profile's primitives are not compiled in (`aes-ctr` feature)
//! - Each `(seed, row, col)` produces the same XOF stream regardless of
//!   call history
//! - Seeds held by XOF handles, PRF outputs and digests are zeroized on drop
//! - Strategies keep no per-call state and may be shared across threads

pub mod dilithium;
pub mod error;
pub mod hash;
pub mod kyber;
pub mod sampling;
pub mod xof;

mod flavor;

pub use dilithium::{DilithiumLevel, DilithiumMode, DilithiumSymmetricPrimitives, XofType};
pub use error::Error;
pub use flavor::Flavor;
pub use hash::HashFunction;
pub use kyber::{KyberLevel, KyberMode, KyberSymmetricPrimitives};
pub use xof::{MatrixPosition, PositionedXof, Xof};
