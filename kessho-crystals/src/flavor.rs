/// Which family of symmetric primitives a lattice mode is built on.
///
/// Fixed for the lifetime of a key: a key generated under one flavor is
/// never processed with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// SHA-3 / SHAKE throughout.
    Modern,
    /// SHA-2 hashes with AES-256-CTR for the XOF and PRF. Kyber calls this
    /// "90s" mode, Dilithium calls it "AES" mode.
    Aes,
}
