use super::{Extension, HandshakeType, Message};

/// One certificate in a chain, with its per-entry extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateEntry {
    /// DER-encoded certificate or raw public key.
    pub data: Vec<u8>,
    pub extensions: Vec<Extension>,
}

/// A certificate chain, leaf first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate13 {
    pub request_context: Vec<u8>,
    pub entries: Vec<CertificateEntry>,
}

impl Certificate13 {
    /// A client with no suitable certificate sends an empty chain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leaf(&self) -> Option<&CertificateEntry> {
        self.entries.first()
    }
}

impl Message for Certificate13 {
    const TYPE: HandshakeType = HandshakeType::Certificate;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateRequest13 {
    pub request_context: Vec<u8>,
    pub extensions: Vec<Extension>,
}

impl Message for CertificateRequest13 {
    const TYPE: HandshakeType = HandshakeType::CertificateRequest;
}

/// Signature over the transcript, proving possession of the leaf key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVerify13 {
    pub signature_scheme: u16,
    pub signature: Vec<u8>,
}

impl Message for CertificateVerify13 {
    const TYPE: HandshakeType = HandshakeType::CertificateVerify;
}
