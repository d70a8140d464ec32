use super::{Extension, HandshakeType, Message};

/// `random` value that marks a ServerHello as a HelloRetryRequest
/// (SHA-256 of "HelloRetryRequest").
pub const HELLO_RETRY_REQUEST_RANDOM: [u8; 32] = [
    0xcf, 0x21, 0xad, 0x74, 0xe5, 0x9a, 0x61, 0x11, 0xbe, 0x1d, 0x8c, 0x02, 0x1e, 0x65, 0xb8, 0x91,
    0xc2, 0xa2, 0x11, 0x16, 0x7a, 0xbb, 0x8c, 0x5e, 0x07, 0x9e, 0x09, 0xe2, 0xc8, 0xa8, 0x33, 0x9c,
];

/// Tail of a TLS 1.3 server's random when it negotiates TLS 1.2.
pub const TLS12_DOWNGRADE_MARKER: [u8; 8] = *b"DOWNGRD\x01";

/// Tail of a TLS 1.3 server's random when it negotiates TLS 1.1 or below.
pub const TLS11_DOWNGRADE_MARKER: [u8; 8] = *b"DOWNGRD\x00";

fn find(extensions: &[Extension], extension_type: u16) -> Option<&Extension> {
    extensions.iter().find(|e| e.extension_type == extension_type)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello13 {
    pub random: [u8; 32],
    pub legacy_session_id: Vec<u8>,
    pub cipher_suites: Vec<u16>,
    pub extensions: Vec<Extension>,
}

impl ClientHello13 {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }

    pub fn offers_cipher_suite(&self, suite: u16) -> bool {
        self.cipher_suites.contains(&suite)
    }
}

impl Message for ClientHello13 {
    const TYPE: HandshakeType = HandshakeType::ClientHello;
}

/// A ClientHello offering TLS 1.2 only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello12 {
    pub random: [u8; 32],
    pub session_id: Vec<u8>,
    pub cipher_suites: Vec<u16>,
    pub compression_methods: Vec<u8>,
    pub extensions: Vec<Extension>,
}

impl ClientHello12 {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }
}

impl Message for ClientHello12 {
    const TYPE: HandshakeType = HandshakeType::ClientHello;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello13 {
    pub random: [u8; 32],
    pub legacy_session_id_echo: Vec<u8>,
    pub cipher_suite: u16,
    pub extensions: Vec<Extension>,
}

impl ServerHello13 {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }
}

impl Message for ServerHello13 {
    const TYPE: HandshakeType = HandshakeType::ServerHello;
}

/// A ServerHello negotiating TLS 1.2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello12 {
    pub random: [u8; 32],
    pub session_id: Vec<u8>,
    pub cipher_suite: u16,
    pub compression_method: u8,
    pub extensions: Vec<Extension>,
}

impl ServerHello12 {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }

    /// Whether the server random carries a TLS 1.3 downgrade marker.
    ///
    /// A client that offered TLS 1.3 must abort when this is set.
    pub fn has_downgrade_marker(&self) -> bool {
        let tail = &self.random[24..];
        tail == TLS12_DOWNGRADE_MARKER || tail == TLS11_DOWNGRADE_MARKER
    }
}

impl Message for ServerHello12 {
    const TYPE: HandshakeType = HandshakeType::ServerHello;
}

/// A ServerHello asking the client to try again with different parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloRetryRequest {
    pub legacy_session_id_echo: Vec<u8>,
    pub cipher_suite: u16,
    pub extensions: Vec<Extension>,
}

impl HelloRetryRequest {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }

    /// The `random` field as it appears on the wire.
    pub fn random(&self) -> [u8; 32] {
        HELLO_RETRY_REQUEST_RANDOM
    }
}

impl Message for HelloRetryRequest {
    const TYPE: HandshakeType = HandshakeType::HelloRetryRequest;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedExtensions {
    pub extensions: Vec<Extension>,
}

impl EncryptedExtensions {
    pub fn extension(&self, extension_type: u16) -> Option<&Extension> {
        find(&self.extensions, extension_type)
    }
}

impl Message for EncryptedExtensions {
    const TYPE: HandshakeType = HandshakeType::EncryptedExtensions;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_hello_12(tail: [u8; 8]) -> ServerHello12 {
        let mut random = [0x42u8; 32];
        random[24..].copy_from_slice(&tail);
        ServerHello12 {
            random,
            session_id: vec![],
            cipher_suite: 0xc02f,
            compression_method: 0,
            extensions: vec![],
        }
    }

    #[test]
    fn downgrade_marker() {
        assert!(server_hello_12(TLS12_DOWNGRADE_MARKER).has_downgrade_marker());
        assert!(server_hello_12(TLS11_DOWNGRADE_MARKER).has_downgrade_marker());
        assert!(!server_hello_12([0x42; 8]).has_downgrade_marker());
    }

    #[test]
    fn extension_lookup() {
        let hello = ClientHello13 {
            random: [0; 32],
            legacy_session_id: vec![],
            cipher_suites: vec![0x1301, 0x1303],
            extensions: vec![Extension::new(43, vec![0x02, 0x03, 0x04])],
        };
        assert_eq!(hello.extension(43).map(|e| e.data.len()), Some(3));
        assert!(hello.extension(51).is_none());
        assert!(hello.offers_cipher_suite(0x1303));
        assert!(!hello.offers_cipher_suite(0x1302));
    }
}
