//! Storage for the messages of a single TLS handshake.
//!
//! Every slot is written at most once and read back by later handshake
//! steps (transcript hashing, signature checks, Finished verification).
//! Messages that both sides send go into a per-sender slot: the store knows
//! which side it belongs to, and the caller says whether the message came
//! from the peer.

use tracing::debug;

use crate::error::Error;
use crate::messages::{
    Certificate13, CertificateRequest13, CertificateVerify13, ClientHello12, ClientHello13,
    ConnectionSide, EncryptedExtensions, Finished13, HandshakeMessage, HandshakeMessageRef,
    HelloRetryRequest, Message, ServerHello12, ServerHello13,
};

const NOT_SET: &str = "TLS handshake message not set";
const ALREADY_SET: &str = "TLS handshake message already set";

/// Every handshake message seen so far, sent or received.
#[derive(Debug)]
pub struct MessageStore {
    side: ConnectionSide,

    client_hello: Option<ClientHello13>,
    client_hello_12: Option<ClientHello12>,
    client_hello_retried: bool,
    server_hello: Option<ServerHello13>,
    server_hello_12: Option<ServerHello12>,
    hello_retry_request: Option<HelloRetryRequest>,
    encrypted_extensions: Option<EncryptedExtensions>,
    certificate_request: Option<CertificateRequest13>,

    server_certificate: Option<Certificate13>,
    client_certificate: Option<Certificate13>,
    server_certificate_verify: Option<CertificateVerify13>,
    client_certificate_verify: Option<CertificateVerify13>,
    server_finished: Option<Finished13>,
    client_finished: Option<Finished13>,
}

fn put<T: Message>(
    slot: &mut Option<T>,
    message: T,
    side: ConnectionSide,
    from_peer: bool,
) -> Result<&T, Error> {
    if slot.is_some() {
        return Err(Error::InvalidState(ALREADY_SET));
    }
    debug!(%side, from_peer, kind = %T::TYPE, "storing handshake message");
    Ok(slot.insert(message))
}

fn get<T>(slot: &Option<T>) -> Result<&T, Error> {
    slot.as_ref().ok_or(Error::InvalidState(NOT_SET))
}

impl MessageStore {
    pub fn new(side: ConnectionSide) -> Self {
        Self {
            side,
            client_hello: None,
            client_hello_12: None,
            client_hello_retried: false,
            server_hello: None,
            server_hello_12: None,
            hello_retry_request: None,
            encrypted_extensions: None,
            certificate_request: None,
            server_certificate: None,
            client_certificate: None,
            server_certificate_verify: None,
            client_certificate_verify: None,
            server_finished: None,
            client_finished: None,
        }
    }

    pub fn side(&self) -> ConnectionSide {
        self.side
    }

    /// The side that sent a message, given whether it came from the peer.
    fn sender(&self, from_peer: bool) -> ConnectionSide {
        if from_peer { self.side.peer() } else { self.side }
    }

    /// Store any handshake message, dispatching on its kind.
    pub fn store(
        &mut self,
        message: HandshakeMessage,
        from_peer: bool,
    ) -> Result<HandshakeMessageRef<'_>, Error> {
        Ok(match message {
            HandshakeMessage::ClientHello(m) => {
                HandshakeMessageRef::ClientHello(self.store_client_hello(m, from_peer)?)
            }
            HandshakeMessage::ClientHello12(m) => {
                HandshakeMessageRef::ClientHello12(self.store_client_hello_12(m, from_peer)?)
            }
            HandshakeMessage::ServerHello(m) => {
                HandshakeMessageRef::ServerHello(self.store_server_hello(m, from_peer)?)
            }
            HandshakeMessage::ServerHello12(m) => {
                HandshakeMessageRef::ServerHello12(self.store_server_hello_12(m, from_peer)?)
            }
            HandshakeMessage::HelloRetryRequest(m) => HandshakeMessageRef::HelloRetryRequest(
                self.store_hello_retry_request(m, from_peer)?,
            ),
            HandshakeMessage::EncryptedExtensions(m) => HandshakeMessageRef::EncryptedExtensions(
                self.store_encrypted_extensions(m, from_peer)?,
            ),
            HandshakeMessage::CertificateRequest(m) => HandshakeMessageRef::CertificateRequest(
                self.store_certificate_request(m, from_peer)?,
            ),
            HandshakeMessage::Certificate(m) => {
                HandshakeMessageRef::Certificate(self.store_certificate(m, from_peer)?)
            }
            HandshakeMessage::CertificateVerify(m) => HandshakeMessageRef::CertificateVerify(
                self.store_certificate_verify(m, from_peer)?,
            ),
            HandshakeMessage::Finished(m) => {
                HandshakeMessageRef::Finished(self.store_finished(m, from_peer)?)
            }
        })
    }

    /// Store a ClientHello.
    ///
    /// After a HelloRetryRequest the client sends a second ClientHello, which
    /// replaces the first. That replacement happens at most once; any other
    /// second store fails like every other slot.
    pub fn store_client_hello(
        &mut self,
        message: ClientHello13,
        from_peer: bool,
    ) -> Result<&ClientHello13, Error> {
        if self.client_hello.is_some()
            && self.hello_retry_request.is_some()
            && !self.client_hello_retried
        {
            self.client_hello_retried = true;
            debug!(
                side = %self.side,
                from_peer,
                "replacing client hello after hello retry request"
            );
            return Ok(self.client_hello.insert(message));
        }
        put(&mut self.client_hello, message, self.side, from_peer)
    }

    pub fn store_client_hello_12(
        &mut self,
        message: ClientHello12,
        from_peer: bool,
    ) -> Result<&ClientHello12, Error> {
        put(&mut self.client_hello_12, message, self.side, from_peer)
    }

    pub fn store_server_hello(
        &mut self,
        message: ServerHello13,
        from_peer: bool,
    ) -> Result<&ServerHello13, Error> {
        put(&mut self.server_hello, message, self.side, from_peer)
    }

    pub fn store_server_hello_12(
        &mut self,
        message: ServerHello12,
        from_peer: bool,
    ) -> Result<&ServerHello12, Error> {
        put(&mut self.server_hello_12, message, self.side, from_peer)
    }

    pub fn store_hello_retry_request(
        &mut self,
        message: HelloRetryRequest,
        from_peer: bool,
    ) -> Result<&HelloRetryRequest, Error> {
        put(&mut self.hello_retry_request, message, self.side, from_peer)
    }

    pub fn store_encrypted_extensions(
        &mut self,
        message: EncryptedExtensions,
        from_peer: bool,
    ) -> Result<&EncryptedExtensions, Error> {
        put(&mut self.encrypted_extensions, message, self.side, from_peer)
    }

    pub fn store_certificate_request(
        &mut self,
        message: CertificateRequest13,
        from_peer: bool,
    ) -> Result<&CertificateRequest13, Error> {
        put(&mut self.certificate_request, message, self.side, from_peer)
    }

    /// Goes to the sender's chain slot.
    pub fn store_certificate(
        &mut self,
        message: Certificate13,
        from_peer: bool,
    ) -> Result<&Certificate13, Error> {
        let slot = match self.sender(from_peer) {
            ConnectionSide::Client => &mut self.client_certificate,
            ConnectionSide::Server => &mut self.server_certificate,
        };
        put(slot, message, self.side, from_peer)
    }

    /// Goes to the sender's CertificateVerify slot.
    pub fn store_certificate_verify(
        &mut self,
        message: CertificateVerify13,
        from_peer: bool,
    ) -> Result<&CertificateVerify13, Error> {
        let slot = match self.sender(from_peer) {
            ConnectionSide::Client => &mut self.client_certificate_verify,
            ConnectionSide::Server => &mut self.server_certificate_verify,
        };
        put(slot, message, self.side, from_peer)
    }

    /// Goes to the sender's Finished slot.
    pub fn store_finished(
        &mut self,
        message: Finished13,
        from_peer: bool,
    ) -> Result<&Finished13, Error> {
        let slot = match self.sender(from_peer) {
            ConnectionSide::Client => &mut self.client_finished,
            ConnectionSide::Server => &mut self.server_finished,
        };
        put(slot, message, self.side, from_peer)
    }

    pub fn client_hello(&self) -> Result<&ClientHello13, Error> {
        get(&self.client_hello)
    }

    pub fn client_hello_12(&self) -> Result<&ClientHello12, Error> {
        get(&self.client_hello_12)
    }

    pub fn server_hello(&self) -> Result<&ServerHello13, Error> {
        get(&self.server_hello)
    }

    pub fn server_hello_12(&self) -> Result<&ServerHello12, Error> {
        get(&self.server_hello_12)
    }

    pub fn hello_retry_request(&self) -> Result<&HelloRetryRequest, Error> {
        get(&self.hello_retry_request)
    }

    pub fn encrypted_extensions(&self) -> Result<&EncryptedExtensions, Error> {
        get(&self.encrypted_extensions)
    }

    pub fn certificate_request(&self) -> Result<&CertificateRequest13, Error> {
        get(&self.certificate_request)
    }

    pub fn server_certificate_chain(&self) -> Result<&Certificate13, Error> {
        get(&self.server_certificate)
    }

    pub fn client_certificate_chain(&self) -> Result<&Certificate13, Error> {
        get(&self.client_certificate)
    }

    pub fn server_certificate_verify(&self) -> Result<&CertificateVerify13, Error> {
        get(&self.server_certificate_verify)
    }

    pub fn client_certificate_verify(&self) -> Result<&CertificateVerify13, Error> {
        get(&self.client_certificate_verify)
    }

    pub fn server_finished(&self) -> Result<&Finished13, Error> {
        get(&self.server_finished)
    }

    pub fn client_finished(&self) -> Result<&Finished13, Error> {
        get(&self.client_finished)
    }

    pub fn has_client_hello(&self) -> bool {
        self.client_hello.is_some()
    }

    pub fn has_client_hello_12(&self) -> bool {
        self.client_hello_12.is_some()
    }

    pub fn has_server_hello(&self) -> bool {
        self.server_hello.is_some()
    }

    pub fn has_server_hello_12(&self) -> bool {
        self.server_hello_12.is_some()
    }

    pub fn has_hello_retry_request(&self) -> bool {
        self.hello_retry_request.is_some()
    }

    pub fn has_encrypted_extensions(&self) -> bool {
        self.encrypted_extensions.is_some()
    }

    pub fn has_certificate_request(&self) -> bool {
        self.certificate_request.is_some()
    }

    pub fn has_server_certificate_chain(&self) -> bool {
        self.server_certificate.is_some()
    }

    pub fn has_client_certificate_chain(&self) -> bool {
        self.client_certificate.is_some()
    }

    pub fn has_server_certificate_verify(&self) -> bool {
        self.server_certificate_verify.is_some()
    }

    pub fn has_client_certificate_verify(&self) -> bool {
        self.client_certificate_verify.is_some()
    }

    pub fn has_server_finished(&self) -> bool {
        self.server_finished.is_some()
    }

    pub fn has_client_finished(&self) -> bool {
        self.client_finished.is_some()
    }

    /// Both Finished messages are present, in whatever order they arrived.
    pub fn handshake_finished(&self) -> bool {
        self.has_server_finished() && self.has_client_finished()
    }
}

/// A message type with a slot in [`MessageStore`].
pub trait Storable: Message + Sized {
    fn store_into(self, store: &mut MessageStore, from_peer: bool) -> Result<&Self, Error>;
}

macro_rules! storable {
    ($($ty:ty => $method:ident),+ $(,)?) => {
        $(
            impl Storable for $ty {
                fn store_into(self, store: &mut MessageStore, from_peer: bool) -> Result<&Self, Error> {
                    store.$method(self, from_peer)
                }
            }
        )+
    };
}

storable! {
    ClientHello13 => store_client_hello,
    ClientHello12 => store_client_hello_12,
    ServerHello13 => store_server_hello,
    ServerHello12 => store_server_hello_12,
    HelloRetryRequest => store_hello_retry_request,
    EncryptedExtensions => store_encrypted_extensions,
    CertificateRequest13 => store_certificate_request,
    Certificate13 => store_certificate,
    CertificateVerify13 => store_certificate_verify,
    Finished13 => store_finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(byte: u8) -> Certificate13 {
        Certificate13 {
            request_context: vec![],
            entries: vec![crate::messages::CertificateEntry {
                data: vec![byte; 8],
                extensions: vec![],
            }],
        }
    }

    fn hello() -> ClientHello13 {
        ClientHello13 {
            random: [1; 32],
            legacy_session_id: vec![],
            cipher_suites: vec![0x1301],
            extensions: vec![],
        }
    }

    #[test]
    fn empty_store_reads_fail() {
        let store = MessageStore::new(ConnectionSide::Client);
        assert_eq!(store.client_hello().unwrap_err(), Error::InvalidState(NOT_SET));
        assert_eq!(store.server_finished().unwrap_err(), Error::InvalidState(NOT_SET));
        assert!(!store.has_encrypted_extensions());
        assert!(!store.handshake_finished());
    }

    #[test]
    fn double_store_is_rejected_and_keeps_first() {
        let mut store = MessageStore::new(ConnectionSide::Client);
        store.store_client_hello(hello(), false).unwrap();
        let mut second = hello();
        second.random = [2; 32];
        assert_eq!(
            store.store_client_hello(second, false).unwrap_err(),
            Error::InvalidState(ALREADY_SET)
        );
        assert_eq!(store.client_hello().unwrap().random, [1; 32]);
    }

    #[test]
    fn certificates_are_routed_by_sender() {
        // Client store: own chain is the client's, the peer's is the server's.
        let mut client = MessageStore::new(ConnectionSide::Client);
        client.store_certificate(chain(0xcc), false).unwrap();
        client.store_certificate(chain(0x55), true).unwrap();
        assert_eq!(client.client_certificate_chain().unwrap().entries[0].data[0], 0xcc);
        assert_eq!(client.server_certificate_chain().unwrap().entries[0].data[0], 0x55);

        // Server store: the mirror image.
        let mut server = MessageStore::new(ConnectionSide::Server);
        server.store_certificate(chain(0x55), false).unwrap();
        assert!(server.has_server_certificate_chain());
        assert!(!server.has_client_certificate_chain());
    }

    #[test]
    fn finished_in_either_order() {
        for peer_first in [true, false] {
            let mut store = MessageStore::new(ConnectionSide::Server);
            let order = if peer_first { [true, false] } else { [false, true] };
            for (i, from_peer) in order.into_iter().enumerate() {
                store
                    .store_finished(Finished13::new(vec![0; 32]), from_peer)
                    .unwrap();
                assert_eq!(store.handshake_finished(), i == 1);
            }
        }
    }

    #[test]
    fn generic_store_dispatches() {
        let mut store = MessageStore::new(ConnectionSide::Client);
        let stored = store
            .store(EncryptedExtensions::default().into(), true)
            .unwrap();
        assert!(matches!(stored, HandshakeMessageRef::EncryptedExtensions(_)));
        assert!(store.has_encrypted_extensions());
    }

    fn hrr() -> HelloRetryRequest {
        HelloRetryRequest {
            legacy_session_id_echo: vec![],
            cipher_suite: 0x1301,
            extensions: vec![],
        }
    }

    #[test]
    fn second_client_hello_needs_hrr() {
        let mut store = MessageStore::new(ConnectionSide::Client);
        store.store_client_hello(hello(), false).unwrap();
        assert_eq!(
            store.store_client_hello(hello(), false).unwrap_err(),
            Error::InvalidState(ALREADY_SET)
        );
    }

    #[test]
    fn client_hello_replaced_once_after_hrr() {
        for side in [ConnectionSide::Client, ConnectionSide::Server] {
            let from_peer = side == ConnectionSide::Server;
            let mut store = MessageStore::new(side);
            store.store_client_hello(hello(), from_peer).unwrap();
            store.store_hello_retry_request(hrr(), !from_peer).unwrap();

            let mut retried = hello();
            retried.random = [9; 32];
            assert_eq!(
                store.store_client_hello(retried, from_peer).unwrap().random,
                [9; 32]
            );
            assert_eq!(
                store.store_client_hello(hello(), from_peer).unwrap_err(),
                Error::InvalidState(ALREADY_SET)
            );
            assert_eq!(store.client_hello().unwrap().random, [9; 32]);
        }
    }
}
