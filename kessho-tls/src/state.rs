//! Role-specific views over a [`MessageStore`].
//!
//! A [`HandshakeState<R>`] only lets role `R` record messages that `R` may
//! send, and checks every inbound message against what `R` may receive.
//!
//! Sending a message of the wrong role does not compile:
//!
//! ```compile_fail
//! use kessho_tls::ClientHandshakeState;
//! use kessho_tls::messages::EncryptedExtensions;
//!
//! let mut state = ClientHandshakeState::new();
//! state.sending(EncryptedExtensions::default()).unwrap();
//! ```
//!
//! Receiving one is a protocol violation reported as `unexpected_message`:
//!
//! ```
//! use kessho_tls::{AlertDescription, ServerHandshakeState};
//! use kessho_tls::messages::EncryptedExtensions;
//!
//! let mut state = ServerHandshakeState::new();
//! let err = state.received(EncryptedExtensions::default().into()).unwrap_err();
//! assert_eq!(err.alert(), AlertDescription::UnexpectedMessage);
//! assert!(!state.has_encrypted_extensions());
//! ```

use core::fmt;
use core::marker::PhantomData;

use tracing::warn;

use crate::error::Error;
use crate::messages::{
    Certificate13, CertificateRequest13, CertificateVerify13, ClientHandshakeMessage,
    ClientHello12, ClientHello13, ClientPostHandshakeMessage, ConnectionSide,
    EncryptedExtensions, Finished13, HandshakeMessage, HandshakeMessageRef, HelloRetryRequest,
    PostHandshakeMessage, ServerHandshakeMessage, ServerHello12, ServerHello13,
    ServerPostHandshakeMessage,
};
use crate::store::{MessageStore, Storable};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Client {}
    impl Sealed for super::Server {}
}

/// One end of a TLS connection, fixing which messages it sends and receives.
pub trait Role: sealed::Sealed {
    const SIDE: ConnectionSide;
    /// Handshake messages this role sends.
    type Outbound: Into<HandshakeMessage> + fmt::Debug;
    /// Handshake messages this role accepts from its peer.
    type Inbound: TryFrom<HandshakeMessage, Error = HandshakeMessage> + Into<HandshakeMessage>;
    /// Post-handshake messages this role accepts from its peer.
    type InboundPostHandshake: TryFrom<PostHandshakeMessage, Error = PostHandshakeMessage>;
}

#[derive(Debug, Clone, Copy)]
pub struct Client;

#[derive(Debug, Clone, Copy)]
pub struct Server;

impl Role for Client {
    const SIDE: ConnectionSide = ConnectionSide::Client;
    type Outbound = ClientHandshakeMessage;
    type Inbound = ServerHandshakeMessage;
    type InboundPostHandshake = ServerPostHandshakeMessage;
}

impl Role for Server {
    const SIDE: ConnectionSide = ConnectionSide::Server;
    type Outbound = ServerHandshakeMessage;
    type Inbound = ClientHandshakeMessage;
    type InboundPostHandshake = ClientPostHandshakeMessage;
}

pub type ClientHandshakeState = HandshakeState<Client>;
pub type ServerHandshakeState = HandshakeState<Server>;

macro_rules! delegate {
    ($($method:ident -> $ret:ty),+ $(,)?) => {
        $(
            pub fn $method(&self) -> $ret {
                self.store.$method()
            }
        )+
    };
}

/// The messages of one handshake, as seen by role `R`.
#[derive(Debug)]
pub struct HandshakeState<R: Role> {
    store: MessageStore,
    _role: PhantomData<R>,
}

impl<R: Role> Default for HandshakeState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Role> HandshakeState<R> {
    pub fn new() -> Self {
        Self {
            store: MessageStore::new(R::SIDE),
            _role: PhantomData,
        }
    }

    pub fn side(&self) -> ConnectionSide {
        R::SIDE
    }

    /// Record a message this side is about to send.
    ///
    /// Only message types in `R::Outbound` are accepted.
    pub fn sending<M>(&mut self, message: M) -> Result<&M, Error>
    where
        M: Storable,
        R::Outbound: From<M>,
    {
        message.store_into(&mut self.store, false)
    }

    /// Record an outbound message already wrapped in the role's message set.
    pub fn sending_message(
        &mut self,
        message: R::Outbound,
    ) -> Result<HandshakeMessageRef<'_>, Error> {
        self.store.store(message.into(), false)
    }

    /// Record a message received from the peer.
    ///
    /// A message kind the peer may not send fails with `unexpected_message`
    /// and leaves the store untouched.
    pub fn received(
        &mut self,
        message: HandshakeMessage,
    ) -> Result<HandshakeMessageRef<'_>, Error> {
        match R::Inbound::try_from(message) {
            Ok(inbound) => self.store.store(inbound.into(), true),
            Err(rejected) => {
                warn!(
                    side = %R::SIDE,
                    kind = %rejected.handshake_type(),
                    "received an illegal handshake message"
                );
                Err(Error::unexpected_message(
                    "received an illegal handshake message",
                ))
            }
        }
    }

    /// Check a post-handshake message from the peer and narrow it to the
    /// kinds this role accepts. Nothing is stored.
    pub fn received_post_handshake(
        &self,
        message: PostHandshakeMessage,
    ) -> Result<R::InboundPostHandshake, Error> {
        R::InboundPostHandshake::try_from(message).map_err(|rejected| {
            warn!(
                side = %R::SIDE,
                kind = %rejected.handshake_type(),
                "received an unexpected post-handshake message"
            );
            Error::unexpected_message("received an unexpected post-handshake message")
        })
    }

    /// Read-only access to the underlying store.
    pub fn messages(&self) -> &MessageStore {
        &self.store
    }

    delegate! {
        client_hello -> Result<&ClientHello13, Error>,
        client_hello_12 -> Result<&ClientHello12, Error>,
        server_hello -> Result<&ServerHello13, Error>,
        server_hello_12 -> Result<&ServerHello12, Error>,
        hello_retry_request -> Result<&HelloRetryRequest, Error>,
        encrypted_extensions -> Result<&EncryptedExtensions, Error>,
        certificate_request -> Result<&CertificateRequest13, Error>,
        server_certificate_chain -> Result<&Certificate13, Error>,
        client_certificate_chain -> Result<&Certificate13, Error>,
        server_certificate_verify -> Result<&CertificateVerify13, Error>,
        client_certificate_verify -> Result<&CertificateVerify13, Error>,
        server_finished -> Result<&Finished13, Error>,
        client_finished -> Result<&Finished13, Error>,
        has_client_hello -> bool,
        has_client_hello_12 -> bool,
        has_server_hello -> bool,
        has_server_hello_12 -> bool,
        has_hello_retry_request -> bool,
        has_encrypted_extensions -> bool,
        has_certificate_request -> bool,
        has_server_certificate_chain -> bool,
        has_client_certificate_chain -> bool,
        has_server_certificate_verify -> bool,
        has_client_certificate_verify -> bool,
        has_server_finished -> bool,
        has_client_finished -> bool,
        handshake_finished -> bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertDescription;
    use crate::messages::KeyUpdate;

    #[test]
    fn sides() {
        assert_eq!(ClientHandshakeState::new().side(), ConnectionSide::Client);
        assert_eq!(ServerHandshakeState::new().side(), ConnectionSide::Server);
        assert_eq!(
            ServerHandshakeState::default().messages().side(),
            ConnectionSide::Server
        );
    }

    #[test]
    fn server_sends_wrapped_message() {
        let mut state = ServerHandshakeState::new();
        let sent = state
            .sending_message(EncryptedExtensions::default().into())
            .unwrap();
        assert!(matches!(sent, HandshakeMessageRef::EncryptedExtensions(_)));
        assert!(state.has_encrypted_extensions());
    }

    #[test]
    fn server_accepts_client_key_update() {
        let server = ServerHandshakeState::new();
        let update = KeyUpdate {
            request_peer_update: false,
        };
        assert!(matches!(
            server.received_post_handshake(update.into()),
            Ok(ClientPostHandshakeMessage::KeyUpdate(_))
        ));
    }

    #[test]
    fn illegal_inbound_maps_to_unexpected_message() {
        let mut client = ClientHandshakeState::new();
        let hello = ClientHello13 {
            random: [0; 32],
            legacy_session_id: vec![],
            cipher_suites: vec![],
            extensions: vec![],
        };
        let err = client.received(hello.into()).unwrap_err();
        assert_eq!(err.alert(), AlertDescription::UnexpectedMessage);
        assert!(!client.has_client_hello());
    }
}
