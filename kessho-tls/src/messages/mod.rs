//! Handshake message types and the closed sets they are grouped into.
//!
//! [`HandshakeMessage`] is every message the store can hold and
//! [`PostHandshakeMessage`] covers the messages allowed once the handshake
//! has finished. Each set has per-role subsets, and converting into a subset
//! is how role legality is enforced:
//!
//! * `From<T>` exists only for the message types a role may use, so
//!   outbound misuse does not compile.
//! * `TryFrom<HandshakeMessage>` checks inbound messages at runtime and
//!   hands the message back when the role may not receive it.

use core::fmt;

mod certificate;
mod finished;
mod hello;
mod post_handshake;

pub use certificate::{Certificate13, CertificateEntry, CertificateRequest13, CertificateVerify13};
pub use finished::Finished13;
pub use hello::{
    ClientHello12, ClientHello13, EncryptedExtensions, HELLO_RETRY_REQUEST_RANDOM,
    HelloRetryRequest, ServerHello12, ServerHello13, TLS11_DOWNGRADE_MARKER,
    TLS12_DOWNGRADE_MARKER,
};
pub use post_handshake::{KeyUpdate, NewSessionTicket13};

/// Which end of the connection a store or message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionSide {
    Client,
    Server,
}

impl ConnectionSide {
    /// The other end.
    pub fn peer(self) -> Self {
        match self {
            Self::Client => Self::Server,
            Self::Server => Self::Client,
        }
    }
}

impl fmt::Display for ConnectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Client => "client",
            Self::Server => "server",
        })
    }
}

/// Handshake message type.
///
/// HelloRetryRequest is a ServerHello on the wire but is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    ClientHello,
    ServerHello,
    HelloRetryRequest,
    NewSessionTicket,
    EncryptedExtensions,
    Certificate,
    CertificateRequest,
    CertificateVerify,
    Finished,
    KeyUpdate,
}

impl HandshakeType {
    /// The `msg_type` byte (RFC 8446 Section 4).
    pub fn wire_code(self) -> u8 {
        match self {
            Self::ClientHello => 1,
            Self::ServerHello | Self::HelloRetryRequest => 2,
            Self::NewSessionTicket => 4,
            Self::EncryptedExtensions => 8,
            Self::Certificate => 11,
            Self::CertificateRequest => 13,
            Self::CertificateVerify => 15,
            Self::Finished => 20,
            Self::KeyUpdate => 24,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientHello => "client_hello",
            Self::ServerHello => "server_hello",
            Self::HelloRetryRequest => "hello_retry_request",
            Self::NewSessionTicket => "new_session_ticket",
            Self::EncryptedExtensions => "encrypted_extensions",
            Self::Certificate => "certificate",
            Self::CertificateRequest => "certificate_request",
            Self::CertificateVerify => "certificate_verify",
            Self::Finished => "finished",
            Self::KeyUpdate => "key_update",
        }
    }
}

impl fmt::Display for HandshakeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw extension: type code and opaque body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub extension_type: u16,
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(extension_type: u16, data: Vec<u8>) -> Self {
        Self {
            extension_type,
            data,
        }
    }
}

/// Implemented by every concrete message type.
pub trait Message {
    const TYPE: HandshakeType;
}

macro_rules! message_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident($ty:ty)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl $name {
            pub fn handshake_type(&self) -> HandshakeType {
                match self {
                    $(Self::$variant(_) => <$ty as Message>::TYPE),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )+
    };
    (
        $(#[$meta:meta])*
        $name:ident within $all:ident { $($variant:ident($ty:ty)),+ $(,)? }
    ) => {
        message_set! {
            $(#[$meta])*
            $name { $($variant($ty)),+ }
        }

        impl From<$name> for $all {
            fn from(message: $name) -> Self {
                match message {
                    $($name::$variant(m) => Self::$variant(m)),+
                }
            }
        }

        impl TryFrom<$all> for $name {
            type Error = $all;

            #[allow(unreachable_patterns)]
            fn try_from(message: $all) -> Result<Self, $all> {
                match message {
                    $($all::$variant(m) => Ok(Self::$variant(m)),)+
                    other => Err(other),
                }
            }
        }
    };
}

message_set! {
    /// Every handshake message the store can hold.
    HandshakeMessage {
        ClientHello(ClientHello13),
        ClientHello12(ClientHello12),
        ServerHello(ServerHello13),
        ServerHello12(ServerHello12),
        HelloRetryRequest(HelloRetryRequest),
        EncryptedExtensions(EncryptedExtensions),
        CertificateRequest(CertificateRequest13),
        Certificate(Certificate13),
        CertificateVerify(CertificateVerify13),
        Finished(Finished13),
    }
}

message_set! {
    /// Messages exchanged after the handshake completed.
    PostHandshakeMessage {
        NewSessionTicket(NewSessionTicket13),
        KeyUpdate(KeyUpdate),
    }
}

message_set! {
    /// Handshake messages a client sends and a server receives.
    ClientHandshakeMessage within HandshakeMessage {
        ClientHello(ClientHello13),
        ClientHello12(ClientHello12),
        Certificate(Certificate13),
        CertificateVerify(CertificateVerify13),
        Finished(Finished13),
    }
}

message_set! {
    /// Handshake messages a server sends and a client receives.
    ServerHandshakeMessage within HandshakeMessage {
        ServerHello(ServerHello13),
        ServerHello12(ServerHello12),
        HelloRetryRequest(HelloRetryRequest),
        EncryptedExtensions(EncryptedExtensions),
        CertificateRequest(CertificateRequest13),
        Certificate(Certificate13),
        CertificateVerify(CertificateVerify13),
        Finished(Finished13),
    }
}

message_set! {
    /// Post-handshake messages a server sends.
    ServerPostHandshakeMessage within PostHandshakeMessage {
        NewSessionTicket(NewSessionTicket13),
        KeyUpdate(KeyUpdate),
    }
}

message_set! {
    /// Post-handshake messages a client sends.
    ClientPostHandshakeMessage within PostHandshakeMessage {
        KeyUpdate(KeyUpdate),
    }
}

/// A borrowed view of a stored handshake message.
#[derive(Debug, Clone, Copy)]
pub enum HandshakeMessageRef<'a> {
    ClientHello(&'a ClientHello13),
    ClientHello12(&'a ClientHello12),
    ServerHello(&'a ServerHello13),
    ServerHello12(&'a ServerHello12),
    HelloRetryRequest(&'a HelloRetryRequest),
    EncryptedExtensions(&'a EncryptedExtensions),
    CertificateRequest(&'a CertificateRequest13),
    Certificate(&'a Certificate13),
    CertificateVerify(&'a CertificateVerify13),
    Finished(&'a Finished13),
}

impl HandshakeMessageRef<'_> {
    pub fn handshake_type(&self) -> HandshakeType {
        match self {
            Self::ClientHello(_) | Self::ClientHello12(_) => HandshakeType::ClientHello,
            Self::ServerHello(_) | Self::ServerHello12(_) => HandshakeType::ServerHello,
            Self::HelloRetryRequest(_) => HandshakeType::HelloRetryRequest,
            Self::EncryptedExtensions(_) => HandshakeType::EncryptedExtensions,
            Self::CertificateRequest(_) => HandshakeType::CertificateRequest,
            Self::Certificate(_) => HandshakeType::Certificate,
            Self::CertificateVerify(_) => HandshakeType::CertificateVerify,
            Self::Finished(_) => HandshakeType::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypted_extensions() -> HandshakeMessage {
        EncryptedExtensions::default().into()
    }

    #[test]
    fn peer_is_involutive() {
        for side in [ConnectionSide::Client, ConnectionSide::Server] {
            assert_ne!(side.peer(), side);
            assert_eq!(side.peer().peer(), side);
        }
    }

    #[test]
    fn wire_codes() {
        assert_eq!(HandshakeType::ClientHello.wire_code(), 1);
        assert_eq!(
            HandshakeType::HelloRetryRequest.wire_code(),
            HandshakeType::ServerHello.wire_code()
        );
        assert_eq!(HandshakeType::Finished.wire_code(), 20);
        assert_eq!(HandshakeType::KeyUpdate.to_string(), "key_update");
    }

    #[test]
    fn server_subset_accepts_server_messages() {
        let msg = ServerHandshakeMessage::try_from(encrypted_extensions()).unwrap();
        assert_eq!(msg.handshake_type(), HandshakeType::EncryptedExtensions);
        let back: HandshakeMessage = msg.into();
        assert!(matches!(back, HandshakeMessage::EncryptedExtensions(_)));
    }

    #[test]
    fn client_subset_returns_rejected_message() {
        let rejected = ClientHandshakeMessage::try_from(encrypted_extensions()).unwrap_err();
        assert_eq!(rejected.handshake_type(), HandshakeType::EncryptedExtensions);
    }

    #[test]
    fn shared_kinds_belong_to_both_roles() {
        let fin: HandshakeMessage = Finished13::new(vec![1; 32]).into();
        assert!(ClientHandshakeMessage::try_from(fin.clone()).is_ok());
        assert!(ServerHandshakeMessage::try_from(fin).is_ok());
    }

    #[test]
    fn post_handshake_subsets() {
        let ticket: PostHandshakeMessage = NewSessionTicket13 {
            lifetime: 3600,
            age_add: 7,
            nonce: vec![0],
            ticket: vec![1, 2, 3],
            extensions: vec![],
        }
        .into();
        assert!(ClientPostHandshakeMessage::try_from(ticket.clone()).is_err());
        assert!(ServerPostHandshakeMessage::try_from(ticket).is_ok());

        let update: PostHandshakeMessage = KeyUpdate {
            request_peer_update: true,
        }
        .into();
        assert!(ClientPostHandshakeMessage::try_from(update.clone()).is_ok());
        assert!(ServerPostHandshakeMessage::try_from(update).is_ok());
    }
}
