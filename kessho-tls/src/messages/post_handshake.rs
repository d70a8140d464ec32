use super::{Extension, HandshakeType, Message};

/// A resumption ticket issued by the server after the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSessionTicket13 {
    /// Seconds the ticket may be cached; at most seven days.
    pub lifetime: u32,
    pub age_add: u32,
    pub nonce: Vec<u8>,
    pub ticket: Vec<u8>,
    pub extensions: Vec<Extension>,
}

impl NewSessionTicket13 {
    pub const MAX_LIFETIME: u32 = 7 * 24 * 60 * 60;

    pub fn lifetime_is_valid(&self) -> bool {
        self.lifetime <= Self::MAX_LIFETIME
    }
}

impl Message for NewSessionTicket13 {
    const TYPE: HandshakeType = HandshakeType::NewSessionTicket;
}

/// Announces that the sender switched to new traffic keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUpdate {
    /// Ask the peer to update its own sending keys in turn.
    pub request_peer_update: bool,
}

impl Message for KeyUpdate {
    const TYPE: HandshakeType = HandshakeType::KeyUpdate;
}
