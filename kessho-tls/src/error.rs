use thiserror::Error;

use crate::alert::AlertDescription;

/// Errors raised by the handshake message store and its role facades.
///
/// Both variants surface synchronously from the call that detected them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A sequencing error: reading a message that was never stored, or
    /// storing one twice. Usually a bug on this side, but a peer that sends
    /// the same legal message kind twice (two ServerHellos, say) also ends
    /// up here through `received`.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// The peer violated the protocol; the connection must be closed with
    /// `description`.
    #[error("{description}: {message}")]
    Alert {
        description: AlertDescription,
        message: &'static str,
    },
}

impl Error {
    pub(crate) fn unexpected_message(message: &'static str) -> Self {
        Self::Alert {
            description: AlertDescription::UnexpectedMessage,
            message,
        }
    }

    /// The alert to send when tearing the connection down because of this
    /// error. Internal errors map to `internal_error`.
    pub fn alert(&self) -> AlertDescription {
        match self {
            Self::InvalidState(_) => AlertDescription::InternalError,
            Self::Alert { description, .. } => *description,
        }
    }

    /// Whether the error was caused by the peer rather than by this side.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Alert { .. })
    }
}
