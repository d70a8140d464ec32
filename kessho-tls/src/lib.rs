#![deny(unsafe_code)]

//! # kessho-tls
//!
//! A store for the messages of one TLS handshake, with role-checked views
//! for the client and the server.
//!
//! The store keeps each message kind in its own write-once slot. The
//! [`HandshakeState`] facade sits on top and enforces who may say what:
//! a client cannot record an outbound ServerHello (compile error), and a
//! server that receives one reports `unexpected_message` without touching
//! the store.
//!
//! ## Properties
//!
//! - Role legality fixed by closed message sets, not runtime tables
//! - Storing twice or reading an empty slot is an error, never a panic
//! - Finished MACs compared in constant time and zeroized on drop

pub mod alert;
pub mod error;
pub mod messages;
pub mod state;
pub mod store;

pub use alert::AlertDescription;
pub use error::Error;
pub use messages::{ConnectionSide, HandshakeMessage, HandshakeType, PostHandshakeMessage};
pub use state::{Client, ClientHandshakeState, HandshakeState, Role, Server, ServerHandshakeState};
pub use store::MessageStore;
