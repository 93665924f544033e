//! Core types and trait definitions for the IRWS client.
//!
//! This crate is deliberately free of HTTP and JSON-envelope handling. It
//! holds the passive record types returned by the registry, the identifier
//! lookup strategies, and the [`Transport`](transport::Transport) boundary
//! that the client crate drives.

pub mod de;
pub mod error;
pub mod generic;
pub mod lookup;
pub mod record;
pub mod transport;
pub mod version;

pub use error::{Error, Result};
pub use lookup::{IdentifierQuery, Lookup};
pub use transport::{Method, Response, Transport};
pub use version::ApiVersion;
