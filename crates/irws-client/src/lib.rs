//! Typed client for the identity registry web service (IRWS).
//!
//! [`IrwsClient`] turns registry operations into paths, hands them to a
//! [`Transport`](irws_core::Transport), interprets the status code and parses
//! the body into [`irws_core`] records. It also runs the two multi-call
//! verification workflows: challenge questions and the service-center PIN.
//!
//! Every operation is a blocking exchange; nothing is cached or retried.
//!
//! ```no_run
//! # fn demo<T: irws_core::Transport>(transport: T) -> irws_client::Result<()> {
//! use irws_client::{ClientConfig, IrwsClient};
//! use irws_codec::V1;
//! use irws_core::IdentifierQuery;
//!
//! let client = IrwsClient::<_, V1>::new(transport, ClientConfig::new("registry"));
//! if let Some(id) = client.get_uwnetid(&IdentifierQuery::regid("ABC123"), None)? {
//!   println!("{} -> uid {}", id.uwnetid, id.uid);
//! }
//! # Ok(()) }
//! ```

mod client;
mod config;
mod path;
mod verify;

pub mod error;

pub use client::IrwsClient;
pub use config::{
  ClientConfig, DEFAULT_HR_SOURCE, DEFAULT_PIN_PENDING_STATUS_CODE,
  DEFAULT_PIN_SUBSCRIPTION_CODE,
};
pub use error::{DataFailure, Error, Result};
pub use verify::{
  CleanupOutcome, CleanupReport, PinVerification, normalize_answer,
};

#[cfg(test)]
mod tests;
