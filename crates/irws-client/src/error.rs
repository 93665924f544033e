//! Error type for `irws-client`.

use std::borrow::Cow;

use serde_json::Value;
use thiserror::Error;

/// A registry call that completed with a status the operation does not
/// accept. Carries everything needed to inspect the failure; the client never
/// retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} returned status {status}")]
pub struct DataFailure {
  pub path:   String,
  pub status: u16,
  pub body:   Vec<u8>,
}

impl DataFailure {
  pub fn new(path: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
    Self {
      path: path.into(),
      status,
      body,
    }
  }

  pub fn body_text(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.body) }

  /// The registry's own error code from a `{"error": {"code": N}}` body.
  pub fn error_code(&self) -> Option<i64> {
    let body: Value = serde_json::from_slice(&self.body).ok()?;
    match body.pointer("/error/code")? {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("data failure: {0}")]
  DataFailure(#[from] DataFailure),

  /// The response arrived but its body did not have the expected shape.
  #[error("codec error: {0}")]
  Codec(#[from] irws_codec::Error),

  /// The transport could not complete the exchange.
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn as_data_failure(&self) -> Option<&DataFailure> {
    match self {
      Self::DataFailure(f) => Some(f),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
