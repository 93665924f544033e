//! Error types for the irws-codec crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The body is not JSON at all, or a request body could not be encoded.
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("response has no {0:?} array")]
  MissingEnvelope(&'static str),

  #[error("{0:?} array is empty")]
  EmptyEnvelope(&'static str),

  #[error("{0:?} entry is not a JSON object")]
  NotAnObject(&'static str),

  /// A required key is missing or a value has the wrong type.
  #[error("malformed {resource} record: {source}")]
  Shape {
    resource: &'static str,
    #[source]
    source:   serde_json::Error,
  },

  #[error("core error: {0}")]
  Core(#[from] irws_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
