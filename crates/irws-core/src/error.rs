//! Error types for `irws-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown API version: {0:?}")]
  UnknownApiVersion(String),

  #[error("attribute {0:?} is not a known generic person attribute")]
  UnknownAttribute(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
