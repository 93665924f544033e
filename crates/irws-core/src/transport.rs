//! The `Transport` trait, the boundary to the HTTP data-access layer.
//!
//! Connection setup, TLS, authentication and timeouts all live behind this
//! trait. The client crate only hands it an already-namespaced path and reads
//! back a status code and the raw body bytes; it never interprets transport
//! internals.

use std::fmt;

// ─── Request / response ──────────────────────────────────────────────────────

/// HTTP methods used by the registry client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Put,
  Delete,
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A raw response: status code plus undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
  pub status: u16,
  pub body:   Vec<u8>,
}

impl Response {
  pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  pub fn is_ok(&self) -> bool { self.status == 200 }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A synchronous request/response exchange with the registry service.
///
/// Implementations must not interpret the status code: a 404 or 500 is a
/// successful exchange from the transport's point of view. `Err` is reserved
/// for failures to complete the exchange at all.
pub trait Transport {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Issue one request. `path` already carries the service namespace and the
  /// version segment, e.g. `/registry/v2/person?uwnetid=alice`.
  fn request(
    &self,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
  ) -> Result<Response, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
  type Error = T::Error;

  fn request(
    &self,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
  ) -> Result<Response, Self::Error> {
    (**self).request(method, path, headers, body)
  }
}
