//! Identifier lookup strategies.
//!
//! Several registry endpoints accept one of three mutually exclusive ways of
//! naming a person. [`Lookup`] is the resolved choice; [`IdentifierQuery`]
//! collects whatever the caller has and resolves it in a fixed priority order.

use serde::{Deserialize, Serialize};

/// Exactly one way of identifying a registry entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Lookup {
  /// An identifier issued by an external source system, e.g. an employee id
  /// from source `1`.
  ExternalId { source: u32, id: String },
  /// The registry-assigned identifier.
  Regid(String),
  /// A network identity (login name).
  Netid(String),
}

/// Caller-supplied identifiers, any of which may be absent.
///
/// When more than one is set, [`resolve`](Self::resolve) picks by priority:
/// external id (only together with its source), then regid, then netid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierQuery {
  external: Option<(u32, String)>,
  regid:    Option<String>,
  netid:    Option<String>,
}

impl IdentifierQuery {
  pub fn new() -> Self { Self::default() }

  pub fn netid(netid: impl Into<String>) -> Self {
    Self::new().with_netid(netid)
  }

  pub fn regid(regid: impl Into<String>) -> Self {
    Self::new().with_regid(regid)
  }

  pub fn external(source: u32, id: impl Into<String>) -> Self {
    Self::new().with_external(source, id)
  }

  pub fn with_netid(mut self, netid: impl Into<String>) -> Self {
    self.netid = Some(netid.into());
    self
  }

  pub fn with_regid(mut self, regid: impl Into<String>) -> Self {
    self.regid = Some(regid.into());
    self
  }

  pub fn with_external(mut self, source: u32, id: impl Into<String>) -> Self {
    self.external = Some((source, id.into()));
    self
  }

  /// Merge optional parts, as they arrive from loosely-typed callers such as
  /// command-line flags. An external id without a source is dropped.
  pub fn from_parts(
    source: Option<u32>,
    external_id: Option<String>,
    regid: Option<String>,
    netid: Option<String>,
  ) -> Self {
    Self {
      external: source.zip(external_id),
      regid,
      netid,
    }
  }

  /// Pick the highest-priority identifier, or `None` if nothing usable was
  /// supplied.
  pub fn resolve(&self) -> Option<Lookup> {
    if let Some((source, id)) = &self.external {
      return Some(Lookup::ExternalId {
        source: *source,
        id:     id.clone(),
      });
    }
    if let Some(regid) = &self.regid {
      return Some(Lookup::Regid(regid.clone()));
    }
    self.netid.clone().map(Lookup::Netid)
  }
}

impl From<Lookup> for IdentifierQuery {
  fn from(lookup: Lookup) -> Self {
    match lookup {
      Lookup::ExternalId { source, id } => Self::external(source, id),
      Lookup::Regid(regid) => Self::regid(regid),
      Lookup::Netid(netid) => Self::netid(netid),
    }
  }
}
