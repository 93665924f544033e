//! Request path construction.
//!
//! Every path starts with `/{service}/{version}`. Caller-supplied values are
//! always encoded: query values with form encoding, path segments with
//! percent encoding. The fixed `validid=<kind>=` prefixes stay literal.

use irws_core::{ApiVersion, Lookup};
use url::form_urlencoded;

/// Form-encode a query-string value.
pub(crate) fn query_value(value: &str) -> String {
  form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
  // Form encoding escapes `+` itself, so any `+` left over is a space.
  query_value(value).replace('+', "%20")
}

/// Which key a netid is sent under.
#[derive(Clone, Copy)]
enum NetidKey {
  /// `uwnetid=<netid>`
  Bare,
  /// `validid=uwnetid=<netid>`
  Validid,
}

pub(crate) struct Paths<'a> {
  service: &'a str,
  version: ApiVersion,
}

impl<'a> Paths<'a> {
  pub(crate) fn new(service: &'a str, version: ApiVersion) -> Self {
    Self { service, version }
  }

  fn prefix(&self) -> String { format!("/{}/{}", self.service, self.version) }

  fn lookup_query(lookup: &Lookup, netid_key: NetidKey) -> String {
    match (lookup, netid_key) {
      (Lookup::ExternalId { source, id }, _) => {
        format!("validid={source}={}", query_value(id))
      }
      (Lookup::Regid(regid), _) => format!("validid=regid={}", query_value(regid)),
      (Lookup::Netid(netid), NetidKey::Validid) => {
        format!("validid=uwnetid={}", query_value(netid))
      }
      (Lookup::Netid(netid), NetidKey::Bare) => {
        format!("uwnetid={}", query_value(&netid.to_lowercase()))
      }
    }
  }

  // ── Identity lookups ────────────────────────────────────────────────────

  pub(crate) fn uwnetid(&self, lookup: &Lookup, status: Option<u32>) -> String {
    let mut path = format!(
      "{}/uwnetid?{}",
      self.prefix(),
      Self::lookup_query(lookup, NetidKey::Validid)
    );
    if let Some(status) = status {
      path.push_str(&format!("&status={status}"));
    }
    path
  }

  pub(crate) fn person(&self, lookup: &Lookup) -> String {
    format!(
      "{}/person?{}",
      self.prefix(),
      Self::lookup_query(lookup, NetidKey::Bare)
    )
  }

  pub(crate) fn regid(&self, lookup: &Lookup) -> String {
    format!(
      "{}/regid?{}",
      self.prefix(),
      Self::lookup_query(lookup, NetidKey::Bare)
    )
  }

  pub(crate) fn name(&self, netid: &str) -> String {
    format!("{}/name/uwnetid={}", self.prefix(), segment(&netid.to_lowercase()))
  }

  // ── Recovery profile ────────────────────────────────────────────────────

  pub(crate) fn profile(&self, netid: &str) -> String {
    format!("{}/profile/validid=uwnetid={}", self.prefix(), segment(netid))
  }

  // ── Source-system people ────────────────────────────────────────────────

  pub(crate) fn source_person(&self, source: &str, id: &str) -> String {
    format!("{}/person/{}/{}", self.prefix(), segment(source), segment(id))
  }

  pub(crate) fn source_pac(&self, source: &str, id: &str) -> String {
    format!("{}/pac", self.source_person(source, id))
  }

  pub(crate) fn sdb_pac_check(&self, studentid: &str, pac: &str) -> String {
    format!(
      "{}/?pac={}",
      self.source_person("sdb", studentid),
      query_value(pac)
    )
  }

  /// `uri` comes from the server (a person's identifier list) and is used as
  /// given.
  pub(crate) fn generic(&self, uri: &str) -> String {
    if uri.starts_with('/') {
      format!("{}{uri}", self.prefix())
    } else {
      format!("{}/{uri}", self.prefix())
    }
  }

  // ── Subscriptions ───────────────────────────────────────────────────────

  pub(crate) fn subscription(&self, netid: &str, code: u32) -> String {
    format!(
      "{}/subscription?uwnetid={}&subscription={code}",
      self.prefix(),
      query_value(&netid.to_lowercase())
    )
  }

  pub(crate) fn subscription_item(&self, code: u32, netid: &str) -> String {
    format!("{}/subscription/{code}/{}", self.prefix(), segment(netid))
  }

  pub(crate) fn subscription_pac(&self, code: u32, netid: &str) -> String {
    format!("{}/pac", self.subscription_item(code, netid))
  }

  // ── Challenge questions ─────────────────────────────────────────────────

  pub(crate) fn qna(&self, netid: &str) -> String {
    format!("{}/qna?uwnetid={}", self.prefix(), query_value(netid))
  }

  pub(crate) fn qna_check(&self, ordinal: &str, netid: &str, answer: &str) -> String {
    format!(
      "{}/qna/{}/{}/check?ans={}",
      self.prefix(),
      segment(ordinal),
      segment(netid),
      query_value(answer)
    )
  }
}
