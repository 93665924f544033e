//! [`IrwsClient`]: registry operations over a [`Transport`].

use std::marker::PhantomData;

use irws_codec::{Schema, V1, V2};
use irws_core::{
  ApiVersion, IdentifierQuery, Method, Response, Transport,
  generic::GenericPerson,
  record::{
    ChallengeQuestion, EmployeePerson, Name, NetworkIdentity, Pac, Person,
    Regid, Subscription, v1, v2,
  },
};
use tracing::debug;

use crate::{
  ClientConfig, DEFAULT_HR_SOURCE, DataFailure, Error, Result, path::Paths,
};

pub(crate) const ACCEPT_JSON: &[(&str, &str)] = &[("Accept", "application/json")];
pub(crate) const SEND_JSON: &[(&str, &str)] = &[
  ("Accept", "application/json"),
  ("Content-Type", "application/json"),
];

// ─── Client ──────────────────────────────────────────────────────────────────

/// A registry client bound to one transport and one protocol version.
///
/// The schema parameter selects the `v1`/`v2` path segment and the
/// version-specific record layouts. Operations that exist in only one
/// version are only available on that version's client.
pub struct IrwsClient<T, S = V1> {
  transport: T,
  config:    ClientConfig,
  schema:    PhantomData<S>,
}

impl<T: Transport, S: Schema> IrwsClient<T, S> {
  pub fn new(transport: T, config: ClientConfig) -> Self {
    Self {
      transport,
      config,
      schema: PhantomData,
    }
  }

  pub fn config(&self) -> &ClientConfig { &self.config }

  pub fn version(&self) -> ApiVersion { S::VERSION }

  pub(crate) fn paths(&self) -> Paths<'_> {
    Paths::new(&self.config.service_name, S::VERSION)
  }

  // ── Exchange helpers ────────────────────────────────────────────────────

  pub(crate) fn send(
    &self,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
  ) -> Result<Response> {
    let response = self
      .transport
      .request(method, path, headers, body)
      .map_err(|e| Error::Transport(Box::new(e)))?;
    debug!(%method, path, status = response.status, "irws request");
    Ok(response)
  }

  pub(crate) fn get(&self, path: &str) -> Result<Response> {
    self.send(Method::Get, path, ACCEPT_JSON, None)
  }

  /// GET with the read-path status policy: 200 yields the body, 404 yields
  /// `None`, anything else is a [`DataFailure`].
  fn read(&self, path: String) -> Result<Option<Vec<u8>>> {
    let response = self.get(&path)?;
    match response.status {
      200 => Ok(Some(response.body)),
      404 => Ok(None),
      status => Err(DataFailure::new(path, status, response.body).into()),
    }
  }

  fn read_parsed<R>(
    &self,
    path: String,
    parse: impl FnOnce(&[u8]) -> irws_codec::Result<R>,
  ) -> Result<Option<R>> {
    match self.read(path)? {
      Some(body) => Ok(Some(parse(&body)?)),
      None => Ok(None),
    }
  }

  // ── Identities ──────────────────────────────────────────────────────────

  /// The first network identity matching `query`, optionally restricted to
  /// a status code. Returns `None` without any request if `query` names no
  /// identifier.
  pub fn get_uwnetid(
    &self,
    query: &IdentifierQuery,
    status: Option<u32>,
  ) -> Result<Option<NetworkIdentity>> {
    let Some(lookup) = query.resolve() else {
      debug!("uwnetid lookup without an identifier");
      return Ok(None);
    };
    self.read_parsed(
      self.paths().uwnetid(&lookup, status),
      irws_codec::parse_uwnetid,
    )
  }

  /// Every network identity matching `query`. Not found is an empty list.
  pub fn get_uwnetids(
    &self,
    query: &IdentifierQuery,
    status: Option<u32>,
  ) -> Result<Vec<NetworkIdentity>> {
    let Some(lookup) = query.resolve() else {
      debug!("uwnetid lookup without an identifier");
      return Ok(Vec::new());
    };
    Ok(
      self
        .read_parsed(
          self.paths().uwnetid(&lookup, status),
          irws_codec::parse_uwnetids,
        )?
        .unwrap_or_default(),
    )
  }

  pub fn get_person(&self, query: &IdentifierQuery) -> Result<Option<Person>> {
    let Some(lookup) = query.resolve() else {
      debug!("person lookup without an identifier");
      return Ok(None);
    };
    self.read_parsed(self.paths().person(&lookup), irws_codec::parse_person)
  }

  pub fn get_regid(&self, query: &IdentifierQuery) -> Result<Option<Regid>> {
    let Some(lookup) = query.resolve() else {
      debug!("regid lookup without an identifier");
      return Ok(None);
    };
    self.read_parsed(self.paths().regid(&lookup), irws_codec::parse_regid)
  }

  pub fn get_name_by_netid(&self, netid: &str) -> Result<Option<Name>> {
    self.read_parsed(self.paths().name(netid), irws_codec::parse_name)
  }

  // ── Password recovery ───────────────────────────────────────────────────

  pub fn get_pw_recover_info(&self, netid: &str) -> Result<Option<S::Profile>> {
    self.read_parsed(
      self.paths().profile(&netid.to_lowercase()),
      S::parse_profile,
    )
  }

  /// Send a profile update and return the server's status code.
  ///
  /// Unlike reads, only server errors (5xx) fail; every other status,
  /// including 4xx rejections, is returned for the caller to check.
  pub fn put_pw_recover_info(
    &self,
    netid: &str,
    profile: &S::Profile,
  ) -> Result<u16> {
    let path = self.paths().profile(netid);
    let body = S::encode_profile(profile)?;
    let response = self.send(Method::Put, &path, SEND_JSON, Some(&body))?;
    if response.status >= 500 {
      return Err(DataFailure::new(path, response.status, response.body).into());
    }
    Ok(response.status)
  }

  // ── Source-system people ────────────────────────────────────────────────

  /// The HR record for employee id `eid`.
  pub fn get_uwhr_person(&self, eid: &str) -> Result<Option<EmployeePerson>> {
    self.get_uwhr_person_from(DEFAULT_HR_SOURCE, eid)
  }

  /// An HR-shaped record from an explicit source.
  pub fn get_uwhr_person_from(
    &self,
    source: &str,
    eid: &str,
  ) -> Result<Option<EmployeePerson>> {
    self.read_parsed(
      self.paths().source_person(source, eid),
      irws_codec::parse_employee_person,
    )
  }

  pub fn get_sdb_person(&self, id: &str) -> Result<Option<S::StudentPerson>> {
    self.read_parsed(
      self.paths().source_person("sdb", id),
      S::parse_student_person,
    )
  }

  pub fn get_supplemental_person(
    &self,
    id: &str,
  ) -> Result<Option<S::SupplementalPerson>> {
    self.read_parsed(
      self.paths().source_person("supplemental", id),
      S::parse_supplemental_person,
    )
  }

  /// Fetch whatever record `uri` points at, typically one of
  /// [`Person::identifiers`].
  pub fn get_generic_person(&self, uri: &str) -> Result<Option<GenericPerson>> {
    self.read_parsed(self.paths().generic(uri), irws_codec::parse_generic_person)
  }

  // ── Subscriptions and PACs ──────────────────────────────────────────────

  pub fn get_subscription(
    &self,
    netid: &str,
    subscription: u32,
  ) -> Result<Option<Subscription>> {
    self.read_parsed(
      self.paths().subscription(netid, subscription),
      irws_codec::parse_subscription,
    )
  }

  /// Issue a PAC for an employee.
  pub fn put_pac(&self, eid: &str) -> Result<Pac> {
    self.put_pac_from(DEFAULT_HR_SOURCE, eid)
  }

  /// Issue a PAC against a person record from `source`. Any status other
  /// than 200, including 404, is a [`DataFailure`].
  pub fn put_pac_from(&self, source: &str, eid: &str) -> Result<Pac> {
    let path = self.paths().source_pac(source, eid);
    let response =
      self.send(Method::Put, &path, ACCEPT_JSON, Some(b"".as_slice()))?;
    if response.status != 200 {
      return Err(DataFailure::new(path, response.status, response.body).into());
    }
    Ok(irws_codec::parse_pac(&response.body)?)
  }

  /// Check a permanent student PAC. Returns 200 (match), 400 (mismatch) or
  /// 404 (no such student).
  pub fn verify_sdb_pac(&self, studentid: &str, pac: &str) -> Result<u16> {
    let path = self.paths().sdb_pac_check(studentid, pac);
    let response = self.get(&path)?;
    match response.status {
      200 | 400 | 404 => Ok(response.status),
      status => Err(DataFailure::new(path, status, response.body).into()),
    }
  }

  // ── Challenge questions ─────────────────────────────────────────────────

  /// The challenge questions on file for `netid`, in ordinal order as the
  /// server returns them.
  pub fn get_qna(&self, netid: &str) -> Result<Option<Vec<ChallengeQuestion>>> {
    self.read_parsed(self.paths().qna(netid), irws_codec::parse_qna)
  }
}

// ─── v1-only operations ──────────────────────────────────────────────────────

impl<T: Transport> IrwsClient<T, V1> {
  /// Replace only the recovery email and its date.
  pub fn put_pw_recover_email(
    &self,
    netid: &str,
    email: &str,
    date: &str,
  ) -> Result<u16> {
    let profile = v1::RecoveryProfile {
      recover_email: Some(email.to_string()),
      recover_email_date: Some(date.to_string()),
      ..Default::default()
    };
    self.put_pw_recover_info(netid, &profile)
  }

  /// Replace only the recovery SMS number and its date.
  pub fn put_pw_recover_sms(
    &self,
    netid: &str,
    sms: &str,
    date: &str,
  ) -> Result<u16> {
    let profile = v1::RecoveryProfile {
      recover_sms: Some(sms.to_string()),
      recover_sms_date: Some(date.to_string()),
      ..Default::default()
    };
    self.put_pw_recover_info(netid, &profile)
  }
}

// ─── v2-only operations ──────────────────────────────────────────────────────

impl<T: Transport> IrwsClient<T, V2> {
  /// Replace the recovery contact list, leaving block reasons untouched.
  pub fn put_recover_contacts(
    &self,
    netid: &str,
    contacts: Vec<v2::RecoveryContact>,
  ) -> Result<u16> {
    let profile = v2::RecoveryProfile {
      recover_contacts: contacts,
      ..Default::default()
    };
    self.put_pw_recover_info(netid, &profile)
  }

  pub fn get_cascadia_person(
    &self,
    id: &str,
  ) -> Result<Option<v2::CascadiaPerson>> {
    self.read_parsed(
      self.paths().source_person("cascadia", id),
      V2::parse_cascadia_person,
    )
  }

  pub fn get_scca_person(&self, id: &str) -> Result<Option<v2::SccaPerson>> {
    self.read_parsed(
      self.paths().source_person("scca", id),
      V2::parse_scca_person,
    )
  }
}
