//! Response parsers.
//!
//! Pipeline:
//!   raw body
//!     └─ envelope()          → entries under the resource key
//!          └─ first()        → entry 0
//!               └─ record()  → typed record (required keys enforced)

use irws_core::{
  de,
  generic::{ATTRIBUTES, GenericPerson},
  record::{
    ChallengeQuestion, EmployeePerson, Name, NetworkIdentity, Pac, Person,
    Regid, Subscription,
  },
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  error::{Error, Result},
  resource,
};

// ─── Envelope helpers ────────────────────────────────────────────────────────

/// Unwrap `{"<resource>": [...]}` into its entries.
fn envelope(body: &[u8], resource: &'static str) -> Result<Vec<Value>> {
  let mut root: Value = serde_json::from_slice(body)?;
  match root.get_mut(resource).map(Value::take) {
    Some(Value::Array(entries)) => Ok(entries),
    _ => Err(Error::MissingEnvelope(resource)),
  }
}

/// Entry 0 of the envelope; any further entries are ignored.
fn first(body: &[u8], resource: &'static str) -> Result<Value> {
  envelope(body, resource)?
    .into_iter()
    .next()
    .ok_or(Error::EmptyEnvelope(resource))
}

fn record<T: DeserializeOwned>(entry: Value, resource: &'static str) -> Result<T> {
  serde_json::from_value(entry).map_err(|source| Error::Shape { resource, source })
}

/// Decode entry 0 of the `resource` envelope as `T`.
pub fn decode_first<T: DeserializeOwned>(
  body: &[u8],
  resource: &'static str,
) -> Result<T> {
  record(first(body, resource)?, resource)
}

/// Decode every entry of the `resource` envelope as `T`.
pub fn decode_all<T: DeserializeOwned>(
  body: &[u8],
  resource: &'static str,
) -> Result<Vec<T>> {
  envelope(body, resource)?
    .into_iter()
    .map(|entry| record(entry, resource))
    .collect()
}

// ─── Shared records ──────────────────────────────────────────────────────────

pub fn parse_uwnetid(body: &[u8]) -> Result<NetworkIdentity> {
  decode_first(body, resource::UWNETID)
}

/// Every network identity in the response, in server order.
pub fn parse_uwnetids(body: &[u8]) -> Result<Vec<NetworkIdentity>> {
  decode_all(body, resource::UWNETID)
}

pub fn parse_regid(body: &[u8]) -> Result<Regid> {
  decode_first(body, resource::REGID)
}

pub fn parse_name(body: &[u8]) -> Result<Name> {
  decode_first(body, resource::NAME)
}

pub fn parse_subscription(body: &[u8]) -> Result<Subscription> {
  decode_first(body, resource::SUBSCRIPTION)
}

/// PAC issuance answers under the `person` key.
pub fn parse_pac(body: &[u8]) -> Result<Pac> {
  decode_first(body, resource::PERSON)
}

/// All challenge questions, in server order.
pub fn parse_qna(body: &[u8]) -> Result<Vec<ChallengeQuestion>> {
  decode_all(body, resource::QNA)
}

#[derive(Deserialize)]
struct PersonEntry {
  identity: Person,
}

/// The person envelope nests its fields under `identity`.
pub fn parse_person(body: &[u8]) -> Result<Person> {
  decode_first::<PersonEntry>(body, resource::PERSON).map(|p| p.identity)
}

// ─── Employee person ─────────────────────────────────────────────────────────

/// Wire shape of an HR person, covering both feed generations.
#[derive(Deserialize)]
struct EmployeeEntry {
  validid:            String,
  regid:              String,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  studentid:          Option<String>,
  birthdate:          Option<String>,
  fname:              Option<String>,
  lname:              Option<String>,
  wp_name:            Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  hepps_type:         Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  hepps_status:       Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  emp_ecs_code:       Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  emp_status_code:    Option<String>,
  #[serde(deserialize_with = "de::string_or_number")]
  category_code:      String,
  category_name:      String,
  #[serde(deserialize_with = "de::string_or_number")]
  source_code:        String,
  source_name:        String,
  #[serde(deserialize_with = "de::string_or_number")]
  status_code:        String,
  status_name:        String,
  contact_email:      Option<String>,
  workday_home_email: Option<String>,
  org_supervisor:     Option<String>,
  pac:                Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  in_feed:            Option<String>,
  wp_publish:         Option<String>,
}

impl From<EmployeeEntry> for EmployeePerson {
  fn from(e: EmployeeEntry) -> Self {
    Self {
      validid:            e.validid,
      regid:              e.regid,
      studentid:          e.studentid,
      birthdate:          e.birthdate,
      fname:              e.fname,
      lname:              e.lname,
      // `wp_name` is `whole|first|last`; keep the whole name only.
      wp_name:            e
        .wp_name
        .map(|n| n.split('|').next().unwrap_or_default().to_string()),
      // Current keys win over legacy ones when both are present.
      emp_ecs_code:       e.emp_ecs_code.or(e.hepps_type),
      emp_status_code:    e.emp_status_code.or(e.hepps_status),
      category_code:      e.category_code,
      category_name:      e.category_name,
      source_code:        e.source_code,
      source_name:        e.source_name,
      status_code:        e.status_code,
      status_name:        e.status_name,
      contact_email:      e.contact_email,
      workday_home_email: e.workday_home_email,
      org_supervisor:     e.org_supervisor,
      pac:                e.pac,
      in_feed:            e.in_feed,
      wp_publish:         e.wp_publish.unwrap_or_else(|| "Y".to_string()),
    }
  }
}

pub fn parse_employee_person(body: &[u8]) -> Result<EmployeePerson> {
  decode_first::<EmployeeEntry>(body, resource::PERSON).map(Into::into)
}

// ─── Generic person ──────────────────────────────────────────────────────────

/// Copy every table attribute the response carries; the rest keep their
/// table default. Keys outside the table are dropped.
pub fn parse_generic_person(body: &[u8]) -> Result<GenericPerson> {
  let Value::Object(fields) = first(body, resource::PERSON)? else {
    return Err(Error::NotAnObject(resource::PERSON));
  };

  let mut person = GenericPerson::default();
  for (name, _) in ATTRIBUTES {
    if let Some(value) = fields.get(*name) {
      person.set(name, value.clone())?;
    }
  }
  Ok(person)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
