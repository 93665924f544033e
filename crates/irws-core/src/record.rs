//! Registry record types.
//!
//! Records are passive field bags. Required wire keys map to plain fields and
//! fail deserialization when absent; optional keys map to `Option` (or an
//! empty collection) and simply stay unset when the server omits them.
//!
//! Records whose layout differs between protocol versions live in [`v1`] and
//! [`v2`]; everything at this level is shared by both.

pub mod v1;
pub mod v2;

use serde::{Deserialize, Serialize};

use crate::de;

/// Default for the directory publishing flag when the server omits it.
pub(crate) fn default_publish() -> String { "Y".to_string() }

// ─── Identities ──────────────────────────────────────────────────────────────

/// A network identity (login name) bound to a registry id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentity {
  pub uwnetid: String,
  pub validid: String,
  /// Numeric POSIX-style uid.
  #[serde(deserialize_with = "de::u64_lenient")]
  pub uid:     u64,
}

/// A registry-assigned identifier and the entity it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regid {
  pub regid:       String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub entity_code: String,
  pub entity_name: String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub status_code: String,
  pub status_name: String,
}

/// The registry's person envelope: a regid, a name, and URIs of the source
/// records that make up the person.
///
/// Each entry of `identifiers` can be fetched with the client's generic
/// person lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub regid:       String,
  pub fname:       Option<String>,
  pub lname:       Option<String>,
  pub identifiers: Vec<String>,
}

// ─── Names ───────────────────────────────────────────────────────────────────

/// Formal and display name components with their privacy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
  pub validid:         String,
  pub formal_cname:    Option<String>,
  pub formal_fname:    Option<String>,
  #[serde(rename = "formal_sname")]
  pub formal_lname:    Option<String>,
  pub formal_privacy:  Option<String>,
  pub display_cname:   Option<String>,
  pub display_fname:   Option<String>,
  pub display_mname:   Option<String>,
  #[serde(rename = "display_sname")]
  pub display_lname:   Option<String>,
  pub display_privacy: Option<String>,
}

// ─── Source-system people ────────────────────────────────────────────────────

/// An employee record from the HR source.
///
/// The HR feed has been through two generations; older records carry
/// `hepps_type`/`hepps_status` where current ones carry
/// `emp_ecs_code`/`emp_status_code`. Both end up in the same fields here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePerson {
  pub validid:            String,
  pub regid:              String,
  pub studentid:          Option<String>,
  pub birthdate:          Option<String>,
  pub fname:              Option<String>,
  pub lname:              Option<String>,
  /// Whole-name part of the white-pages name.
  pub wp_name:            Option<String>,
  pub emp_ecs_code:       Option<String>,
  pub emp_status_code:    Option<String>,
  pub category_code:      String,
  pub category_name:      String,
  pub source_code:        String,
  pub source_name:        String,
  pub status_code:        String,
  pub status_name:        String,
  pub contact_email:      Option<String>,
  pub workday_home_email: Option<String>,
  pub org_supervisor:     Option<String>,
  pub pac:                Option<String>,
  pub in_feed:            Option<String>,
  /// White-pages publishing flag; `"Y"` unless the server says otherwise.
  pub wp_publish:         String,
}

impl EmployeePerson {
  pub fn publishes(&self) -> bool { self.wp_publish.eq_ignore_ascii_case("y") }
}

// ─── Subscriptions and codes ─────────────────────────────────────────────────

/// A person's enrollment in a numbered registry service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
  pub uwnetid:           String,
  #[serde(deserialize_with = "de::u32_lenient")]
  pub subscription_code: u32,
  pub subscription_name: String,
  #[serde(default, deserialize_with = "de::opt_u32_lenient")]
  pub status_code:       Option<u32>,
  pub status_name:       Option<String>,
  /// Whether a PAC has been issued against this subscription.
  #[serde(rename = "pac", default, deserialize_with = "de::flag")]
  pub pac_issued:        bool,
}

/// A short-lived access code issued to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pac {
  pub pac:        String,
  pub expiration: String,
}

/// One stored challenge question. The answer never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuestion {
  pub uwnetid:  String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub ordinal:  String,
  pub question: String,
}
