//! Records whose layout is specific to the v2 protocol.
//!
//! v2 folds the discrete recovery email/SMS fields into a contact list,
//! replaces category code/name pairs with a list of category codes on the
//! newer person types, and adds the partner-affiliation records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{de, record::default_publish};

// ─── Password recovery ───────────────────────────────────────────────────────

/// The channel a recovery contact is reached through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
  Email,
  Sms,
  #[serde(untagged)]
  Other(String),
}

/// One entry of a v2 recovery contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryContact {
  #[serde(rename = "type")]
  pub kind:  ContactKind,
  pub value: String,
  /// When the contact was last confirmed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:  Option<String>,
}

impl RecoveryContact {
  pub fn email(address: impl Into<String>) -> Self {
    Self {
      kind:  ContactKind::Email,
      value: address.into(),
      date:  None,
    }
  }

  pub fn sms(number: impl Into<String>) -> Self {
    Self {
      kind:  ContactKind::Sms,
      value: number.into(),
      date:  None,
    }
  }
}

/// Password-recovery profile with a unified contact list.
///
/// Empty lists are omitted when the profile is sent as an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryProfile {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub validid:               Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub recover_contacts:      Vec<RecoveryContact>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub recover_block_reasons: Vec<String>,
}

// ─── People ──────────────────────────────────────────────────────────────────

/// A student-system person carrying a list of category codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPerson {
  pub validid:    String,
  pub regid:      String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub studentid:  String,
  pub birthdate:  Option<String>,
  pub fname:      Option<String>,
  pub lname:      Option<String>,
  #[serde(default, deserialize_with = "de::string_or_number_list")]
  pub categories: Vec<String>,
  pub pac:        Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:    Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub campus_id:  Option<String>,
  #[serde(default = "default_publish")]
  pub wp_publish: String,
}

impl StudentPerson {
  pub fn publishes(&self) -> bool { self.wp_publish.eq_ignore_ascii_case("y") }
}

/// A manually maintained person record with identity-proofing details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalPerson {
  pub validid:           String,
  pub regid:             String,
  pub lname:             String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub category_code:     String,
  pub category_name:     String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub source_code:       String,
  pub source_name:       String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub status_code:       String,
  pub status_name:       String,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub comment_code:      Option<String>,
  pub comment_name:      Option<String>,
  pub college:           Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:           Option<String>,
  /// How the person's identity was proofed, keyed by proofing attribute.
  #[serde(default)]
  pub identity_proofing: BTreeMap<String, Value>,
  #[serde(rename = "contact_email", default)]
  pub contact_emails:    Vec<String>,
}

/// A person affiliated through the Cascadia partner college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadiaPerson {
  pub validid:    String,
  pub regid:      String,
  pub lname:      String,
  #[serde(default, deserialize_with = "de::string_or_number_list")]
  pub categories: Vec<String>,
  pub birthdate:  Option<String>,
  pub department: Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:    Option<String>,
}

/// A person affiliated through the SCCA partner organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccaPerson {
  pub validid:     String,
  pub regid:       String,
  pub lname:       String,
  #[serde(default, deserialize_with = "de::string_or_number_list")]
  pub categories:  Vec<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub company_id:  Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub employee_id: Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:     Option<String>,
}
