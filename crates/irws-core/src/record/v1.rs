//! Records whose layout is specific to the v1 protocol.

use serde::{Deserialize, Serialize};

use crate::{de, record::default_publish};

/// Password-recovery profile with discrete email and SMS fields.
///
/// Only the fields the server returned are set. When sent back in an update,
/// unset fields are omitted so the server leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryProfile {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub validid:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recover_email:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recover_email_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recover_sms:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recover_sms_date:   Option<String>,
  #[serde(
    default,
    deserialize_with = "de::opt_string_or_number",
    skip_serializing_if = "Option::is_none"
  )]
  pub recover_block_code: Option<String>,
}

/// A student-system person with discrete category/source/status pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPerson {
  pub validid:       String,
  pub regid:         String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub studentid:     String,
  pub birthdate:     Option<String>,
  pub fname:         Option<String>,
  pub lname:         Option<String>,
  #[serde(deserialize_with = "de::string_or_number")]
  pub category_code: String,
  pub category_name: String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub source_code:   String,
  pub source_name:   String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub status_code:   String,
  pub status_name:   String,
  pub pac:           Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:       Option<String>,
  #[serde(default = "default_publish")]
  pub wp_publish:    String,
}

impl StudentPerson {
  pub fn publishes(&self) -> bool { self.wp_publish.eq_ignore_ascii_case("y") }
}

/// A manually maintained person record (sponsored guests and the like).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalPerson {
  pub validid:       String,
  pub regid:         String,
  pub lname:         String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub category_code: String,
  pub category_name: String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub source_code:   String,
  pub source_name:   String,
  #[serde(deserialize_with = "de::string_or_number")]
  pub status_code:   String,
  pub status_name:   String,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub comment_code:  Option<String>,
  pub comment_name:  Option<String>,
  pub college:       Option<String>,
  #[serde(default, deserialize_with = "de::opt_string_or_number")]
  pub in_feed:       Option<String>,
}
