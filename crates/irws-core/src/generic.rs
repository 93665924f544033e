//! `GenericPerson`: a catch-all record for identifier-URI lookups.
//!
//! A [`Person`](crate::record::Person) lists the URIs of its source records,
//! and those can point at any person type the registry knows about. Rather
//! than guess the type, the client copies whatever it recognises from the
//! response into a generic record driven by [`ATTRIBUTES`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

// ─── Attribute table ─────────────────────────────────────────────────────────

/// The value an attribute takes when the server leaves it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDefault {
  Null,
  Text(&'static str),
  EmptyList,
}

impl AttributeDefault {
  pub fn to_value(self) -> Value {
    match self {
      Self::Null => Value::Null,
      Self::Text(s) => Value::String(s.to_string()),
      Self::EmptyList => Value::Array(Vec::new()),
    }
  }
}

/// Every attribute a generic person may carry, with its default.
///
/// This is the union of the fields of the typed person records. Response keys
/// outside this table are ignored.
#[rustfmt::skip]
pub const ATTRIBUTES: &[(&str, AttributeDefault)] = &[
  ("validid",            AttributeDefault::Null),
  ("regid",              AttributeDefault::Null),
  ("studentid",          AttributeDefault::Null),
  ("birthdate",          AttributeDefault::Null),
  ("fname",              AttributeDefault::Null),
  ("lname",              AttributeDefault::Null),
  ("wp_name",            AttributeDefault::Null),
  ("wp_publish",         AttributeDefault::Text("Y")),
  ("category_code",      AttributeDefault::Null),
  ("category_name",      AttributeDefault::Null),
  ("categories",         AttributeDefault::EmptyList),
  ("source_code",        AttributeDefault::Null),
  ("source_name",        AttributeDefault::Null),
  ("status_code",        AttributeDefault::Null),
  ("status_name",        AttributeDefault::Null),
  ("emp_ecs_code",       AttributeDefault::Null),
  ("emp_status_code",    AttributeDefault::Null),
  ("contact_email",      AttributeDefault::Null),
  ("workday_home_email", AttributeDefault::Null),
  ("org_supervisor",     AttributeDefault::Null),
  ("comment_code",       AttributeDefault::Null),
  ("comment_name",       AttributeDefault::Null),
  ("college",            AttributeDefault::Null),
  ("department",         AttributeDefault::Null),
  ("pac",                AttributeDefault::Null),
  ("in_feed",            AttributeDefault::Null),
];

fn known_attribute(name: &str) -> Option<&'static str> {
  ATTRIBUTES.iter().find(|(n, _)| *n == name).map(|(n, _)| *n)
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A person record whose attributes are limited to [`ATTRIBUTES`].
///
/// Every table attribute is always present; unset ones hold their default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GenericPerson {
  attributes: BTreeMap<&'static str, Value>,
}

impl Default for GenericPerson {
  fn default() -> Self {
    let attributes = ATTRIBUTES
      .iter()
      .map(|(name, default)| (*name, default.to_value()))
      .collect();
    Self { attributes }
  }
}

impl GenericPerson {
  /// Set a table attribute. Names outside the table are rejected.
  pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
    let key = known_attribute(name)
      .ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
    self.attributes.insert(key, value);
    Ok(())
  }

  /// The attribute's value, or `None` if `name` is not a table attribute.
  pub fn get(&self, name: &str) -> Option<&Value> { self.attributes.get(name) }

  /// The attribute's value when it is a string.
  pub fn get_str(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(Value::as_str)
  }

  pub fn validid(&self) -> Option<&str> { self.get_str("validid") }

  pub fn regid(&self) -> Option<&str> { self.get_str("regid") }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
    self.attributes.iter().map(|(k, v)| (*k, v))
  }
}
