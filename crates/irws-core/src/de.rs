//! Lenient field deserializers.
//!
//! The registry is not consistent about whether codes arrive as JSON numbers
//! or numeric strings, or whether flags are booleans or `"Y"`/`"N"`. These
//! helpers accept every observed spelling and normalise it.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

fn scalar_to_string(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// A code that may be a JSON string or number, kept as a string.
pub fn string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(d)?;
  let shown = value.to_string();
  scalar_to_string(value).ok_or_else(|| {
    D::Error::custom(format!("expected string or number, got {shown}"))
  })
}

/// Optional variant of [`string_or_number`]; `null` maps to `None`.
///
/// Use together with `#[serde(default)]` so an absent key is also `None`.
pub fn opt_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(d)? {
    Value::Null => Ok(None),
    other => {
      let shown = other.to_string();
      scalar_to_string(other).map(Some).ok_or_else(|| {
        D::Error::custom(format!("expected string or number, got {shown}"))
      })
    }
  }
}

/// A list of codes, each a JSON string or number. `null` is an empty list.
pub fn string_or_number_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(d)? {
    Value::Null => Ok(Vec::new()),
    Value::Array(items) => items
      .into_iter()
      .map(|item| {
        let shown = item.to_string();
        scalar_to_string(item).ok_or_else(|| {
          D::Error::custom(format!("expected string or number, got {shown}"))
        })
      })
      .collect(),
    other => Err(D::Error::custom(format!("expected a list, got {other}"))),
  }
}

fn value_to_u64<E: serde::de::Error>(value: &Value) -> Result<u64, E> {
  match value {
    Value::Number(n) => n
      .as_u64()
      .ok_or_else(|| E::custom(format!("expected unsigned integer, got {n}"))),
    Value::String(s) => s
      .trim()
      .parse::<u64>()
      .map_err(|_| E::custom(format!("expected numeric string, got {s:?}"))),
    other => Err(E::custom(format!("expected integer, got {other}"))),
  }
}

/// An unsigned integer that may be quoted.
pub fn u64_lenient<'de, D>(d: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  value_to_u64(&Value::deserialize(d)?)
}

/// A `u32` code that may be quoted.
pub fn u32_lenient<'de, D>(d: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  let n = value_to_u64::<D::Error>(&Value::deserialize(d)?)?;
  u32::try_from(n).map_err(|_| D::Error::custom(format!("{n} overflows u32")))
}

/// Optional variant of [`u32_lenient`]; `null` maps to `None`.
pub fn opt_u32_lenient<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(d)? {
    Value::Null => Ok(None),
    other => {
      let n = value_to_u64::<D::Error>(&other)?;
      u32::try_from(n)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("{n} overflows u32")))
    }
  }
}

/// A yes/no flag: `true`, `"Y"`, `"yes"`, `"true"` or a non-zero number.
/// `null` and anything else count as unset.
pub fn flag<'de, D>(d: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(d)? {
    Value::Bool(b) => b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => {
      matches!(s.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "true")
    }
    _ => false,
  })
}
