//! Request-body encoders.

use serde::Serialize;
use serde_json::Value;

use crate::{Result, resource};

/// Wrap `record` in the one-element array envelope the registry expects:
/// `{"<resource>": [record]}`.
pub fn encode_envelope<T: Serialize>(
  resource: &str,
  record: &T,
) -> Result<Vec<u8>> {
  let mut root = serde_json::Map::new();
  root.insert(
    resource.to_string(),
    Value::Array(vec![serde_json::to_value(record)?]),
  );
  Ok(serde_json::to_vec(&root)?)
}

/// Body of a PIN check submitted as an action against a subscription.
pub fn encode_pin_submission(pin: &str) -> Result<Vec<u8>> {
  encode_envelope(resource::SUBSCRIPTION, &PinAction {
    action: "verify_pin",
    pin,
  })
}

#[derive(Serialize)]
struct PinAction<'a> {
  action: &'static str,
  pin:    &'a str,
}
