//! The registry API version segment.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Wire protocol version, rendered as the `v1`/`v2` path segment.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
  #[default]
  V1,
  V2,
}

impl ApiVersion {
  pub fn segment(self) -> &'static str {
    match self {
      Self::V1 => "v1",
      Self::V2 => "v2",
    }
  }
}

impl fmt::Display for ApiVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.segment())
  }
}

impl FromStr for ApiVersion {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "v1" | "1" => Ok(Self::V1),
      "v2" | "2" => Ok(Self::V2),
      _ => Err(Error::UnknownApiVersion(s.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_segment_and_bare_number() {
    assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
    assert_eq!("V2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
    assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
  }

  #[test]
  fn rejects_unknown_version() {
    let err = "v3".parse::<ApiVersion>().unwrap_err();
    assert!(matches!(err, Error::UnknownApiVersion(s) if s == "v3"));
  }

  #[test]
  fn display_matches_path_segment() {
    assert_eq!(ApiVersion::V2.to_string(), "v2");
  }
}
