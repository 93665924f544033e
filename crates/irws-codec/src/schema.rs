//! Protocol-version selection.
//!
//! The v1 and v2 wire formats share most record layouts. Where they differ,
//! a [`Schema`] names the record type to use; the client is generic over it,
//! so the version is fixed per client instance and can never be mixed up
//! between calls.

use std::fmt::Debug;

use irws_core::{
  ApiVersion,
  record::{v1, v2},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, decode_first, encode_envelope, resource};

mod sealed {
  pub trait Sealed {}
  impl Sealed for super::V1 {}
  impl Sealed for super::V2 {}
}

/// A registry protocol version and its version-specific record layouts.
pub trait Schema: sealed::Sealed + Send + Sync + 'static {
  const VERSION: ApiVersion;

  type Profile: Debug + Clone + Default + Serialize + DeserializeOwned;
  type StudentPerson: Debug + Clone + Serialize + DeserializeOwned;
  type SupplementalPerson: Debug + Clone + Serialize + DeserializeOwned;

  fn parse_profile(body: &[u8]) -> Result<Self::Profile> {
    decode_first(body, resource::PROFILE)
  }

  fn parse_student_person(body: &[u8]) -> Result<Self::StudentPerson> {
    decode_first(body, resource::PERSON)
  }

  fn parse_supplemental_person(
    body: &[u8],
  ) -> Result<Self::SupplementalPerson> {
    decode_first(body, resource::PERSON)
  }

  fn encode_profile(profile: &Self::Profile) -> Result<Vec<u8>> {
    encode_envelope(resource::PROFILE, profile)
  }
}

/// The first protocol version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1;

/// The current protocol, adding partner-affiliation people and the
/// service-center PIN workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V2;

impl Schema for V1 {
  const VERSION: ApiVersion = ApiVersion::V1;

  type Profile = v1::RecoveryProfile;
  type StudentPerson = v1::StudentPerson;
  type SupplementalPerson = v1::SupplementalPerson;
}

impl Schema for V2 {
  const VERSION: ApiVersion = ApiVersion::V2;

  type Profile = v2::RecoveryProfile;
  type StudentPerson = v2::StudentPerson;
  type SupplementalPerson = v2::SupplementalPerson;
}

impl V2 {
  pub fn parse_cascadia_person(body: &[u8]) -> Result<v2::CascadiaPerson> {
    decode_first(body, resource::PERSON)
  }

  pub fn parse_scca_person(body: &[u8]) -> Result<v2::SccaPerson> {
    decode_first(body, resource::PERSON)
  }
}
