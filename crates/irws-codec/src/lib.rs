//! JSON codec for IRWS responses and request bodies.
//!
//! Every registry response wraps its payload in a single-key object whose key
//! names the resource and whose value is always an array, e.g.
//! `{"regid": [{...}]}`. This crate unwraps that envelope and turns entries
//! into [`irws_core`] records. Pure synchronous; no HTTP dependencies.
//!
//! Layouts that differ between protocol versions are selected through the
//! [`Schema`] type parameter ([`V1`] or [`V2`]).
//!
//! # Quick start
//!
//! ```no_run
//! use irws_codec::{Schema, V2};
//!
//! let body = br#"{"profile":[{"recover_contacts":[{"type":"email","value":"a@example.com"}]}]}"#;
//! let profile = V2::parse_profile(body).unwrap();
//! println!("{} contacts", profile.recover_contacts.len());
//! ```

pub mod error;
mod parse;
mod schema;
mod serialize;

pub use error::{Error, Result};
pub use parse::{
  decode_all, decode_first, parse_employee_person, parse_generic_person,
  parse_name, parse_pac, parse_person, parse_qna, parse_regid,
  parse_subscription, parse_uwnetid, parse_uwnetids,
};
pub use schema::{Schema, V1, V2};
pub use serialize::{encode_envelope, encode_pin_submission};

/// Top-level envelope keys, one per resource type.
pub mod resource {
  pub const PERSON: &str = "person";
  pub const REGID: &str = "regid";
  pub const NAME: &str = "name";
  pub const UWNETID: &str = "uwnetid";
  pub const SUBSCRIPTION: &str = "subscription";
  pub const QNA: &str = "qna";
  pub const PROFILE: &str = "profile";
}
