//! Client tests against a scripted in-memory transport.

use std::{
  cell::RefCell,
  collections::{HashMap, VecDeque},
};

use irws_codec::{V1, V2};
use irws_core::{
  IdentifierQuery, Method, Response, Transport,
  record::{v1, v2},
};
use serde_json::{Value, json};

use crate::{CleanupOutcome, ClientConfig, Error, IrwsClient};

// ─── Mock transport ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("mock transport: {0}")]
struct MockError(String);

#[derive(Debug, Clone)]
struct Sent {
  method:  Method,
  path:    String,
  headers: Vec<(String, String)>,
  body:    Option<Vec<u8>>,
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
struct MockTransport {
  script: RefCell<VecDeque<Result<Response, String>>>,
  sent:   RefCell<Vec<Sent>>,
}

impl MockTransport {
  fn new() -> Self { Self::default() }

  fn reply(self, status: u16, body: Value) -> Self {
    let bytes = serde_json::to_vec(&body).unwrap();
    self
      .script
      .borrow_mut()
      .push_back(Ok(Response::new(status, bytes)));
    self
  }

  fn reply_raw(self, status: u16, body: &str) -> Self {
    self
      .script
      .borrow_mut()
      .push_back(Ok(Response::new(status, body.as_bytes())));
    self
  }

  fn fail(self, message: &str) -> Self {
    self.script.borrow_mut().push_back(Err(message.to_string()));
    self
  }

  fn sent(&self) -> Vec<Sent> { self.sent.borrow().clone() }

  fn paths(&self) -> Vec<String> {
    self.sent.borrow().iter().map(|s| s.path.clone()).collect()
  }
}

impl Transport for MockTransport {
  type Error = MockError;

  fn request(
    &self,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
  ) -> Result<Response, MockError> {
    self.sent.borrow_mut().push(Sent {
      method,
      path: path.to_string(),
      headers: headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
      body: body.map(<[u8]>::to_vec),
    });
    match self.script.borrow_mut().pop_front() {
      Some(Ok(response)) => Ok(response),
      Some(Err(message)) => Err(MockError(message)),
      None => Err(MockError(format!("unscripted request to {path}"))),
    }
  }
}

fn v1_client(t: &MockTransport) -> IrwsClient<&MockTransport, V1> {
  IrwsClient::new(t, ClientConfig::new("reg"))
}

fn v2_client(t: &MockTransport) -> IrwsClient<&MockTransport, V2> {
  IrwsClient::new(t, ClientConfig::new("reg"))
}

fn uwnetid_body() -> Value {
  json!({ "uwnetid": [
    { "uwnetid": "alice", "validid": "regid=ABC", "uid": 1001 },
    { "uwnetid": "alice-admin", "validid": "regid=ABC", "uid": 1002 },
  ]})
}

// ─── Identifier selection ────────────────────────────────────────────────────

#[test]
fn netid_only_uses_identity_keyed_query() {
  let t = MockTransport::new().reply(200, uwnetid_body());
  let id = v1_client(&t)
    .get_uwnetid(&IdentifierQuery::netid("alice"), None)
    .unwrap()
    .unwrap();
  assert_eq!(id.uwnetid, "alice");
  assert_eq!(t.paths(), vec!["/reg/v1/uwnetid?validid=uwnetid=alice"]);
  assert_eq!(t.sent()[0].method, Method::Get);
}

#[test]
fn regid_only_uses_regid_keyed_query() {
  let t = MockTransport::new().reply(200, uwnetid_body());
  v1_client(&t)
    .get_uwnetid(&IdentifierQuery::regid("ABC"), Some(30))
    .unwrap();
  assert_eq!(t.paths(), vec!["/reg/v1/uwnetid?validid=regid=ABC&status=30"]);
}

#[test]
fn external_id_takes_priority() {
  let t = MockTransport::new().reply(200, uwnetid_body());
  let q = IdentifierQuery::netid("alice")
    .with_regid("ABC")
    .with_external(1, "000123456");
  v1_client(&t).get_uwnetid(&q, None).unwrap();
  assert_eq!(t.paths(), vec!["/reg/v1/uwnetid?validid=1=000123456"]);
}

#[test]
fn no_identifier_issues_no_request() {
  let t = MockTransport::new();
  let client = v1_client(&t);
  let q = IdentifierQuery::new();
  assert_eq!(client.get_uwnetid(&q, None).unwrap(), None);
  assert!(client.get_uwnetids(&q, None).unwrap().is_empty());
  assert_eq!(client.get_person(&q).unwrap(), None);
  assert_eq!(client.get_regid(&q).unwrap(), None);
  assert!(t.sent().is_empty());
}

#[test]
fn identifier_values_are_encoded() {
  let t = MockTransport::new().reply(404, json!({}));
  v1_client(&t)
    .get_uwnetid(&IdentifierQuery::netid("a b&c"), None)
    .unwrap();
  assert_eq!(t.paths(), vec!["/reg/v1/uwnetid?validid=uwnetid=a+b%26c"]);
}

#[test]
fn get_uwnetids_returns_every_entry() {
  let t = MockTransport::new()
    .reply(200, uwnetid_body())
    .reply(404, json!({}));
  let client = v1_client(&t);
  let all = client
    .get_uwnetids(&IdentifierQuery::regid("ABC"), None)
    .unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[1].uwnetid, "alice-admin");

  let none = client
    .get_uwnetids(&IdentifierQuery::regid("XYZ"), None)
    .unwrap();
  assert!(none.is_empty());
}

// ─── Status interpretation ───────────────────────────────────────────────────

#[test]
fn not_found_is_none() {
  let t = MockTransport::new().reply(404, json!({}));
  let r = v1_client(&t).get_name_by_netid("alice").unwrap();
  assert_eq!(r, None);
}

#[test]
fn server_error_is_data_failure() {
  let t = MockTransport::new()
    .reply_raw(500, r#"{"error":{"code":7001,"message":"db down"}}"#);
  let err = v1_client(&t)
    .get_regid(&IdentifierQuery::netid("Alice"))
    .unwrap_err();
  let failure = err.as_data_failure().expect("data failure");
  assert_eq!(failure.path, "/reg/v1/regid?uwnetid=alice");
  assert_eq!(failure.status, 500);
  assert_eq!(failure.error_code(), Some(7001));
  assert!(failure.body_text().contains("db down"));
}

#[test]
fn unexpected_success_status_is_data_failure() {
  let t = MockTransport::new().reply(204, json!({}));
  let err = v1_client(&t).get_subscription("alice", 60).unwrap_err();
  assert_eq!(err.as_data_failure().unwrap().status, 204);
}

#[test]
fn malformed_body_is_codec_error() {
  let t = MockTransport::new().reply(200, json!({ "regid": [{ "regid": "A" }] }));
  let err = v1_client(&t)
    .get_regid(&IdentifierQuery::regid("A"))
    .unwrap_err();
  assert!(matches!(err, Error::Codec(_)));
}

#[test]
fn transport_failure_is_propagated() {
  let t = MockTransport::new().fail("connection refused");
  let err = v1_client(&t).get_qna("alice").unwrap_err();
  assert!(matches!(err, Error::Transport(_)));
  assert!(err.to_string().contains("connection refused"));
}

#[test]
fn reads_send_accept_header() {
  let t = MockTransport::new().reply(404, json!({}));
  v1_client(&t).get_sdb_person("1234567").unwrap();
  let sent = &t.sent()[0];
  assert_eq!(sent.path, "/reg/v1/person/sdb/1234567");
  assert!(
    sent
      .headers
      .contains(&("Accept".to_string(), "application/json".to_string()))
  );
  assert!(sent.body.is_none());
}

// ─── People ──────────────────────────────────────────────────────────────────

#[test]
fn person_by_netid_then_generic_identifiers() {
  let t = MockTransport::new()
    .reply(200, json!({ "person": [{ "identity": {
      "regid": "ABC", "fname": "Alice",
      "identifiers": ["/person/uwhr/000123"],
    }}]}))
    .reply(200, json!({ "person": [{
      "validid": "uwhr=000123", "regid": "ABC", "emp_ecs_code": "S",
    }]}));
  let client = v1_client(&t);
  let person = client
    .get_person(&IdentifierQuery::netid("ALICE"))
    .unwrap()
    .unwrap();
  let generic = client
    .get_generic_person(&person.identifiers[0])
    .unwrap()
    .unwrap();
  assert_eq!(generic.validid(), Some("uwhr=000123"));
  assert_eq!(generic.get_str("emp_ecs_code"), Some("S"));
  assert_eq!(
    t.paths(),
    vec!["/reg/v1/person?uwnetid=alice", "/reg/v1/person/uwhr/000123"]
  );
}

#[test]
fn hr_person_default_and_explicit_source() {
  let t = MockTransport::new()
    .reply(404, json!({}))
    .reply(404, json!({}));
  let client = v1_client(&t);
  assert!(client.get_uwhr_person("000123").unwrap().is_none());
  assert!(
    client
      .get_uwhr_person_from("uwhr_test", "000123")
      .unwrap()
      .is_none()
  );
  assert_eq!(
    t.paths(),
    vec!["/reg/v1/person/uwhr/000123", "/reg/v1/person/uwhr_test/000123"]
  );
}

#[test]
fn v2_partner_people() {
  let t = MockTransport::new()
    .reply(200, json!({ "person": [{
      "validid": "cascadia=5", "regid": "ABC", "lname": "Liddell",
      "categories": [22],
    }]}))
    .reply(404, json!({}));
  let client = v2_client(&t);
  let c = client.get_cascadia_person("5").unwrap().unwrap();
  assert_eq!(c.categories, vec!["22"]);
  assert!(client.get_scca_person("9").unwrap().is_none());
  assert_eq!(
    t.paths(),
    vec!["/reg/v2/person/cascadia/5", "/reg/v2/person/scca/9"]
  );
}

#[test]
fn version_selects_record_layout() {
  let body = json!({ "person": [{
    "validid": "sdb=1", "regid": "ABC", "studentid": "1",
    "categories": [1],
    "category_code": 1, "category_name": "Student",
    "source_code": 2, "source_name": "SDB",
    "status_code": 1, "status_name": "Active",
  }]});
  let t1 = MockTransport::new().reply(200, body.clone());
  let s1 = v1_client(&t1).get_sdb_person("1").unwrap().unwrap();
  assert_eq!(s1.category_name, "Student");

  let t2 = MockTransport::new().reply(200, body);
  let s2 = v2_client(&t2).get_sdb_person("1").unwrap().unwrap();
  assert_eq!(s2.categories, vec!["1"]);
  assert_eq!(t2.paths(), vec!["/reg/v2/person/sdb/1"]);
}

// ─── Recovery profile ────────────────────────────────────────────────────────

#[test]
fn v1_and_v2_profiles_do_not_bleed() {
  let body = json!({ "profile": [{
    "validid": "uwnetid=alice",
    "recover_email": "old@example.com",
    "recover_sms": "+12065550100",
    "recover_contacts": [{ "type": "email", "value": "new@example.com" }],
  }]});

  let t1 = MockTransport::new().reply(200, body.clone());
  let p1 = v1_client(&t1).get_pw_recover_info("Alice").unwrap().unwrap();
  assert_eq!(p1.recover_email.as_deref(), Some("old@example.com"));
  assert_eq!(p1.recover_sms.as_deref(), Some("+12065550100"));
  assert_eq!(t1.paths(), vec!["/reg/v1/profile/validid=uwnetid=alice"]);

  let t2 = MockTransport::new().reply(200, body);
  let p2 = v2_client(&t2).get_pw_recover_info("alice").unwrap().unwrap();
  assert_eq!(p2.recover_contacts, vec![v2::RecoveryContact::email(
    "new@example.com"
  )]);
  assert!(p2.recover_block_reasons.is_empty());
}

#[test]
fn profile_update_passes_client_errors_through() {
  let t = MockTransport::new()
    .reply(200, json!({}))
    .reply(400, json!({ "error": { "code": 1 } }))
    .reply(409, json!({}));
  let client = v1_client(&t);
  assert_eq!(
    client
      .put_pw_recover_email("alice", "alice@example.com", "2026-10-16")
      .unwrap(),
    200
  );
  assert_eq!(
    client
      .put_pw_recover_sms("alice", "+12065550100", "2026-10-16")
      .unwrap(),
    400
  );
  assert_eq!(
    client
      .put_pw_recover_info("alice", &v1::RecoveryProfile::default())
      .unwrap(),
    409
  );

  let sent = t.sent();
  assert_eq!(sent[0].method, Method::Put);
  assert_eq!(sent[0].path, "/reg/v1/profile/validid=uwnetid=alice");
  let body: Value = serde_json::from_slice(sent[0].body.as_ref().unwrap()).unwrap();
  assert_eq!(
    body,
    json!({ "profile": [{
      "recover_email": "alice@example.com",
      "recover_email_date": "2026-10-16",
    }]})
  );
  assert!(
    sent[0]
      .headers
      .contains(&("Content-Type".to_string(), "application/json".to_string()))
  );
}

#[test]
fn profile_update_fails_on_server_error() {
  let t = MockTransport::new().reply_raw(503, "maintenance");
  let err = v2_client(&t)
    .put_recover_contacts("alice", vec![v2::RecoveryContact::sms("+1206")])
    .unwrap_err();
  let failure = err.as_data_failure().unwrap();
  assert_eq!(failure.status, 503);
  assert_eq!(failure.path, "/reg/v2/profile/validid=uwnetid=alice");

  let body: Value =
    serde_json::from_slice(t.sent()[0].body.as_ref().unwrap()).unwrap();
  assert_eq!(
    body,
    json!({ "profile": [{
      "recover_contacts": [{ "type": "sms", "value": "+1206" }],
    }]})
  );
}

// ─── PACs ────────────────────────────────────────────────────────────────────

#[test]
fn put_pac_returns_code() {
  let t = MockTransport::new().reply(200, json!({ "person": [{
    "pac": "ZX81", "expiration": "2026-10-23",
  }]}));
  let pac = v1_client(&t).put_pac("000123").unwrap();
  assert_eq!(pac.pac, "ZX81");
  let sent = &t.sent()[0];
  assert_eq!(sent.method, Method::Put);
  assert_eq!(sent.path, "/reg/v1/person/uwhr/000123/pac");
}

#[test]
fn put_pac_not_found_is_failure() {
  let t = MockTransport::new().reply(404, json!({}));
  let err = v1_client(&t).put_pac_from("sdb", "1234567").unwrap_err();
  assert_eq!(err.as_data_failure().unwrap().status, 404);
}

#[test]
fn sdb_pac_check_statuses() {
  let t = MockTransport::new()
    .reply(200, json!({}))
    .reply(400, json!({}))
    .reply(404, json!({}))
    .reply(500, json!({}));
  let client = v1_client(&t);
  assert_eq!(client.verify_sdb_pac("1234567", "AB12").unwrap(), 200);
  assert_eq!(client.verify_sdb_pac("1234567", "AB12").unwrap(), 400);
  assert_eq!(client.verify_sdb_pac("1234567", "AB12").unwrap(), 404);
  assert!(client.verify_sdb_pac("1234567", "AB12").is_err());
  assert_eq!(t.paths()[0], "/reg/v1/person/sdb/1234567/?pac=AB12");
}

// ─── Challenge questions ─────────────────────────────────────────────────────

fn qna_body(n: u32) -> Value {
  let questions: Vec<Value> = (1..=n)
    .map(|i| json!({ "uwnetid": "alice", "ordinal": i, "question": format!("Q{i}?") }))
    .collect();
  json!({ "qna": questions })
}

fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
  pairs
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn all_answers_correct() {
  let t = MockTransport::new()
    .reply(200, qna_body(2))
    .reply(200, json!({}))
    .reply(200, json!({}));
  let ok = v1_client(&t)
    .verify_qna("alice", &answers(&[("1", "Fido's Cat!"), ("2", "12 Main St.")]))
    .unwrap();
  assert!(ok);
  assert_eq!(
    t.paths(),
    vec![
      "/reg/v1/qna?uwnetid=alice",
      "/reg/v1/qna/1/alice/check?ans=FidosCat",
      "/reg/v1/qna/2/alice/check?ans=12MainSt",
    ]
  );
}

#[test]
fn missing_answer_stops_before_remaining_questions() {
  let t = MockTransport::new()
    .reply(200, qna_body(3))
    .reply(200, json!({}));
  let ok = v1_client(&t)
    .verify_qna("alice", &answers(&[("1", "a"), ("3", "c")]))
    .unwrap();
  assert!(!ok);
  // Question list plus the check for question 1; nothing for 2 or 3.
  assert_eq!(t.sent().len(), 2);
}

#[test]
fn wrong_answer_stops_verification() {
  let t = MockTransport::new()
    .reply(200, qna_body(3))
    .reply(404, json!({}));
  let ok = v1_client(&t)
    .verify_qna("alice", &answers(&[("1", "a"), ("2", "b"), ("3", "c")]))
    .unwrap();
  assert!(!ok);
  assert_eq!(t.sent().len(), 2);
}

#[test]
fn unexpected_check_status_counts_as_wrong() {
  let t = MockTransport::new()
    .reply(200, qna_body(1))
    .reply(500, json!({}));
  let ok = v1_client(&t)
    .verify_qna("alice", &answers(&[("1", "a")]))
    .unwrap();
  assert!(!ok);
}

#[test]
fn question_lookup_failure_is_an_error() {
  let t = MockTransport::new().reply(500, json!({}));
  let err = v1_client(&t)
    .verify_qna("alice", &answers(&[("1", "a")]))
    .unwrap_err();
  assert_eq!(err.as_data_failure().unwrap().status, 500);
}

#[test]
fn no_questions_on_file_fails_closed() {
  let t = MockTransport::new()
    .reply(404, json!({}))
    .reply(200, json!({ "qna": [] }));
  let client = v1_client(&t);
  assert!(!client.verify_qna("alice", &answers(&[])).unwrap());
  assert!(!client.verify_qna("alice", &answers(&[])).unwrap());
  assert_eq!(t.sent().len(), 2);
}

#[test]
fn answer_normalization() {
  use crate::normalize_answer;
  assert_eq!(normalize_answer("Fido's Cat!"), normalize_answer("Fidos Cat"));
  assert_eq!(normalize_answer("  a-b_c 1.2 "), "abc12");
  assert_eq!(normalize_answer("Zoë"), "Zoë");
}

// ─── Service-center PIN ──────────────────────────────────────────────────────

fn pin_subscription(status_code: u32, pac: &str) -> Value {
  json!({ "subscription": [{
    "uwnetid": "alice",
    "subscription_code": 233,
    "subscription_name": "Service center PIN",
    "status_code": status_code,
    "status_name": "Pending",
    "pac": pac,
  }]})
}

#[test]
fn pin_lookup_status_is_returned_directly() {
  let t = MockTransport::new().reply(500, json!({}));
  let r = v2_client(&t).verify_pin("alice", "123456").unwrap();
  assert_eq!(r.status, 500);
  assert!(r.cleanup.is_none());
  assert_eq!(
    t.paths(),
    vec!["/reg/v2/subscription?uwnetid=alice&subscription=233"]
  );
}

#[test]
fn pin_subscription_not_pending_is_404() {
  let t = MockTransport::new().reply(200, pin_subscription(20, "Y"));
  let r = v2_client(&t).verify_pin("alice", "123456").unwrap();
  assert_eq!(r.status, 404);
  assert!(!r.is_verified());
  assert_eq!(t.sent().len(), 1);
}

#[test]
fn pin_without_issued_pac_is_404() {
  let t = MockTransport::new().reply(200, pin_subscription(23, "N"));
  let r = v2_client(&t).verify_pin("alice", "123456").unwrap();
  assert_eq!(r.status, 404);
  assert_eq!(t.sent().len(), 1);
}

#[test]
fn correct_pin_survives_pac_delete_failure() {
  let t = MockTransport::new()
    .reply(200, pin_subscription(23, "Y"))
    .reply(200, json!({}))
    .reply_raw(500, "pac delete broke")
    .reply(200, json!({}));
  let r = v2_client(&t).verify_pin("Alice", "123456").unwrap();
  assert_eq!(r.status, 200);
  assert!(r.is_verified());

  let cleanup = r.cleanup.unwrap();
  assert_eq!(
    cleanup.pac,
    CleanupOutcome::Failed {
      status: Some(500),
      reason: "pac delete broke".into(),
    }
  );
  assert!(cleanup.subscription.is_done());

  let sent = t.sent();
  let calls: Vec<_> = sent.iter().map(|s| (s.method, s.path.as_str())).collect();
  assert_eq!(
    calls,
    vec![
      (Method::Get, "/reg/v2/subscription?uwnetid=alice&subscription=233"),
      (Method::Put, "/reg/v2/subscription/233/Alice"),
      (Method::Delete, "/reg/v2/subscription/233/Alice/pac"),
      (Method::Delete, "/reg/v2/subscription/233/Alice"),
    ]
  );
  let body: Value = serde_json::from_slice(sent[1].body.as_ref().unwrap()).unwrap();
  assert_eq!(
    body,
    json!({ "subscription": [{ "action": "verify_pin", "pin": "123456" }] })
  );
}

#[test]
fn cleanup_transport_errors_are_reported_not_raised() {
  let t = MockTransport::new()
    .reply(200, pin_subscription(23, "Y"))
    .reply(200, json!({}))
    .fail("connection reset")
    .fail("connection reset");
  let r = v2_client(&t).verify_pin("alice", "123456").unwrap();
  assert_eq!(r.status, 200);
  let cleanup = r.cleanup.unwrap();
  assert!(matches!(cleanup.pac, CleanupOutcome::Failed { status: None, .. }));
  assert!(matches!(
    cleanup.subscription,
    CleanupOutcome::Failed { status: None, .. }
  ));
  assert_eq!(t.sent().len(), 4);
}

#[test]
fn wrong_pin_passes_status_through() {
  for status in [400, 404] {
    let t = MockTransport::new()
      .reply(200, pin_subscription(23, "Y"))
      .reply(status, json!({}));
    let r = v2_client(&t).verify_pin("alice", "000000").unwrap();
    assert_eq!(r.status, status);
    assert!(r.cleanup.is_none());
    assert_eq!(t.sent().len(), 2);
  }
}

#[test]
fn pin_submission_server_error_is_failure() {
  let t = MockTransport::new()
    .reply(200, pin_subscription(23, "Y"))
    .reply(502, json!({}));
  let err = v2_client(&t).verify_pin("alice", "123456").unwrap_err();
  let failure = err.as_data_failure().unwrap();
  assert_eq!(failure.status, 502);
  assert_eq!(failure.path, "/reg/v2/subscription/233/alice");
}

#[test]
fn pin_codes_follow_config() {
  let t = MockTransport::new().reply(404, json!({}));
  let config = ClientConfig {
    pin_subscription_code: 64,
    ..ClientConfig::new("reg")
  };
  let client: IrwsClient<_, V2> = IrwsClient::new(&t, config);
  assert_eq!(client.verify_pin("alice", "1").unwrap().status, 404);
  assert_eq!(
    t.paths(),
    vec!["/reg/v2/subscription?uwnetid=alice&subscription=64"]
  );
}
