//! Multi-call verification workflows.
//!
//! Both workflows report business-rule rejections (wrong answer, wrong PIN,
//! subscription in the wrong state) as ordinary results. Only a failure to
//! talk to the registry, or an unexpected status where the workflow has no
//! rule for it, comes back as an [`Error`](crate::Error).

use std::collections::HashMap;

use irws_codec::{Schema, V2, encode_pin_submission};
use irws_core::{Method, Transport};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
  DataFailure, IrwsClient, Result,
  client::{ACCEPT_JSON, SEND_JSON},
};

// ─── Challenge questions ─────────────────────────────────────────────────────

/// Strip everything but letters and digits, so `"Fido's Cat!"` and
/// `"Fidos Cat"` are checked as the same answer.
pub fn normalize_answer(answer: &str) -> String {
  answer.chars().filter(|c| c.is_alphanumeric()).collect()
}

impl<T: Transport, S: Schema> IrwsClient<T, S> {
  /// Check `answers` (ordinal → submitted text) against every challenge
  /// question on file for `netid`.
  ///
  /// Returns `true` only if every question has an answer and every answer is
  /// correct. The first missing or wrong answer stops the check; no further
  /// questions are sent.
  ///
  /// A netid with no questions on file, whether the lookup returns 404 or an
  /// empty list, fails verification. An empty list is not treated as "every
  /// answer correct".
  pub fn verify_qna(
    &self,
    netid: &str,
    answers: &HashMap<String, String>,
  ) -> Result<bool> {
    let Some(questions) = self.get_qna(netid)? else {
      debug!(netid, "no challenge questions on file");
      return Ok(false);
    };
    if questions.is_empty() {
      debug!(netid, "empty challenge question list");
      return Ok(false);
    }

    for question in &questions {
      let ordinal = question.ordinal.as_str();
      let Some(answer) = answers.get(ordinal) else {
        debug!(ordinal, "no answer submitted");
        return Ok(false);
      };

      let answer = normalize_answer(answer);
      let path = self.paths().qna_check(ordinal, netid, &answer);
      let response = self.get(&path)?;
      match response.status {
        200 => debug!(ordinal, "correct answer"),
        404 => {
          debug!(ordinal, "wrong answer");
          return Ok(false);
        }
        status => {
          warn!(ordinal, status, "unexpected status checking answer");
          return Ok(false);
        }
      }
    }
    Ok(true)
  }
}

// ─── Service-center PIN ──────────────────────────────────────────────────────

/// Result of one best-effort cleanup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CleanupOutcome {
  Done,
  Failed {
    /// `None` when the request never completed.
    status: Option<u16>,
    reason: String,
  },
}

impl CleanupOutcome {
  pub fn is_done(&self) -> bool { matches!(self, Self::Done) }
}

/// What happened to the PAC and the subscription after a correct PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
  pub pac:          CleanupOutcome,
  pub subscription: CleanupOutcome,
}

/// Outcome of [`IrwsClient::verify_pin`].
///
/// `status` is the verdict: 200 for a correct PIN, otherwise the rejecting
/// status. `cleanup` is diagnostic only and never changes the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinVerification {
  pub status:  u16,
  pub cleanup: Option<CleanupReport>,
}

impl PinVerification {
  fn rejected(status: u16) -> Self {
    Self {
      status,
      cleanup: None,
    }
  }

  pub fn is_verified(&self) -> bool { self.status == 200 }
}

impl<T: Transport> IrwsClient<T, V2> {
  /// Verify a one-time PIN issued through the service-center subscription.
  ///
  /// 1. The PIN subscription must be readable (its status is returned
  ///    otherwise), pending, and carry an issued PAC (404 otherwise).
  /// 2. The PIN is submitted against the subscription; 400 and 404 come
  ///    back as the verdict, other non-200 statuses are errors.
  /// 3. On 200 the PAC and then the subscription are deleted. Each delete is
  ///    attempted regardless of the other and failures are only reported.
  pub fn verify_pin(&self, netid: &str, pin: &str) -> Result<PinVerification> {
    let code = self.config().pin_subscription_code;

    let response = self.get(&self.paths().subscription(netid, code))?;
    if response.status != 200 {
      debug!(netid, status = response.status, "PIN subscription lookup failed");
      return Ok(PinVerification::rejected(response.status));
    }

    let subscription = irws_codec::parse_subscription(&response.body)?;
    let pending = self.config().pin_pending_status_code;
    if subscription.status_code != Some(pending) || !subscription.pac_issued {
      debug!(
        netid,
        status_code = ?subscription.status_code,
        pac_issued = subscription.pac_issued,
        "PIN subscription is not awaiting verification"
      );
      return Ok(PinVerification::rejected(404));
    }

    let path = self.paths().subscription_item(code, netid);
    let body = encode_pin_submission(pin)?;
    let response = self.send(Method::Put, &path, SEND_JSON, Some(&body))?;
    match response.status {
      200 => Ok(PinVerification {
        status:  200,
        cleanup: Some(self.clean_up_pin(code, netid)),
      }),
      400 | 404 => Ok(PinVerification::rejected(response.status)),
      status => Err(DataFailure::new(path, status, response.body).into()),
    }
  }

  fn clean_up_pin(&self, code: u32, netid: &str) -> CleanupReport {
    let pac = self.delete_best_effort(&self.paths().subscription_pac(code, netid));
    let subscription =
      self.delete_best_effort(&self.paths().subscription_item(code, netid));
    CleanupReport { pac, subscription }
  }

  fn delete_best_effort(&self, path: &str) -> CleanupOutcome {
    match self.send(Method::Delete, path, ACCEPT_JSON, None) {
      Ok(response) if (200..300).contains(&response.status) => {
        CleanupOutcome::Done
      }
      Ok(response) => {
        warn!(path, status = response.status, "cleanup delete rejected");
        CleanupOutcome::Failed {
          status: Some(response.status),
          reason: String::from_utf8_lossy(&response.body).into_owned(),
        }
      }
      Err(e) => {
        warn!(path, error = %e, "cleanup delete failed");
        CleanupOutcome::Failed {
          status: None,
          reason: e.to_string(),
        }
      }
    }
  }
}
