//! Client configuration.

use serde::Deserialize;

/// Subscription code of the service-center PIN subscription.
pub const DEFAULT_PIN_SUBSCRIPTION_CODE: u32 = 233;
/// Subscription status meaning "PIN issued, awaiting verification".
pub const DEFAULT_PIN_PENDING_STATUS_CODE: u32 = 23;
/// Source segment for HR person lookups and PAC issuance.
pub const DEFAULT_HR_SOURCE: &str = "uwhr";

/// Settings for an [`IrwsClient`](crate::IrwsClient), usually deserialised
/// from the application's configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
  /// Namespace segment that prefixes every path: `/{service_name}/v1/...`.
  pub service_name:            String,
  #[serde(default = "default_pin_subscription_code")]
  pub pin_subscription_code:   u32,
  #[serde(default = "default_pin_pending_status_code")]
  pub pin_pending_status_code: u32,
}

fn default_pin_subscription_code() -> u32 { DEFAULT_PIN_SUBSCRIPTION_CODE }

fn default_pin_pending_status_code() -> u32 { DEFAULT_PIN_PENDING_STATUS_CODE }

impl ClientConfig {
  pub fn new(service_name: impl Into<String>) -> Self {
    Self {
      service_name:            service_name.into(),
      pin_subscription_code:   DEFAULT_PIN_SUBSCRIPTION_CODE,
      pin_pending_status_code: DEFAULT_PIN_PENDING_STATUS_CODE,
    }
  }
}
