//! Settings loaded from `irws.toml` and `IRWS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use irws_client::{
  ClientConfig, DEFAULT_PIN_PENDING_STATUS_CODE, DEFAULT_PIN_SUBSCRIPTION_CODE,
};
use irws_core::ApiVersion;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Scheme and host of the registry, e.g. `https://registry.example.edu`.
  pub base_url:                String,
  pub service_name:            String,
  #[serde(default)]
  pub api_version:             ApiVersion,
  pub username:                Option<String>,
  pub password:                Option<String>,
  /// PEM file holding the client certificate and its private key.
  pub identity_pem:            Option<PathBuf>,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:            u64,
  #[serde(default = "default_pin_subscription_code")]
  pub pin_subscription_code:   u32,
  #[serde(default = "default_pin_pending_status_code")]
  pub pin_pending_status_code: u32,
}

fn default_timeout_secs() -> u64 { 15 }

fn default_pin_subscription_code() -> u32 { DEFAULT_PIN_SUBSCRIPTION_CODE }

fn default_pin_pending_status_code() -> u32 { DEFAULT_PIN_PENDING_STATUS_CODE }

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("IRWS"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      service_name:            self.service_name.clone(),
      pin_subscription_code:   self.pin_subscription_code,
      pin_pending_status_code: self.pin_pending_status_code,
    }
  }
}
