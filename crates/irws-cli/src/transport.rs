//! Blocking HTTPS transport for the registry.

use std::time::Duration;

use anyhow::Context as _;
use irws_core::{Method, Response, Transport};
use reqwest::blocking::Client;

use crate::settings::Settings;

pub struct HttpTransport {
  client:      Client,
  base_url:    String,
  credentials: Option<(String, Option<String>)>,
}

impl HttpTransport {
  pub fn new(settings: &Settings) -> anyhow::Result<Self> {
    let mut builder =
      Client::builder().timeout(Duration::from_secs(settings.timeout_secs));

    if let Some(path) = &settings.identity_pem {
      let pem = std::fs::read(path)
        .with_context(|| format!("reading client identity {}", path.display()))?;
      let identity = reqwest::Identity::from_pem(&pem)
        .context("client identity is not a valid certificate and key")?;
      builder = builder.identity(identity);
    }

    let client = builder.build().context("failed to build HTTP client")?;
    Ok(Self {
      client,
      base_url: settings.base_url.trim_end_matches('/').to_string(),
      credentials: settings
        .username
        .clone()
        .map(|user| (user, settings.password.clone())),
    })
  }
}

impl Transport for HttpTransport {
  type Error = reqwest::Error;

  fn request(
    &self,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
  ) -> Result<Response, reqwest::Error> {
    let method = match method {
      Method::Get => reqwest::Method::GET,
      Method::Put => reqwest::Method::PUT,
      Method::Delete => reqwest::Method::DELETE,
    };
    let mut req = self.client.request(method, format!("{}{path}", self.base_url));
    for (name, value) in headers {
      req = req.header(*name, *value);
    }
    if let Some((user, password)) = &self.credentials {
      req = req.basic_auth(user, password.as_deref());
    }
    if let Some(body) = body {
      req = req.body(body.to_vec());
    }

    let resp = req.send()?;
    let status = resp.status().as_u16();
    Ok(Response::new(status, resp.bytes()?.to_vec()))
  }
}
