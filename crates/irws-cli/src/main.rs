//! `irws`: command-line access to the identity registry.
//!
//! Reads `irws.toml` (or the path given with `--config`) plus `IRWS_*`
//! environment variables, runs one registry operation and prints the result
//! as JSON on stdout. A lookup that finds nothing prints `null`.
//!
//! ```
//! irws uwnetid --regid 9136CCB8F66711D5BE060004AC494FFE --all
//! irws --api-version v2 verify-pin alice 123456
//! ```

mod settings;
mod transport;

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use irws_client::IrwsClient;
use irws_codec::{Schema, V1, V2};
use irws_core::{ApiVersion, IdentifierQuery, record::v2::RecoveryContact};
use serde::Serialize;
use serde_json::Value;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use transport::HttpTransport;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "irws", version, about = "Identity registry client")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "irws.toml")]
  config: PathBuf,

  /// Protocol version (`v1` or `v2`); overrides the config file.
  #[arg(long, value_name = "VERSION")]
  api_version: Option<ApiVersion>,

  #[command(subcommand)]
  command: Command,
}

/// Identifier flags for lookups. With several given, the external id wins,
/// then the regid, then the netid.
#[derive(Args)]
struct IdArgs {
  #[arg(long)]
  netid:       Option<String>,
  #[arg(long)]
  regid:       Option<String>,
  /// Source code of an external id; requires `--external-id`.
  #[arg(long, requires = "external_id")]
  source:      Option<u32>,
  #[arg(long, requires = "source")]
  external_id: Option<String>,
}

impl IdArgs {
  fn query(self) -> IdentifierQuery {
    IdentifierQuery::from_parts(
      self.source,
      self.external_id,
      self.regid,
      self.netid,
    )
  }
}

#[derive(Subcommand)]
enum Command {
  /// Look up network identities.
  Uwnetid {
    #[command(flatten)]
    id:     IdArgs,
    #[arg(long)]
    status: Option<u32>,
    /// Print every matching identity instead of the first.
    #[arg(long)]
    all:    bool,
  },
  /// Look up a person and their source-system identifiers.
  Person {
    #[command(flatten)]
    id: IdArgs,
  },
  /// Look up a registry id.
  Regid {
    #[command(flatten)]
    id: IdArgs,
  },
  /// Formal and display names for a netid.
  Name { netid: String },
  /// Password-recovery profile for a netid.
  Profile { netid: String },
  /// Set the recovery email (v1).
  SetRecoverEmail {
    netid: String,
    email: String,
    date:  String,
  },
  /// Set the recovery SMS number (v1).
  SetRecoverSms {
    netid: String,
    sms:   String,
    date:  String,
  },
  /// Replace the recovery contact list (v2).
  SetRecoverContacts {
    netid: String,
    #[arg(long)]
    email: Vec<String>,
    #[arg(long)]
    sms:   Vec<String>,
  },
  /// HR person record.
  HrPerson {
    eid:    String,
    #[arg(long)]
    source: Option<String>,
  },
  /// Student person record.
  StudentPerson { id: String },
  /// Supplemental person record.
  SupplementalPerson { id: String },
  /// Cascadia partner person record (v2).
  CascadiaPerson { id: String },
  /// SCCA partner person record (v2).
  SccaPerson { id: String },
  /// Fetch a record by a person identifier such as `/person/uwhr/000123`.
  Generic { uri: String },
  /// A netid's subscription.
  Subscription { netid: String, code: u32 },
  /// Issue a PAC for a person record.
  IssuePac {
    eid:    String,
    #[arg(long)]
    source: Option<String>,
  },
  /// Check a student PAC; prints the status code.
  CheckStudentPac { studentid: String, pac: String },
  /// Challenge questions on file for a netid.
  Qna { netid: String },
  /// Check challenge answers given as `ORDINAL=ANSWER`.
  VerifyQna {
    netid:   String,
    #[arg(long = "answer", value_name = "ORDINAL=ANSWER", value_parser = parse_answer)]
    answers: Vec<(String, String)>,
  },
  /// Verify a service-center PIN (v2).
  VerifyPin { netid: String, pin: String },
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
  raw
    .split_once('=')
    .map(|(ordinal, answer)| (ordinal.to_string(), answer.to_string()))
    .ok_or_else(|| format!("expected ORDINAL=ANSWER, got `{raw}`"))
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let version = cli.api_version.unwrap_or(settings.api_version);
  let transport = HttpTransport::new(&settings)?;

  tracing::debug!(base_url = %settings.base_url, %version, "irws client ready");

  let output = match version {
    ApiVersion::V1 => {
      let client = IrwsClient::<_, V1>::new(transport, settings.client_config());
      run_v1(&client, cli.command)?
    }
    ApiVersion::V2 => {
      let client = IrwsClient::<_, V2>::new(transport, settings.client_config());
      run_v2(&client, cli.command)?
    }
  };

  println!(
    "{}",
    serde_json::to_string_pretty(&output).context("rendering output")?
  );
  Ok(())
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

type Client<S> = IrwsClient<HttpTransport, S>;

fn json(value: impl Serialize) -> anyhow::Result<Value> {
  serde_json::to_value(value).context("rendering result")
}

fn run_v1(client: &Client<V1>, command: Command) -> anyhow::Result<Value> {
  match command {
    Command::SetRecoverEmail { netid, email, date } => {
      json(client.put_pw_recover_email(&netid, &email, &date)?)
    }
    Command::SetRecoverSms { netid, sms, date } => {
      json(client.put_pw_recover_sms(&netid, &sms, &date)?)
    }
    command => run(client, command),
  }
}

fn run_v2(client: &Client<V2>, command: Command) -> anyhow::Result<Value> {
  match command {
    Command::SetRecoverContacts { netid, email, sms } => {
      let contacts = email
        .into_iter()
        .map(RecoveryContact::email)
        .chain(sms.into_iter().map(RecoveryContact::sms))
        .collect();
      json(client.put_recover_contacts(&netid, contacts)?)
    }
    Command::CascadiaPerson { id } => json(client.get_cascadia_person(&id)?),
    Command::SccaPerson { id } => json(client.get_scca_person(&id)?),
    Command::VerifyPin { netid, pin } => json(client.verify_pin(&netid, &pin)?),
    command => run(client, command),
  }
}

/// Operations available on every protocol version.
fn run<S: Schema>(client: &Client<S>, command: Command) -> anyhow::Result<Value> {
  match command {
    Command::Uwnetid { id, status, all } => {
      let query = id.query();
      if all {
        json(client.get_uwnetids(&query, status)?)
      } else {
        json(client.get_uwnetid(&query, status)?)
      }
    }
    Command::Person { id } => json(client.get_person(&id.query())?),
    Command::Regid { id } => json(client.get_regid(&id.query())?),
    Command::Name { netid } => json(client.get_name_by_netid(&netid)?),
    Command::Profile { netid } => json(client.get_pw_recover_info(&netid)?),
    Command::HrPerson { eid, source } => match source {
      Some(source) => json(client.get_uwhr_person_from(&source, &eid)?),
      None => json(client.get_uwhr_person(&eid)?),
    },
    Command::StudentPerson { id } => json(client.get_sdb_person(&id)?),
    Command::SupplementalPerson { id } => {
      json(client.get_supplemental_person(&id)?)
    }
    Command::Generic { uri } => json(client.get_generic_person(&uri)?),
    Command::Subscription { netid, code } => {
      json(client.get_subscription(&netid, code)?)
    }
    Command::IssuePac { eid, source } => match source {
      Some(source) => json(client.put_pac_from(&source, &eid)?),
      None => json(client.put_pac(&eid)?),
    },
    Command::CheckStudentPac { studentid, pac } => {
      json(client.verify_sdb_pac(&studentid, &pac)?)
    }
    Command::Qna { netid } => json(client.get_qna(&netid)?),
    Command::VerifyQna { netid, answers } => {
      let answers: HashMap<String, String> = answers.into_iter().collect();
      json(client.verify_qna(&netid, &answers)?)
    }
    Command::SetRecoverEmail { .. }
    | Command::SetRecoverSms { .. }
    | Command::SetRecoverContacts { .. }
    | Command::CascadiaPerson { .. }
    | Command::SccaPerson { .. }
    | Command::VerifyPin { .. } => {
      bail!("this command is not available on API {}", client.version())
    }
  }
}
