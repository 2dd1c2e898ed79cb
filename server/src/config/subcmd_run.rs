use super::ClapSubCommand;
use crate::{
  constants::{
    ACCESS_TOKEN_KEY_VAR, DB_FILE_PATH, DEFAULT_ADDRESS, DEFAULT_PORT, MAX_TOKEN_LIFETIME_MINS, REFRESH_TOKEN_KEY_VAR,
  },
  error::*,
  log::*,
  state::{AppState, CryptoState, TableState},
  table::setup_sqlite,
};
use async_trait::async_trait;
use chrono::Duration;
use clap::{value_parser, Arg, ArgMatches, Command};
use libcommon::{
  ExpiryPolicy, JwtGenerator, TokenKeys, ACCESS_TOKEN_DURATION_MINS, REFRESH_TOKEN_DURATION_MINS,
  REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS,
};
use std::net::SocketAddr;

pub(super) struct Run {}

fn minutes_arg(id: &'static str, long: &'static str, help: String) -> Arg {
  Arg::new(id)
    .long(long)
    .value_name("MINUTES")
    .value_parser(value_parser!(i64).range(1..=MAX_TOKEN_LIFETIME_MINS))
    .help(help)
}

#[async_trait]
impl ClapSubCommand for Run {
  fn subcmd() -> Command {
    Command::new("run")
      .about("Run the authentication server")
      .arg(
        Arg::new("listen_address")
          .short('l')
          .long("listen-address")
          .value_name("ADDRESS")
          .default_value(DEFAULT_ADDRESS)
          .help("Listen address"),
      )
      .arg(
        Arg::new("port")
          .short('p')
          .long("port")
          .value_name("PORT")
          .default_value(DEFAULT_PORT)
          .help("Listen port"),
      )
      .arg(
        Arg::new("access_token_key")
          .long("access-token-key")
          .env(ACCESS_TOKEN_KEY_VAR)
          .hide_env_values(true)
          .value_name("KEY")
          .required(true)
          .help("HMAC key signing access tokens"),
      )
      .arg(
        Arg::new("refresh_token_key")
          .long("refresh-token-key")
          .env(REFRESH_TOKEN_KEY_VAR)
          .hide_env_values(true)
          .value_name("KEY")
          .required(true)
          .help("HMAC key signing refresh tokens, distinct from the access token key"),
      )
      .arg(minutes_arg(
        "access_token_mins",
        "access-token-mins",
        format!("Lifetime of access tokens [default: {ACCESS_TOKEN_DURATION_MINS}]"),
      ))
      .arg(minutes_arg(
        "refresh_token_mins",
        "refresh-token-mins",
        format!("Lifetime of refresh tokens [default: {REFRESH_TOKEN_DURATION_MINS}]"),
      ))
      .arg(minutes_arg(
        "renewal_threshold_mins",
        "renewal-threshold-mins",
        format!(
          "Refresh tokens with less remaining lifetime are replaced on refresh [default: {REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS}]"
        ),
      ))
      .arg(
        Arg::new("db_file_path")
          .short('d')
          .long("db-file-path")
          .value_name("PATH")
          .default_value(DB_FILE_PATH)
          .help("SQLite database file path"),
      )
  }

  async fn exec_matches(sub_m: &ArgMatches) -> Result<Option<crate::AppState>> {
    let Some(address) = sub_m.get_one::<String>("listen_address") else {
      bail!("Listen address must be specified");
    };
    let Some(port) = sub_m.get_one::<String>("port") else {
      bail!("Port must be specified");
    };
    let listen_socket = format!("{}:{}", address, port).parse::<SocketAddr>()?;

    let (Some(access_key), Some(refresh_key)) = (
      sub_m.get_one::<String>("access_token_key"),
      sub_m.get_one::<String>("refresh_token_key"),
    ) else {
      bail!("Both access and refresh token keys must be specified");
    };
    let keys = TokenKeys::new(access_key, refresh_key)?;
    if access_key == refresh_key {
      warn!("Access and refresh tokens are signed with the same key");
    }

    let minutes = |id: &str, default: i64| -> Result<Duration> {
      let m = sub_m.get_one::<i64>(id).copied().unwrap_or(default);
      ensure!(
        (1..=MAX_TOKEN_LIFETIME_MINS).contains(&m),
        "{id} must be between 1 and {MAX_TOKEN_LIFETIME_MINS} minutes"
      );
      Duration::try_minutes(m).ok_or_else(|| anyhow!("{id} is out of range"))
    };
    let policy = ExpiryPolicy {
      access_lifetime: minutes("access_token_mins", ACCESS_TOKEN_DURATION_MINS)?,
      refresh_lifetime: minutes("refresh_token_mins", REFRESH_TOKEN_DURATION_MINS)?,
      renewal_threshold: minutes("renewal_threshold_mins", REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS)?,
    };
    ensure!(
      policy.renewal_threshold < policy.refresh_lifetime,
      "Renewal threshold must be shorter than the refresh token lifetime"
    );
    info!(
      "Token lifetimes: access {} mins, refresh {} mins, renewal under {} mins",
      policy.access_lifetime.num_minutes(),
      policy.refresh_lifetime.num_minutes(),
      policy.renewal_threshold.num_minutes()
    );

    let Some(db_file_path) = sub_m.get_one::<String>("db_file_path") else {
      bail!("Database path must be specified");
    };
    let user_table = setup_sqlite(&format!("sqlite:{}", db_file_path)).await?;

    Ok(Some(AppState {
      listen_socket,
      crypto: CryptoState {
        token_generator: Box::new(JwtGenerator::new(keys, policy)),
      },
      table: TableState {
        user: Box::new(user_table),
      },
    }))
  }
}
