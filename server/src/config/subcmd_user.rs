use super::ClapSubCommand;
use crate::{
  constants::DB_FILE_PATH,
  entity::{NewUser, Password, TryNewEntity},
  error::*,
  log::*,
  table::{setup_sqlite, UserTable},
};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use libcommon::token_fields::{Email, TryNewField, Username};

pub(super) struct AddUser {}

#[async_trait]
impl ClapSubCommand for AddUser {
  fn subcmd() -> Command {
    Command::new("user")
      .about("Add a user who can log in with email and password")
      .arg(
        Arg::new("name")
          .short('n')
          .long("name")
          .value_name("NAME")
          .required(true)
          .help("Display name"),
      )
      .arg(
        Arg::new("email")
          .short('e')
          .long("email")
          .value_name("EMAIL")
          .required(true)
          .help("Email address, used as the login name"),
      )
      .arg(
        Arg::new("password")
          .short('p')
          .long("password")
          .value_name("PASSWORD")
          .help("Password. If not specified, a random one is generated and printed once."),
      )
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
    let (Some(name), Some(email)) = (sub_m.get_one::<String>("name"), sub_m.get_one::<String>("email")) else {
      bail!("Both name and email must be specified");
    };
    let name = Username::new(name.as_str())?;
    let email = Email::new(email.as_str())?;
    let password = sub_m
      .get_one::<String>("password")
      .map(|p| Password::new(p.as_str()))
      .transpose()?;

    let Some(db_file_path) = sub_m.get_one::<String>("db_file_path") else {
      bail!("Database path must be specified");
    };
    let user_table = setup_sqlite(&format!("sqlite:{}", db_file_path)).await?;

    let identity = user_table.add(NewUser::new(&name, &email, password)?).await?;
    info!("Added {}", identity.subject());

    Ok(None)
  }
}
