use super::{subcmd_run::Run, subcmd_user::AddUser, ClapSubCommand};
use crate::{error::*, state::AppState};
use clap::command;

pub async fn parse_opts() -> Result<Option<AppState>> {
  let _ = include_str!("../../Cargo.toml");

  let options = command!()
    .subcommand_required(true)
    .subcommand(Run::subcmd())
    .subcommand(AddUser::subcmd());

  let matches = options.get_matches();

  match matches.subcommand() {
    Some(("run", sub_m)) => Run::exec_matches(sub_m).await,
    Some(("user", sub_m)) => AddUser::exec_matches(sub_m).await,
    _ => {
      bail!("Unknown subcommand");
    }
  }
}
