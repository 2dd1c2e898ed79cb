mod user_table;

use crate::{
  entity::{NewUser, Password, User},
  error::*,
  log::*,
};
use async_trait::async_trait;
use libcommon::{
  token_fields::{Email, TryNewField},
  Identity,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub use user_table::SqliteUserTable;

pub enum UserSearchKey<'a> {
  Email(&'a Email),
}

#[async_trait]
pub trait UserTable: Send + Sync {
  /// Insert a user and return its identity with the assigned id
  async fn add(&self, user: NewUser) -> Result<Identity>;

  async fn find_user<'a>(&self, user_search_key: UserSearchKey<'a>) -> Result<Option<User>>;

  /// Check a login name (the email) and password. `None` covers both an unknown
  /// user and a wrong password.
  async fn authenticate(&self, username: &str, password: &Password) -> Result<Option<Identity>> {
    let Ok(email) = Email::new(username) else {
      debug!("Login name is not an email address");
      return Ok(None);
    };
    let Some(user) = self.find_user(UserSearchKey::Email(&email)).await? else {
      return Ok(None);
    };
    if !user.verify_password(password)? {
      return Ok(None);
    }
    Ok(Some(user.identity))
  }
}

/// Setup sqlite database, creating the file and the user table when missing
pub async fn setup_sqlite(sqlite_url: &str) -> Result<SqliteUserTable> {
  let conn_opts = SqliteConnectOptions::from_str(sqlite_url)?.create_if_missing(true);
  let pool = SqlitePoolOptions::default().connect_with(conn_opts).await?;

  // Embed migrations into binary
  sqlx::migrate!("./migrations").run(&pool).await?;
  info!("User table is ready at {sqlite_url}");

  Ok(SqliteUserTable::new(pool))
}
