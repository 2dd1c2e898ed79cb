use super::{UserSearchKey, UserTable};
use crate::{constants::USER_TABLE_NAME, entity::*, error::*};
use async_trait::async_trait;
use chrono::DateTime;
use libcommon::{
  token_fields::{Email, Field, TryNewField, Username},
  Identity,
};
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct SqliteUserTable {
  pool: SqlitePool,
}

impl SqliteUserTable {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserTable for SqliteUserTable {
  async fn add(&self, user: NewUser) -> Result<Identity> {
    let sql = format!(
      "insert into {} (name, email, encoded_hash, created) values (?, ?, ?, ?)",
      USER_TABLE_NAME
    );
    let res = sqlx::query(&sql)
      .bind(user.name.as_str())
      .bind(user.email.as_str())
      .bind(user.encoded_hash.as_str())
      .bind(user.created.timestamp())
      .execute(&self.pool)
      .await?;

    Ok(Identity::new(res.last_insert_rowid(), user.name, user.email, user.created))
  }

  async fn find_user<'a>(&self, user_search_key: UserSearchKey<'a>) -> Result<Option<User>> {
    let user_row_opt: Option<UserRow> = match user_search_key {
      UserSearchKey::Email(email) => {
        let sql = format!("select * from {} where email = ?", USER_TABLE_NAME);
        sqlx::query_as(&sql).bind(email.as_str()).fetch_optional(&self.pool).await?
      }
    };
    user_row_opt.map(User::try_from).transpose()
  }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: i64,
  name: String,
  email: String,
  encoded_hash: String,
  created: i64,
}

impl TryFrom<UserRow> for User {
  type Error = crate::error::Error;

  fn try_from(row: UserRow) -> std::result::Result<Self, Self::Error> {
    let Some(created) = DateTime::from_timestamp(row.created, 0) else {
      bail!("Invalid creation time of user {}", row.id);
    };
    Ok(User {
      identity: Identity::new(row.id, Username::new(row.name)?, Email::new(row.email)?, created),
      encoded_hash: EncodedHash::new(row.encoded_hash)?,
    })
  }
}
