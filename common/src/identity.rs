use crate::token_fields::{Email, Field, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a user as of token issuance. It is embedded into every token and
/// trusted as-is while the token is valid, never re-fetched from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub id: i64,
  pub name: Username,
  pub email: Email,
  pub created: DateTime<Utc>,
}

impl Identity {
  pub fn new(id: i64, name: Username, email: Email, created: DateTime<Utc>) -> Self {
    Self {
      id,
      name,
      email,
      created,
    }
  }

  /// Subject used for audit and log correlation only
  pub fn subject(&self) -> String {
    format!("user_{}_{}", self.name.as_str(), self.id)
  }
}
