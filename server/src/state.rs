use crate::table::UserTable;
use chrono::{DateTime, Duration, Utc};
use libcommon::{
  token_fields::{SignedToken, TokenKind},
  ExpiryPolicy, Identity, TokenError, TokenGenerator,
};
use std::net::SocketAddr;

/// Token handed out together with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: SignedToken,
  pub expires: DateTime<Utc>,
}

pub struct CryptoState {
  pub token_generator: Box<dyn TokenGenerator>,
}

impl CryptoState {
  fn issue(&self, identity: &Identity, lifetime: Duration, kind: TokenKind) -> Result<IssuedToken, TokenError> {
    let expires = self.token_generator.expiration_time(lifetime)?;
    let token = self.token_generator.create_token(identity, expires, kind)?;
    Ok(IssuedToken { token, expires })
  }

  pub fn issue_access_token(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
    self.issue(identity, self.policy().access_lifetime, TokenKind::Access)
  }

  pub fn issue_refresh_token(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
    self.issue(identity, self.policy().refresh_lifetime, TokenKind::Refresh)
  }

  pub fn policy(&self) -> &ExpiryPolicy {
    self.token_generator.policy()
  }
}

pub struct TableState {
  pub user: Box<dyn UserTable>,
}

pub struct AppState {
  pub listen_socket: SocketAddr,
  pub crypto: CryptoState,
  pub table: TableState,
}
