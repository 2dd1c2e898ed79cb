use crate::{constants::TOKEN_TYPE, state::IssuedToken};
use libcommon::token_fields::SignedToken;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
/// Token pair returned by login and refresh
pub struct TokensResponse {
  pub token_type: String,
  pub access_token: SignedToken,
  /// Absolute expiry of the access token in epoch seconds
  pub expires_in: i64,
  pub refresh_token: SignedToken,
}

impl TokensResponse {
  pub fn new(access: IssuedToken, refresh_token: SignedToken) -> Self {
    Self {
      token_type: TOKEN_TYPE.to_string(),
      access_token: access.token,
      expires_in: access.expires.timestamp(),
      refresh_token,
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
  pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EmptyResponse {}
