use super::response::TokensResponse;
use crate::{
  auth::{refresh_token as presented_refresh_token, AuthError},
  log::*,
  state::AppState,
};
use axum::{extract::State, http::HeaderMap, Json};
use libcommon::token_fields::TokenKind;
use std::sync::Arc;

/// Mint a new access token from a refresh token. The refresh token itself is
/// replaced only when it is about to expire.
pub async fn refresh_token(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<TokensResponse>, AuthError> {
  let presented = presented_refresh_token(&headers)?;

  let generator = &state.crypto.token_generator;
  let verified = generator.verify_token(&presented, TokenKind::Refresh).map_err(|e| {
    warn!("Refresh token rejected: {e}");
    AuthError::TokenInvalid
  })?;
  let identity = &verified.identity;

  let refresh_token = if verified.remaining_lifetime(generator.now()) < state.crypto.policy().renewal_threshold {
    let rotated = state.crypto.issue_refresh_token(identity).map_err(|e| {
      error!("[{}] Failed to rotate refresh token: {e}", identity.subject());
      AuthError::TokenCreationFailed
    })?;
    info!("[{}] Rotated refresh token", identity.subject());
    rotated.token
  } else {
    presented
  };

  let access = state.crypto.issue_access_token(identity).map_err(|e| {
    error!("[{}] Failed to create access token: {e}", identity.subject());
    AuthError::TokenCreationFailed
  })?;

  Ok(Json(TokensResponse::new(access, refresh_token)))
}
