use super::response::TokensResponse;
use crate::{
  auth::{basic_credentials, AuthError},
  entity::{Password, TryNewEntity},
  log::*,
  state::AppState,
};
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

/// Login with `Basic` credentials, minting a fresh access and refresh token pair
pub async fn authenticate_user(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<TokensResponse>, AuthError> {
  let credentials = basic_credentials(&headers)?;

  let Ok(password) = Password::new(credentials.password) else {
    return Err(AuthError::InvalidCredentials);
  };
  let identity = match state.table.user.authenticate(&credentials.username, &password).await {
    Ok(Some(identity)) => identity,
    Ok(None) => {
      debug!("Login failed for {}", credentials.username);
      return Err(AuthError::InvalidCredentials);
    }
    Err(e) => {
      error!("User lookup failed: {e}");
      return Err(AuthError::Internal);
    }
  };

  let issued = state
    .crypto
    .issue_access_token(&identity)
    .and_then(|access| Ok((access, state.crypto.issue_refresh_token(&identity)?)));
  let (access, refresh) = issued.map_err(|e| {
    error!("[{}] Failed to create tokens: {e}", identity.subject());
    AuthError::TokenCreationFailed
  })?;

  info!("[{}] Logged in", identity.subject());
  Ok(Json(TokensResponse::new(access, refresh.token)))
}
