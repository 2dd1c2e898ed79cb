use super::{bearer_token, AuthError, AuthenticatedUser};
use crate::{
  constants::{AUTHENTICATE_USER_METHOD, HEALTH_METHOD, REFRESH_TOKEN_METHOD},
  log::*,
  state::AppState,
};
use axum::{
  extract::{Request, State},
  middleware::Next,
  response::Response,
};
use libcommon::token_fields::TokenKind;
use std::sync::Arc;

/// Methods served without an access token
pub const BYPASS_AUTH: [&str; 3] = [AUTHENTICATE_USER_METHOD, HEALTH_METHOD, REFRESH_TOKEN_METHOD];

pub fn is_bypassed(method: &str) -> bool {
  BYPASS_AUTH.contains(&method)
}

/// Gate in front of every call. Outside the bypass table, a valid access token
/// is required and its identity is attached to the request.
pub async fn request_gate(
  State(state): State<Arc<AppState>>,
  mut request: Request,
  next: Next,
) -> Result<Response, AuthError> {
  if is_bypassed(request.uri().path()) {
    return Ok(next.run(request).await);
  }

  let token = bearer_token(request.headers()).map_err(|e| {
    debug!("Rejected {}: {e}", request.uri().path());
    e
  })?;
  let verified = state
    .crypto
    .token_generator
    .verify_token(&token, TokenKind::Access)
    .map_err(|e| {
      warn!("Rejected {}: {e}", request.uri().path());
      AuthError::TokenInvalid
    })?;

  debug!("[{}] Authorized {}", verified.identity.subject(), request.uri().path());
  request.extensions_mut().insert(AuthenticatedUser(verified.identity));

  Ok(next.run(request).await)
}
