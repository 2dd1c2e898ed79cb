use super::response::EmptyResponse;
use crate::{auth::AuthenticatedUser, log::*};
use axum::Json;

/// Issued tokens are not revoked and stay valid until they expire
pub async fn logout_user(AuthenticatedUser(identity): AuthenticatedUser) -> Json<EmptyResponse> {
  info!("[{}] Logged out", identity.subject());
  Json(EmptyResponse::default())
}
