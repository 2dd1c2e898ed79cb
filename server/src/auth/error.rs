use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

/// Caller-visible rejection of a call. None of them is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
  NoAuthorizationHeader,
  NoBearerScheme,
  NoBasicScheme,
  MalformedCredentialPair,
  NoRefreshHeader,
  /// Signature, kind, expiry or structure of a token did not check out
  TokenInvalid,
  InvalidCredentials,
  TokenCreationFailed,
  /// A handler needing an identity ran without one
  Unauthenticated,
  /// User store failure
  Internal,
}

impl AuthError {
  /// Stable machine readable code
  pub fn code(&self) -> &'static str {
    match self {
      AuthError::NoAuthorizationHeader => "no_authorization_header",
      AuthError::NoBearerScheme => "no_bearer_scheme",
      AuthError::NoBasicScheme => "no_basic_scheme",
      AuthError::MalformedCredentialPair => "malformed_credential_pair",
      AuthError::NoRefreshHeader => "no_refresh_header",
      AuthError::TokenInvalid => "token_invalid",
      AuthError::InvalidCredentials => "invalid_credentials",
      AuthError::TokenCreationFailed => "token_creation_failed",
      AuthError::Unauthenticated => "unauthenticated",
      AuthError::Internal => "internal",
    }
  }

  fn status_and_message(&self) -> (StatusCode, &'static str) {
    match self {
      AuthError::NoAuthorizationHeader => (StatusCode::UNAUTHORIZED, "no authorization header in request"),
      AuthError::NoBearerScheme => (StatusCode::UNAUTHORIZED, "authorization requires Bearer scheme"),
      AuthError::NoBasicScheme => (StatusCode::UNAUTHORIZED, "authorization requires Basic scheme"),
      AuthError::MalformedCredentialPair => (StatusCode::BAD_REQUEST, "malformed username:password pair"),
      AuthError::NoRefreshHeader => (StatusCode::UNAUTHORIZED, "no refresh token header in request"),
      AuthError::TokenInvalid => (StatusCode::UNAUTHORIZED, "authorization failed"),
      AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "username or password wrong"),
      AuthError::TokenCreationFailed => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
      AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
      AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong"),
    }
  }
}

impl std::fmt::Display for AuthError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.status_and_message().1)
  }
}

impl IntoResponse for AuthError {
  fn into_response(self) -> Response {
    let (status, error_message) = self.status_and_message();
    let body = Json(json!({
        "error": error_message,
        "code": self.code(),
    }));
    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::body::to_bytes;

  #[tokio::test]
  async fn response_carries_status_and_code() {
    let response = AuthError::InvalidCredentials.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "username or password wrong");
    assert_eq!(body["code"], "invalid_credentials");
  }

  #[test]
  fn creation_failure_is_opaque() {
    let response = AuthError::TokenCreationFailed.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AuthError::TokenCreationFailed.to_string(), "internal error");
  }
}
