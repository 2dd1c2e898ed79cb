use super::AuthError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use libcommon::Identity;

/// Identity attached by the request gate. Extracting it in a handler that runs
/// without one is rejected as unauthenticated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
  S: Send + Sync,
{
  type Rejection = AuthError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<AuthenticatedUser>()
      .cloned()
      .ok_or(AuthError::Unauthenticated)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::Request;
  use chrono::DateTime;
  use libcommon::token_fields::{Email, TryNewField, Username};

  #[tokio::test]
  async fn missing_identity_is_unauthenticated() {
    let (mut parts, _) = Request::new(()).into_parts();
    let res = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
    assert!(matches!(res, Err(AuthError::Unauthenticated)));
  }

  #[tokio::test]
  async fn attached_identity_is_returned() {
    let identity = Identity::new(
      1,
      Username::new("testuser1").unwrap(),
      Email::new("test@example.com").unwrap(),
      DateTime::from_timestamp(1547831775, 0).unwrap(),
    );
    let (mut parts, _) = Request::new(()).into_parts();
    parts.extensions.insert(AuthenticatedUser(identity.clone()));
    let AuthenticatedUser(found) = AuthenticatedUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(found, identity);
  }
}
