use super::AuthError;
use crate::constants::{BASIC_SCHEME, BEARER_SCHEME, REFRESH_TOKEN_HEADER};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose, Engine as _};
use libcommon::token_fields::{SignedToken, TryNewField};

/// `username:password` pair of a `Basic` authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
  pub username: String,
  pub password: String,
}

/// Credentials following `<scheme> ` in the authorization header, `None` when another scheme is used
fn scheme_credentials<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<Option<&'a str>, AuthError> {
  let Some(value) = headers.get(AUTHORIZATION) else {
    return Err(AuthError::NoAuthorizationHeader);
  };
  let Ok(value) = value.to_str() else {
    return Ok(None);
  };
  match value.split_once(' ') {
    Some((found, credentials)) if found == scheme => Ok(Some(credentials)),
    _ => Ok(None),
  }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<SignedToken, AuthError> {
  scheme_credentials(headers, BEARER_SCHEME)?
    .and_then(|token| SignedToken::new(token).ok())
    .ok_or(AuthError::NoBearerScheme)
}

pub fn basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, AuthError> {
  let encoded = scheme_credentials(headers, BASIC_SCHEME)?.ok_or(AuthError::NoBasicScheme)?;
  let decoded = general_purpose::STANDARD
    .decode(encoded.trim())
    .map_err(|_| AuthError::MalformedCredentialPair)?;
  let pair = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentialPair)?;
  let Some((username, password)) = pair.split_once(':') else {
    return Err(AuthError::MalformedCredentialPair);
  };
  Ok(BasicCredentials {
    username: username.to_string(),
    password: password.to_string(),
  })
}

pub fn refresh_token(headers: &HeaderMap) -> Result<SignedToken, AuthError> {
  headers
    .get(REFRESH_TOKEN_HEADER)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| SignedToken::new(v).ok())
    .ok_or(AuthError::NoRefreshHeader)
}
