use crate::token_fields::TokenKind;
use thiserror::Error;

/// Describes things that can go wrong while issuing or verifying tokens
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Signing key for {0} tokens must not be empty")]
  EmptySigningKey(TokenKind),
  #[error("Malformed token: {0}")]
  Malformed(String),
  #[error("Token is not from type {expected}")]
  KindMismatch { expected: TokenKind, found: Option<String> },
  #[error("Token signature is invalid")]
  InvalidSignature,
  #[error("Token is expired")]
  Expired,
  #[error("Failed to create token: {0}")]
  Creation(String),
}
