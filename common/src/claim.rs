use crate::{
  identity::Identity,
  token_fields::{Field, TokenKind},
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Token body besides the standard timing claims. Field order is fixed, so the
/// serialized form is reproducible for the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomClaims {
  pub user: Identity,
  #[serde(rename = "sub")]
  pub subject: String,
  #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
  pub id_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Claims of a token together with its kind tag and expiry
pub struct TokenClaims {
  pub kind: TokenKind,
  pub expires: DateTime<Utc>,
  pub custom: CustomClaims,
}

impl TokenClaims {
  pub fn new(identity: &Identity, expires: DateTime<Utc>, kind: TokenKind) -> Self {
    let id_hash = match kind {
      TokenKind::Access => Some(id_hash(identity, kind)),
      TokenKind::Refresh => None,
    };
    Self {
      kind,
      expires,
      custom: CustomClaims {
        user: identity.to_owned(),
        subject: identity.subject(),
        id_hash,
      },
    }
  }
}

/// Correlation tag over name, email and kind. Not unique and never checked.
fn id_hash(identity: &Identity, kind: TokenKind) -> String {
  let mut hasher = <Sha256 as Digest>::new();
  hasher.update(identity.name.as_str());
  hasher.update(identity.email.as_str());
  hasher.update(kind.tag());
  general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}
