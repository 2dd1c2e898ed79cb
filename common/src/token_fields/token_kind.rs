use crate::constants::{ACCESS_TOKEN_TAG, REFRESH_TOKEN_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a token. The tag is carried in the token header so that the kind
/// can be checked before the body is trusted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
  /// Short-lived, presented on every authorized call
  #[serde(rename = "access-tkn")]
  Access,
  /// Long-lived, only used to mint new access tokens
  #[serde(rename = "refresh-tkn")]
  Refresh,
}

impl TokenKind {
  pub fn tag(&self) -> &'static str {
    match self {
      TokenKind::Access => ACCESS_TOKEN_TAG,
      TokenKind::Refresh => REFRESH_TOKEN_TAG,
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serde_uses_header_tags() {
    for kind in [TokenKind::Access, TokenKind::Refresh] {
      assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.tag()));
      assert_eq!(kind.to_string(), kind.tag());
    }
  }
}
