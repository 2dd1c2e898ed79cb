use crate::{
  claim::{CustomClaims, TokenClaims},
  error::TokenError,
  token_fields::{Field, SignedToken, TokenKind, TryNewField},
};
use jwt_compact::{
  alg::{Hs256, Hs256Key},
  AlgorithmExt, Header, ParseError, UntrustedToken, ValidationError,
};
use std::fmt;

/* -------------------------------- */
/// HMAC key of one token kind
pub struct SigningSecret {
  key: Hs256Key,
}

impl SigningSecret {
  pub fn new(secret: &str, kind: TokenKind) -> Result<Self, TokenError> {
    if secret.is_empty() {
      return Err(TokenError::EmptySigningKey(kind));
    }
    Ok(Self {
      key: Hs256Key::new(secret.as_bytes()),
    })
  }
}

impl fmt::Debug for SigningSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SigningSecret(..)")
  }
}

/* -------------------------------- */
/// Serializes claims into `base64url(header).base64url(claims).base64url(hmac)`.
/// The kind tag lives in the `typ` header field.
pub struct ClaimsCodec;

impl ClaimsCodec {
  /// Sign claims with the given secret
  pub fn encode(claims: &TokenClaims, secret: &SigningSecret) -> Result<SignedToken, TokenError> {
    let header = Header::empty().with_token_type(claims.kind.tag());
    let mut jwt_claims = jwt_compact::Claims::new(claims.custom.clone());
    jwt_claims.expiration = Some(claims.expires);

    let token = Hs256
      .token(&header, &jwt_claims, &secret.key)
      .map_err(|e| TokenError::Creation(e.to_string()))?;
    SignedToken::new(token).map_err(|e| TokenError::Creation(e.to_string()))
  }

  /// Parse and check the kind tag, then the signature. Expiry is left to the caller.
  pub fn decode(token: &SignedToken, expected: TokenKind, secret: &SigningSecret) -> Result<TokenClaims, TokenError> {
    let untrusted: UntrustedToken<'_> = match UntrustedToken::new(token.as_str()) {
      Ok(untrusted) => untrusted,
      Err(e) => return Err(Self::classify_parse_error(token, expected, e)),
    };

    // the kind tag must match before anything in the body is looked at
    check_kind(&untrusted, expected)?;

    let verified = Hs256
      .validator::<CustomClaims>(&secret.key)
      .validate(&untrusted)
      .map_err(|e| match e {
        ValidationError::InvalidSignature
        | ValidationError::InvalidSignatureLen { .. }
        | ValidationError::MalformedSignature(_) => TokenError::InvalidSignature,
        e => TokenError::Malformed(e.to_string()),
      })?;

    let claims = verified.claims();
    let Some(expires) = claims.expiration else {
      return Err(TokenError::Malformed("No expiration is specified in token".to_string()));
    };

    Ok(TokenClaims {
      kind: expected,
      expires,
      custom: claims.custom.clone(),
    })
  }

  /// A token whose header and claims parse on their own only has a broken
  /// signature segment, which counts as a signature failure.
  fn classify_parse_error(token: &SignedToken, expected: TokenKind, error: ParseError) -> TokenError {
    let malformed = || TokenError::Malformed(error.to_string());
    let Some((signed_part, _)) = token.as_str().rsplit_once('.') else {
      return malformed();
    };
    let unsigned = format!("{signed_part}.");
    let Ok(untrusted) = UntrustedToken::new(&unsigned) else {
      return malformed();
    };
    match check_kind(&untrusted, expected) {
      Ok(()) => TokenError::InvalidSignature,
      Err(e) => e,
    }
  }
}

fn check_kind(untrusted: &UntrustedToken<'_>, expected: TokenKind) -> Result<(), TokenError> {
  let found = untrusted.header().token_type.as_deref();
  if found != Some(expected.tag()) {
    return Err(TokenError::KindMismatch {
      expected,
      found: found.map(ToOwned::to_owned),
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    identity::Identity,
    token_fields::{Email, Username},
  };
  use base64::{engine::general_purpose, Engine as _};
  use chrono::DateTime;

  fn claims(kind: TokenKind) -> TokenClaims {
    let identity = Identity::new(
      1,
      Username::new("testuser1").unwrap(),
      Email::new("test@example.com").unwrap(),
      DateTime::from_timestamp(1547831775, 0).unwrap(),
    );
    TokenClaims::new(&identity, DateTime::from_timestamp(1700000300, 0).unwrap(), kind)
  }

  #[test]
  fn encoding_is_deterministic() {
    let secret = SigningSecret::new("abcdefghijkl", TokenKind::Access).unwrap();
    let first = ClaimsCodec::encode(&claims(TokenKind::Access), &secret).unwrap();
    let second = ClaimsCodec::encode(&claims(TokenKind::Access), &secret).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str().split('.').count(), 3);
  }

  #[test]
  fn kind_tag_is_in_header() {
    let secret = SigningSecret::new("mnopqrstuvwxyz", TokenKind::Refresh).unwrap();
    let token = ClaimsCodec::encode(&claims(TokenKind::Refresh), &secret).unwrap();
    let header = token.as_str().split('.').next().unwrap();
    let header: serde_json::Value = serde_json::from_slice(&general_purpose::URL_SAFE_NO_PAD.decode(header).unwrap()).unwrap();
    assert_eq!(header["typ"], "refresh-tkn");
    assert_eq!(header["alg"], "HS256");
  }

  #[test]
  fn decode_returns_encoded_claims() {
    let secret = SigningSecret::new("abcdefghijkl", TokenKind::Access).unwrap();
    let original = claims(TokenKind::Access);
    let token = ClaimsCodec::encode(&original, &secret).unwrap();
    let decoded = ClaimsCodec::decode(&token, TokenKind::Access, &secret).unwrap();
    assert_eq!(decoded, original);
  }

  #[test]
  fn decode_errors_are_distinct() {
    let secret = SigningSecret::new("abcdefghijkl", TokenKind::Access).unwrap();
    let other = SigningSecret::new("another-secret", TokenKind::Access).unwrap();
    let token = ClaimsCodec::encode(&claims(TokenKind::Access), &secret).unwrap();

    let malformed = SignedToken::new("definitely.not-a.token").unwrap();
    assert!(matches!(
      ClaimsCodec::decode(&malformed, TokenKind::Access, &secret),
      Err(TokenError::Malformed(_))
    ));
    assert!(matches!(
      ClaimsCodec::decode(&token, TokenKind::Refresh, &secret),
      Err(TokenError::KindMismatch {
        expected: TokenKind::Refresh,
        ..
      })
    ));
    assert!(matches!(
      ClaimsCodec::decode(&token, TokenKind::Access, &other),
      Err(TokenError::InvalidSignature)
    ));
  }

  #[test]
  fn any_last_signature_character_is_a_signature_error() {
    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    let secret = SigningSecret::new("abcdefghijkl", TokenKind::Access).unwrap();
    let token = ClaimsCodec::encode(&claims(TokenKind::Access), &secret).unwrap();
    let (signed_part, signature) = token.as_str().rsplit_once('.').unwrap();
    let (head, last) = signature.split_at(signature.len() - 1);

    for replacement in ALPHABET.chars().filter(|c| c.to_string() != last) {
      let tampered = SignedToken::new(format!("{signed_part}.{head}{replacement}")).unwrap();
      assert!(
        matches!(
          ClaimsCodec::decode(&tampered, TokenKind::Access, &secret),
          Err(TokenError::InvalidSignature)
        ),
        "last character {replacement} was not reported as a signature error"
      );
    }
  }

  #[test]
  fn broken_signature_segment_still_reports_kind_first() {
    let secret = SigningSecret::new("mnopqrstuvwxyz", TokenKind::Refresh).unwrap();
    let token = ClaimsCodec::encode(&claims(TokenKind::Refresh), &secret).unwrap();
    let (signed_part, _) = token.as_str().rsplit_once('.').unwrap();
    let broken = SignedToken::new(format!("{signed_part}.%%%")).unwrap();
    assert!(matches!(
      ClaimsCodec::decode(&broken, TokenKind::Access, &secret),
      Err(TokenError::KindMismatch { .. })
    ));
    assert!(matches!(
      ClaimsCodec::decode(&broken, TokenKind::Refresh, &secret),
      Err(TokenError::InvalidSignature)
    ));
  }

  #[test]
  fn empty_secret_is_rejected() {
    assert!(matches!(
      SigningSecret::new("", TokenKind::Refresh),
      Err(TokenError::EmptySigningKey(TokenKind::Refresh))
    ));
  }
}
