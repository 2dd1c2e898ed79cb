use crate::{
  claim::TokenClaims,
  codec::{ClaimsCodec, SigningSecret},
  constants::{ACCESS_TOKEN_DURATION_MINS, REFRESH_TOKEN_DURATION_MINS, REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS},
  error::TokenError,
  identity::Identity,
  token_fields::{SignedToken, TokenKind},
};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, info};

/* -------------------------------- */
/// Signing keys, one per token kind. Immutable once constructed.
#[derive(Debug)]
pub struct TokenKeys {
  access: SigningSecret,
  refresh: SigningSecret,
}

impl TokenKeys {
  /// Fails if either key is empty
  pub fn new(access_key: &str, refresh_key: &str) -> Result<Self, TokenError> {
    Ok(Self {
      access: SigningSecret::new(access_key, TokenKind::Access)?,
      refresh: SigningSecret::new(refresh_key, TokenKind::Refresh)?,
    })
  }

  pub fn key_for(&self, kind: TokenKind) -> &SigningSecret {
    match kind {
      TokenKind::Access => &self.access,
      TokenKind::Refresh => &self.refresh,
    }
  }
}

/* -------------------------------- */
#[derive(Debug, Clone)]
/// Lifetimes of issued tokens
pub struct ExpiryPolicy {
  pub access_lifetime: Duration,
  pub refresh_lifetime: Duration,
  /// Refresh tokens with less remaining lifetime than this are rotated
  pub renewal_threshold: Duration,
}

impl Default for ExpiryPolicy {
  fn default() -> Self {
    Self {
      access_lifetime: Duration::minutes(ACCESS_TOKEN_DURATION_MINS),
      refresh_lifetime: Duration::minutes(REFRESH_TOKEN_DURATION_MINS),
      renewal_threshold: Duration::minutes(REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS),
    }
  }
}

/* -------------------------------- */
#[derive(Debug, Clone, PartialEq)]
/// Outcome of a successful verification
pub struct VerifiedToken {
  pub identity: Identity,
  pub expires: DateTime<Utc>,
}

impl VerifiedToken {
  pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Duration {
    self.expires - now
  }
}

/// Issues and verifies tokens
pub trait TokenGenerator: Send + Sync {
  /// Current instant of the generator's clock
  fn now(&self) -> DateTime<Utc>;

  fn policy(&self) -> &ExpiryPolicy;

  /// `now + duration`, truncated down to the whole seconds carried by `exp`.
  /// The result may fall up to one second short of the exact sum, never past it.
  /// Fails when the sum leaves the representable range.
  fn expiration_time(&self, duration: Duration) -> Result<DateTime<Utc>, TokenError> {
    let Some(expires) = self.now().checked_add_signed(duration) else {
      return Err(TokenError::Creation(format!(
        "Expiry {} seconds from now is out of range",
        duration.num_seconds()
      )));
    };
    Ok(expires.trunc_subsecs(0))
  }

  fn create_token(&self, identity: &Identity, expires: DateTime<Utc>, kind: TokenKind) -> Result<SignedToken, TokenError>;

  fn verify_token(&self, token: &SignedToken, kind: TokenKind) -> Result<VerifiedToken, TokenError>;
}

/* -------------------------------- */
/// HMAC-SHA256 token generator with an injectable clock
pub struct JwtGenerator<F = fn() -> DateTime<Utc>>
where
  F: Fn() -> DateTime<Utc>,
{
  keys: TokenKeys,
  policy: ExpiryPolicy,
  clock: F,
}

impl JwtGenerator {
  pub fn new(keys: TokenKeys, policy: ExpiryPolicy) -> Self {
    Self {
      keys,
      policy,
      clock: Utc::now,
    }
  }
}

impl<F> JwtGenerator<F>
where
  F: Fn() -> DateTime<Utc>,
{
  pub fn with_clock(keys: TokenKeys, policy: ExpiryPolicy, clock: F) -> Self {
    Self { keys, policy, clock }
  }
}

impl<F> TokenGenerator for JwtGenerator<F>
where
  F: Fn() -> DateTime<Utc> + Send + Sync,
{
  fn now(&self) -> DateTime<Utc> {
    (self.clock)()
  }

  fn policy(&self) -> &ExpiryPolicy {
    &self.policy
  }

  fn create_token(&self, identity: &Identity, expires: DateTime<Utc>, kind: TokenKind) -> Result<SignedToken, TokenError> {
    let claims = TokenClaims::new(identity, expires, kind);
    let token = ClaimsCodec::encode(&claims, self.keys.key_for(kind))?;
    info!("[{}] Issued {} token, exp: {}", claims.custom.subject, kind, expires);
    Ok(token)
  }

  fn verify_token(&self, token: &SignedToken, kind: TokenKind) -> Result<VerifiedToken, TokenError> {
    let claims = ClaimsCodec::decode(token, kind, self.keys.key_for(kind))?;
    if self.now() > claims.expires {
      debug!("[{}] {} token expired at {}", claims.custom.subject, kind, claims.expires);
      return Err(TokenError::Expired);
    }
    Ok(VerifiedToken {
      expires: claims.expires,
      identity: claims.custom.user,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::token_fields::{Email, Field, TryNewField, Username};

  const NOW: i64 = 1_700_000_000;

  fn fixed_clock() -> DateTime<Utc> {
    DateTime::from_timestamp(NOW, 0).unwrap()
  }

  fn generator() -> JwtGenerator<fn() -> DateTime<Utc>> {
    let keys = TokenKeys::new("abcdefghijkl", "mnopqrstuvwxyz").unwrap();
    JwtGenerator::with_clock(keys, ExpiryPolicy::default(), fixed_clock as fn() -> DateTime<Utc>)
  }

  fn identity() -> Identity {
    Identity::new(
      1,
      Username::new("testuser1").unwrap(),
      Email::new("test@example.com").unwrap(),
      DateTime::from_timestamp(1547831775, 0).unwrap(),
    )
  }

  fn tamper(token: &SignedToken, position: usize) -> SignedToken {
    let mut chars: Vec<char> = token.as_str().chars().collect();
    chars[position] = if chars[position] == 'A' { 'B' } else { 'A' };
    SignedToken::new(chars.into_iter().collect::<String>()).unwrap()
  }

  #[test]
  fn expiration_time_adds_duration_to_clock() {
    let gen = generator();
    let expires = gen.expiration_time(Duration::minutes(5)).unwrap();
    assert_eq!(expires.timestamp(), NOW + 300);
  }

  #[test]
  fn expiration_time_truncates_to_whole_seconds() {
    let gen = JwtGenerator::with_clock(
      TokenKeys::new("abcdefghijkl", "mnopqrstuvwxyz").unwrap(),
      ExpiryPolicy::default(),
      || DateTime::from_timestamp(NOW, 999_000_000).unwrap(),
    );
    let expires = gen.expiration_time(Duration::seconds(10)).unwrap();
    assert_eq!(expires, DateTime::from_timestamp(NOW + 10, 0).unwrap());
  }

  #[test]
  fn out_of_range_expiry_is_an_error() {
    let gen = generator();
    let million_years = Duration::try_days(365 * 1_000_000).unwrap();
    assert!(matches!(gen.expiration_time(million_years), Err(TokenError::Creation(_))));
  }

  #[test]
  fn empty_keys_fail_at_construction() {
    assert!(matches!(
      TokenKeys::new("", "refresh"),
      Err(TokenError::EmptySigningKey(TokenKind::Access))
    ));
    assert!(matches!(
      TokenKeys::new("access", ""),
      Err(TokenError::EmptySigningKey(TokenKind::Refresh))
    ));
  }

  #[test]
  fn verify_returns_embedded_identity() {
    let gen = generator();
    for kind in [TokenKind::Access, TokenKind::Refresh] {
      let expires = gen.expiration_time(Duration::minutes(1)).unwrap();
      let token = gen.create_token(&identity(), expires, kind).unwrap();
      let verified = gen.verify_token(&token, kind).unwrap();
      assert_eq!(verified.identity, identity());
      assert_eq!(verified.expires, expires);
    }
  }

  #[test]
  fn kinds_are_isolated() {
    let gen = generator();
    let expires = gen.expiration_time(Duration::hours(1)).unwrap();
    let access = gen.create_token(&identity(), expires, TokenKind::Access).unwrap();
    let refresh = gen.create_token(&identity(), expires, TokenKind::Refresh).unwrap();

    assert!(matches!(
      gen.verify_token(&refresh, TokenKind::Access),
      Err(TokenError::KindMismatch {
        expected: TokenKind::Access,
        ..
      })
    ));
    assert!(matches!(
      gen.verify_token(&access, TokenKind::Refresh),
      Err(TokenError::KindMismatch {
        expected: TokenKind::Refresh,
        ..
      })
    ));
  }

  #[test]
  fn kind_mismatch_is_reported_before_expiry() {
    let gen = generator();
    let expired = gen.expiration_time(Duration::minutes(-10)).unwrap();
    let refresh = gen.create_token(&identity(), expired, TokenKind::Refresh).unwrap();
    assert!(matches!(
      gen.verify_token(&refresh, TokenKind::Access),
      Err(TokenError::KindMismatch { .. })
    ));
  }

  #[test]
  fn expiry_is_strict() {
    let gen = generator();
    let past = gen.create_token(&identity(), fixed_clock() - Duration::seconds(1), TokenKind::Access).unwrap();
    assert!(matches!(gen.verify_token(&past, TokenKind::Access), Err(TokenError::Expired)));

    let future = gen.create_token(&identity(), fixed_clock() + Duration::seconds(1), TokenKind::Access).unwrap();
    assert!(gen.verify_token(&future, TokenKind::Access).is_ok());

    // the instant of expiry itself is still valid
    let boundary = gen.create_token(&identity(), fixed_clock(), TokenKind::Access).unwrap();
    assert!(gen.verify_token(&boundary, TokenKind::Access).is_ok());
  }

  #[test]
  fn tampered_signature_fails() {
    let gen = generator();
    let expires = gen.expiration_time(Duration::minutes(5)).unwrap();
    let token = gen.create_token(&identity(), expires, TokenKind::Access).unwrap();
    let signature_start = token.as_str().rfind('.').unwrap() + 1;
    let len = token.as_str().len();

    for position in signature_start..len {
      let tampered = tamper(&token, position);
      assert!(
        matches!(gen.verify_token(&tampered, TokenKind::Access), Err(TokenError::InvalidSignature)),
        "position {position} was accepted"
      );
    }
  }

  #[test]
  fn token_from_other_keys_fails() {
    let gen = generator();
    let foreign = JwtGenerator::with_clock(
      TokenKeys::new("foreign-access", "foreign-refresh").unwrap(),
      ExpiryPolicy::default(),
      fixed_clock,
    );
    let expires = gen.expiration_time(Duration::minutes(5)).unwrap();
    let token = foreign.create_token(&identity(), expires, TokenKind::Access).unwrap();
    assert!(matches!(
      gen.verify_token(&token, TokenKind::Access),
      Err(TokenError::InvalidSignature)
    ));
  }

  #[test]
  fn remaining_lifetime_uses_given_instant() {
    let gen = generator();
    let expires = gen.expiration_time(Duration::minutes(5)).unwrap();
    let token = gen.create_token(&identity(), expires, TokenKind::Refresh).unwrap();
    let verified = gen.verify_token(&token, TokenKind::Refresh).unwrap();
    assert_eq!(verified.remaining_lifetime(gen.now()), Duration::minutes(5));
  }
}
