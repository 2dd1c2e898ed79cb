mod claim;
mod codec;
mod constants;
mod error;
mod generator;
mod identity;

pub mod token_fields;

pub use claim::{CustomClaims, TokenClaims};
pub use codec::{ClaimsCodec, SigningSecret};
pub use constants::{ACCESS_TOKEN_DURATION_MINS, REFRESH_TOKEN_DURATION_MINS, REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS};
pub use error::TokenError;
pub use generator::{ExpiryPolicy, JwtGenerator, TokenGenerator, TokenKeys, VerifiedToken};
pub use identity::Identity;
