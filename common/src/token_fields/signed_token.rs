use super::{Field, TryNewField};
use anyhow::Result;
use serde::{
  de::{self, Visitor},
  Deserialize, Serialize,
};
use std::borrow::Cow;
use validator::Validate;

/// Compact signed token string, `header.claims.signature` in base64url.
/// Only the shape is checked here, integrity is checked by the codec.
#[derive(Debug, Clone, Eq, PartialEq, Validate)]
pub struct SignedToken {
  #[validate(length(min = 1))]
  value: String,
}
impl<'a, T> TryNewField<T> for SignedToken
where
  T: Into<Cow<'a, str>>,
{
  fn new(token_str: T) -> Result<Self> {
    let value = token_str.into().trim().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Field for SignedToken {
  fn as_str(&self) -> &str {
    &self.value
  }
  fn into_string(self) -> String {
    self.value
  }
}
impl Serialize for SignedToken {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}
impl<'de> Deserialize<'de> for SignedToken {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    struct SignedTokenVisitor;
    impl<'de> Visitor<'de> for SignedTokenVisitor {
      type Value = String;
      fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("signed token string")
      }
      fn visit_str<E>(self, str: &str) -> Result<Self::Value, E>
      where
        E: de::Error,
      {
        Ok(str.to_owned())
      }
    }

    let value = deserializer.deserialize_str(SignedTokenVisitor)?;

    Self::new(value).map_err(de::Error::custom)
  }
}
