use super::{Field, TryNewField};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::Validate;

/// Email address, also used as the login name
#[derive(Debug, Clone, Eq, PartialEq, Hash, Validate)]
pub struct Email {
  #[validate(email)]
  value: String,
}
impl<'a, T: Into<Cow<'a, str>>> TryNewField<T> for Email {
  fn new(email: T) -> Result<Self> {
    let value = email.into().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Field for Email {
  fn as_str(&self) -> &str {
    &self.value
  }
  fn into_string(self) -> String {
    self.value
  }
}
impl Serialize for Email {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}
impl<'de> Deserialize<'de> for Email {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let value = String::deserialize(deserializer)?;
    Self::new(value).map_err(serde::de::Error::custom)
  }
}
