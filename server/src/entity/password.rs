use super::{EncodedHash, Entity, TryNewEntity};
use crate::{argon2::*, error::*};
use std::{borrow::Cow, fmt};
use validator::Validate;

#[derive(Clone, Validate)]
/// Plain password as presented at login or user creation
pub struct Password {
  #[validate(length(min = 1))]
  value: String,
}
impl<'a, T: Into<Cow<'a, str>>> TryNewEntity<T> for Password {
  fn new(password: T) -> Result<Self> {
    let value = password.into().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Entity for Password {
  fn as_str(&self) -> &str {
    &self.value
  }
  fn into_string(self) -> String {
    self.value
  }
}
impl Password {
  pub fn hash(&self) -> Result<String> {
    generate_argon2(self.as_str())
  }
  pub fn verify(&self, encoded_hash: &EncodedHash) -> Result<bool> {
    verify_argon2(self.as_str(), encoded_hash.as_str())
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(..)")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_password_is_rejected() {
    assert!(Password::new("").is_err());
  }

  #[test]
  fn verify_against_own_hash() {
    let password = Password::new("passwd").unwrap();
    let encoded_hash = EncodedHash::generate(&password).unwrap();
    assert!(password.verify(&encoded_hash).unwrap());
    assert!(!Password::new("wrongpass").unwrap().verify(&encoded_hash).unwrap());
  }

  #[test]
  fn debug_hides_value() {
    let password = Password::new("passwd").unwrap();
    assert!(!format!("{password:?}").contains("passwd"));
  }
}
