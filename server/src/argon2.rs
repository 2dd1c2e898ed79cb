use crate::{
  constants::{ARGON2_CONFIG, ARGON2_SALT_LEN},
  error::*,
};
use rand::prelude::*;

pub fn generate_argon2(password: &str) -> Result<String> {
  let mut salt = [0u8; ARGON2_SALT_LEN];
  rand::thread_rng().fill_bytes(&mut salt);

  let hash = argon2::hash_encoded(password.as_bytes(), &salt, &ARGON2_CONFIG)?;

  Ok(hash)
}

pub fn verify_argon2(password: &str, encoded_hash: &str) -> Result<bool> {
  let matches = argon2::verify_encoded(encoded_hash, password.as_bytes())?;

  Ok(matches)
}

/// Random alphanumeric string, used as an initial password
pub fn generate_random_string(length: usize) -> Result<String> {
  const BASE_STR: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
  let mut rng = rand::thread_rng();
  let bytes = (0..length)
    .map(|_| BASE_STR.choose(&mut rng).copied().ok_or_else(|| anyhow!("empty alphabet")))
    .collect::<Result<Vec<u8>>>()?;
  Ok(String::from_utf8(bytes)?)
}
