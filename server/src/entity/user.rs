use super::{EncodedHash, Entity, Password, TryNewEntity};
use crate::{argon2::generate_random_string, constants::PASSWORD_LEN, error::*, log::*};
use chrono::{DateTime, SubsecRound, Utc};
use libcommon::{
  token_fields::{Email, Field, Username},
  Identity,
};

/// User about to be written to the table. The id is assigned on insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: Username,
  pub email: Email,
  pub encoded_hash: EncodedHash,
  pub created: DateTime<Utc>,
}

impl NewUser {
  /// Hash the given password, or a random one that is printed once when none is given
  pub fn new(name: &Username, email: &Email, password: Option<Password>) -> Result<Self> {
    let password = match password {
      Some(p) => p,
      None => {
        let random_pass = Password::new(generate_random_string(PASSWORD_LEN)?)?;
        warn!(
          r#"
-----------------------------------------------------------------------------------------------------------------------
No password was given for {}. A random password was generated:

{}

It is shown only once. Keep it somewhere safe.
-----------------------------------------------------------------------------------------------------------------------
"#,
          email.as_str(),
          random_pass.as_str()
        );
        random_pass
      }
    };

    Ok(Self {
      name: name.clone(),
      email: email.clone(),
      encoded_hash: EncodedHash::generate(&password)?,
      // whole seconds, as stored in the table
      created: Utc::now().trunc_subsecs(0),
    })
  }
}

/// Stored user
#[derive(Debug, Clone)]
pub struct User {
  pub identity: Identity,
  pub encoded_hash: EncodedHash,
}

impl User {
  pub fn verify_password(&self, password: &Password) -> Result<bool> {
    password.verify(&self.encoded_hash)
  }
}
