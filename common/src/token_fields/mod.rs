mod email;
mod signed_token;
mod token_kind;
mod username;

pub use email::Email;
pub use signed_token::SignedToken;
pub use token_kind::TokenKind;
pub use username::Username;

pub trait Field
where
  Self: std::marker::Sized,
{
  fn as_str(&self) -> &str;
  fn into_string(self) -> String;
}

pub trait TryNewField<T>
where
  Self: std::marker::Sized,
{
  fn new(input: T) -> Result<Self, anyhow::Error>;
}
