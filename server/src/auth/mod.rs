mod error;
mod extractor;
mod header;
mod interceptor;

pub use error::AuthError;
pub use extractor::AuthenticatedUser;
pub use header::{basic_credentials, bearer_token, refresh_token};
pub use interceptor::request_gate;
