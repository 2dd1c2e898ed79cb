mod authenticate_user;
mod health_check;
mod logout_user;
mod refresh_token;
pub mod response;

pub use authenticate_user::authenticate_user;
pub use health_check::health_check;
pub use logout_user::logout_user;
pub use refresh_token::refresh_token;
