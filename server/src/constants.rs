pub const THREAD_NAME: &str = "card_ledger_server";

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "50051";

/// Default password length when random password is needed at the user creation.
pub const PASSWORD_LEN: usize = 32;

/// Upper bound of configurable token lifetimes and renewal threshold, 10 years in minutes
pub const MAX_TOKEN_LIFETIME_MINS: i64 = 10 * 365 * 24 * 60;

// Signing keys are read from these when not given on the command line
pub const ACCESS_TOKEN_KEY_VAR: &str = "ACCESS_TOKEN_KEY";
pub const REFRESH_TOKEN_KEY_VAR: &str = "REFRESH_TOKEN_KEY";

// Database settings
pub const DB_FILE_PATH: &str = "./users.db";
pub const USER_TABLE_NAME: &str = "users";

// Argon2 password hashing params
use argon2::{Config, Variant, Version};
pub const ARGON2_CONFIG: Config = Config {
  variant: Variant::Argon2id,
  version: Version::Version13,
  mem_cost: 4096,
  time_cost: 3,
  lanes: 4,
  secret: &[],
  ad: &[],
  hash_length: 32,
};
pub const ARGON2_SALT_LEN: usize = 32;

// Fully qualified RPC method names, served as POST routes
pub const AUTHENTICATE_USER_METHOD: &str = "/api.UserService/AuthenticateUser";
pub const REFRESH_TOKEN_METHOD: &str = "/api.UserService/RefreshToken";
pub const LOGOUT_USER_METHOD: &str = "/api.UserService/LogoutUser";
pub const HEALTH_METHOD: &str = "/api.HealthService/Health";

// Request metadata
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
pub const BEARER_SCHEME: &str = "Bearer";
pub const BASIC_SCHEME: &str = "Basic";
/// Only token type handed out
pub const TOKEN_TYPE: &str = "bearer";
