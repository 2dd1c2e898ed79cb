/// Header tag of access tokens
pub const ACCESS_TOKEN_TAG: &str = "access-tkn";
/// Header tag of refresh tokens
pub const REFRESH_TOKEN_TAG: &str = "refresh-tkn";

/// Default lifetime of access tokens in minutes
pub const ACCESS_TOKEN_DURATION_MINS: i64 = 5;
/// Default lifetime of refresh tokens in minutes [default: 7 days]
pub const REFRESH_TOKEN_DURATION_MINS: i64 = 7 * 24 * 60;
/// Refresh tokens with less remaining lifetime than this are rotated on refresh
pub const REFRESH_TOKEN_RENEWAL_THRESHOLD_MINS: i64 = 10;
