//! Environment lookups used when the logger registry initializes itself.
//!
//! - `EXITUS_LOG_BACKEND` - `tracing` installs the tracing backend, anything
//!   else (or unset) leaves the registry empty
//! - `EXITUS_LOG_LEVEL` - least severe level the tracing backend handles
//!   (`trace`, `debug`, `info`, `warn`, `error`, `fatal`; default `trace`)

use std::str::FromStr;

pub const LOG_BACKEND_VAR: &str = "EXITUS_LOG_BACKEND";
pub const LOG_LEVEL_VAR: &str = "EXITUS_LOG_LEVEL";

/// Get environment variable parsed as type T, or return default.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as an optional value.
///
/// `None` when the variable is unset or does not parse.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
