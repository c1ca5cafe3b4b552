//! Listener configuration shared by every service.
//!
//! Values come from a lookup function rather than `std::env` directly so
//! tests can supply their own variables without touching process state.

use std::net::SocketAddr;

use crate::error::AppError;

/// Reads a variable from the process environment.
#[must_use]
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parses an optional variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns `AppError::Config` if the variable is set but does not parse.
pub fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be valid: {e}"))),
        None => Ok(default),
    }
}

/// Address a service binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
}

impl ListenerConfig {
    /// Reads `HOST` and `PORT`, defaulting to `0.0.0.0` and `default_port`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16`.
    pub fn from_lookup<F>(lookup: &F, default_port: u16) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup, "PORT", default_port)?,
        })
    }

    /// Resolves the configured host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the pair is not a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
