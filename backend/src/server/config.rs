//! Server configuration parsing and validation.
//!
//! Environment-driven settings are read through [`mockable::Env`] so they can
//! be validated in isolation. Debug builds tolerate missing or malformed
//! values with a warning; release builds reject them.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroize;

use crate::outbound::security::JwtSecret;

pub(crate) const PORT_ENV: &str = "PORT";
pub(crate) const HOST_ENV: &str = "HOST";
pub(crate) const SECRET_ENV: &str = "APP_SECRET";
pub(crate) const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Minimum signing secret length accepted by release builds.
pub const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to defaults and warn.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use feedql::server::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated server settings.
#[derive(Clone)]
pub struct ServerSettings {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Token signing secret.
    pub secret: JwtSecret,
    /// PostgreSQL URL; `None` selects the in-memory user store.
    pub database_url: Option<String>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("secret", &self.secret)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Errors raised while validating server configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short for release builds.
    #[error("APP_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Build server settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use feedql::server::{BuildMode, server_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "APP_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "DATABASE_URL" => Some("postgres://localhost/feedql".to_owned()),
///     _ => None,
/// });
///
/// let settings = server_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.bind_addr.port(), 4000);
/// ```
pub fn server_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ServerSettings, ServerConfigError> {
    let port = port_from_env(env, mode)?;
    let host = host_from_env(env, mode)?;
    let secret = secret_from_env(env, mode)?;
    let database_url = database_url_from_env(env, mode)?;
    Ok(ServerSettings {
        bind_addr: SocketAddr::new(host, port),
        secret,
        database_url,
    })
}

/// Read a variable, treating blank values as unset.
fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn port_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u16, ServerConfigError> {
    let Some(value) = non_blank(env, PORT_ENV) else {
        return Ok(DEFAULT_PORT);
    };
    match value.trim().parse::<u16>() {
        Ok(port) => Ok(port),
        Err(_) if mode.is_debug() => {
            warn!(value = %value, "invalid PORT; using default {DEFAULT_PORT}");
            Ok(DEFAULT_PORT)
        }
        Err(_) => Err(ServerConfigError::InvalidEnv {
            name: PORT_ENV,
            value,
            expected: "a TCP port number (0-65535)",
        }),
    }
}

fn host_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<IpAddr, ServerConfigError> {
    let Some(value) = non_blank(env, HOST_ENV) else {
        return Ok(DEFAULT_HOST);
    };
    match value.trim().parse::<IpAddr>() {
        Ok(host) => Ok(host),
        Err(_) if mode.is_debug() => {
            warn!(value = %value, "invalid HOST; binding all interfaces");
            Ok(DEFAULT_HOST)
        }
        Err(_) => Err(ServerConfigError::InvalidEnv {
            name: HOST_ENV,
            value,
            expected: "an IPv4 or IPv6 address",
        }),
    }
}

fn secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<JwtSecret, ServerConfigError> {
    let Some(mut value) = non_blank(env, SECRET_ENV) else {
        if mode.is_debug() {
            warn!("APP_SECRET not set; using an ephemeral secret (tokens die with the process)");
            return Ok(ephemeral_secret());
        }
        return Err(ServerConfigError::MissingEnv { name: SECRET_ENV });
    };
    let length = value.len();
    if length < SECRET_MIN_LEN {
        if !mode.is_debug() {
            value.zeroize();
            return Err(ServerConfigError::SecretTooShort {
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
        warn!(length, min_len = SECRET_MIN_LEN, "APP_SECRET is shorter than recommended");
    }
    let secret = JwtSecret::new(value.as_bytes());
    value.zeroize();
    Ok(secret)
}

fn ephemeral_secret() -> JwtSecret {
    let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
    OsRng.fill_bytes(&mut bytes);
    JwtSecret::new(bytes)
}

fn database_url_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<String>, ServerConfigError> {
    match non_blank(env, DATABASE_URL_ENV) {
        Some(url) => Ok(Some(url)),
        None if mode.is_debug() => {
            warn!("DATABASE_URL not set; users are kept in memory");
            Ok(None)
        }
        None => Err(ServerConfigError::MissingEnv {
            name: DATABASE_URL_ENV,
        }),
    }
}

#[cfg(test)]
mod tests;
