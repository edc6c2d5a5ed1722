//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants; services translate those into domain errors.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
