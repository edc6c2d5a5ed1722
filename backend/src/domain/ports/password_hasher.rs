//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be checked (for example it is malformed).
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// Implementations must salt each call independently, so hashing the same
/// plaintext twice yields different hashes that both verify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
