//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is CPU bound, so both operations run on the blocking thread pool
//! to keep actix workers responsive.

use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used for newly created hashes.
pub const DEFAULT_COST: u32 = 10;

/// Hashes passwords with bcrypt and a fresh salt per call.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher at [`DEFAULT_COST`].
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Use a custom work factor. Intended for tests, where cost 10 is slow.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor applied to new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let plaintext = Zeroizing::new(plaintext.to_owned());
        task::spawn_blocking(move || bcrypt::hash(plaintext.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let hash = hash.as_str().to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext.as_bytes(), &hash))
            .await
            .map_err(|err| PasswordHashError::verify(err.to_string()))?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}
