//! Port for issuing and verifying bearer tokens.
use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signing the token failed.
        Sign { message: String } => "token signing failed: {message}",
        /// The token was malformed, tampered with, or expired.
        Invalid { message: String } => "token rejected: {message}",
    }
}

/// Signs tokens asserting a user identity and verifies them later.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a signed token for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Verify `token` and return the user id it asserts.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
