//! Account use-cases: signup, login, and bearer token resolution.
//!
//! The service owns the ordering guarantees of each flow. Signup is strictly
//! hash, create, issue. Login is strictly lookup, compare, issue, so an
//! unknown email is reported before any password work happens.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::ports::{
    PasswordHashError, PasswordHasher, TokenError, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use super::{AuthPayload, EmailAddress, Error, LoginCredentials, NewUser, SignupRequest, User};

/// Message returned when login names an email with no account.
pub const NO_SUCH_USER: &str = "no such user found";
/// Message returned when login supplies the wrong password.
pub const INVALID_PASSWORD: &str = "invalid password";

/// Coordinates the account ports on behalf of inbound adapters.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Wire the service to its ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new user and issue a token for it.
    ///
    /// Inputs are stored as given. Fails with `Conflict` when the email is
    /// taken; nothing is stored in that case.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthPayload, Error> {
        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            name: request.name().clone(),
            email: request.email().clone(),
            password_hash,
        };
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(map_persistence_error)?;
        let token = self.tokens.issue(user.id()).map_err(map_token_error)?;
        info!(user_id = %user.id(), "user signed up");
        Ok(AuthPayload { token, user })
    }

    /// Check credentials and issue a fresh token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthPayload, Error> {
        let email = EmailAddress::new(credentials.email());
        let record = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(NO_SUCH_USER))?;
        let valid = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !valid {
            debug!(user_id = %record.user.id(), "password mismatch");
            return Err(Error::unauthenticated(INVALID_PASSWORD));
        }
        let token = self
            .tokens
            .issue(record.user.id())
            .map_err(map_token_error)?;
        info!(user_id = %record.user.id(), "user logged in");
        Ok(AuthPayload {
            token,
            user: record.user,
        })
    }

    /// Resolve a bearer token to the user it names.
    ///
    /// A token that fails verification, or names a user that no longer
    /// exists, yields `Unauthenticated`. Repository failures keep their own
    /// codes so callers can tell them apart in logs.
    pub async fn user_for_token(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::unauthenticated("invalid token")
        })?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthenticated("token names an unknown user"))
    }
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict("email already registered").with_details(json!({ "email": email }))
        }
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store query failed: {message}"))
        }
    }
}

fn map_hash_error(err: PasswordHashError) -> Error {
    Error::internal(err.to_string())
}

fn map_token_error(err: TokenError) -> Error {
    Error::internal(err.to_string())
}
