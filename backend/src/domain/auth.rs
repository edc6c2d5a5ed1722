//! Authentication primitives: signup requests, login credentials, hashes.
//!
//! Inbound adapters hand the raw argument strings to these constructors.
//! Nothing is trimmed or shape-checked: the GraphQL schema already guarantees
//! each argument is a string, and the account service stores and looks up
//! exactly what the client sent. Plaintext passwords are held in
//! [`Zeroizing`] buffers so they are wiped once the request completes.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, User, UserName};

/// Signup input as received from the client.
///
/// # Examples
/// ```
/// use feedql::domain::SignupRequest;
///
/// let request = SignupRequest::new(" a@b.com", "pw123456", "A");
/// assert_eq!(request.email().as_ref(), " a@b.com");
/// assert_eq!(request.name().as_ref(), "A");
/// ```
#[derive(Clone)]
pub struct SignupRequest {
    email: EmailAddress,
    password: Zeroizing<String>,
    name: UserName,
}

impl SignupRequest {
    /// Capture signup arguments verbatim.
    pub fn new(email: &str, password: &str, name: &str) -> Self {
        Self {
            email: EmailAddress::new(email),
            password: Zeroizing::new(password.to_owned()),
            name: UserName::new(name),
        }
    }

    /// Email the account will be registered under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name for the account.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

/// Raw login credentials.
///
/// An email with no exact match is reported as an unknown user, and an empty
/// password simply fails to match.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Capture credentials verbatim.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Email string used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stored password hash (bcrypt modular crypt format).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`](super::ports::PasswordHasher).
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    /// Signed bearer token.
    pub token: String,
    /// Account the token was issued for.
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn signup_keeps_every_argument_verbatim() {
        let request = SignupRequest::new(" a@b.com ", " pw ", " A ");
        assert_eq!(request.email().as_ref(), " a@b.com ");
        assert_eq!(request.password(), " pw ");
        assert_eq!(request.name().as_ref(), " A ");
    }

    #[rstest]
    fn signup_allows_empty_strings() {
        let request = SignupRequest::new("", "", "");
        assert_eq!(request.email().as_ref(), "");
        assert_eq!(request.password(), "");
        assert_eq!(request.name().as_ref(), "");
    }

    #[rstest]
    fn login_keeps_email_untrimmed() {
        let creds = LoginCredentials::new("  a@b.com ", " pw ");
        assert_eq!(creds.email(), "  a@b.com ");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    fn debug_output_hides_passwords() {
        let signup = SignupRequest::new("a@b.com", "hunter22", "A");
        let login = LoginCredentials::new("a@b.com", "hunter22");
        assert!(!format!("{signup:?}").contains("hunter22"));
        assert!(!format!("{login:?}").contains("hunter22"));
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$10$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
        assert_eq!(hash.as_str(), "$2b$10$secret");
    }
}
