//! Per-request context derived from the `Authorization` header.

use tracing::{debug, warn};

use crate::domain::{AccountService, ErrorCode, User};

/// Data visible to every resolver of one request.
///
/// `current_user` is `Some` only when the request carried a bearer token that
/// verified and whose user still exists.
#[derive(Clone)]
pub struct RequestContext {
    current_user: Option<User>,
    accounts: AccountService,
}

impl RequestContext {
    /// Context for a caller with no usable bearer token.
    pub fn anonymous(accounts: AccountService) -> Self {
        Self {
            current_user: None,
            accounts,
        }
    }

    /// Context for a caller whose token resolved to `user`.
    pub fn authenticated(user: User, accounts: AccountService) -> Self {
        Self {
            current_user: Some(user),
            accounts,
        }
    }

    /// Caller identified by the bearer token, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Account service used by the mutation resolvers.
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
}

/// Builds a [`RequestContext`] for each incoming request.
#[derive(Clone)]
pub struct ContextFactory {
    accounts: AccountService,
}

impl ContextFactory {
    /// Create a factory resolving tokens through `accounts`.
    pub fn new(accounts: AccountService) -> Self {
        Self { accounts }
    }

    /// Resolve the caller from the raw `Authorization` header value.
    ///
    /// Never fails: any problem with the header, the token, or the user
    /// lookup is logged and yields an anonymous context.
    pub async fn build(&self, authorization: Option<&str>) -> RequestContext {
        let Some(header) = authorization else {
            return RequestContext::anonymous(self.accounts.clone());
        };
        let Some(token) = bearer_token(header) else {
            debug!("authorization header is not a bearer token");
            return RequestContext::anonymous(self.accounts.clone());
        };
        match self.accounts.user_for_token(token).await {
            Ok(user) => RequestContext::authenticated(user, self.accounts.clone()),
            Err(err) if err.code() == ErrorCode::Unauthenticated => {
                debug!(reason = err.message(), "continuing as anonymous");
                RequestContext::anonymous(self.accounts.clone())
            }
            Err(err) => {
                warn!(code = %err.code(), error = %err, "user lookup failed; continuing as anonymous");
                RequestContext::anonymous(self.accounts.clone())
            }
        }
    }
}

/// Extract the token from `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
