//! Root mutation resolvers.

use async_graphql::{Context, Object, Result};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, SignupRequest};

use super::types::{AuthPayloadObject, PostObject};
use super::{RequestContext, graphql_error};

/// Root `Mutation` type.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a post. Not implemented.
    async fn post(&self, url: String, description: String) -> Result<PostObject> {
        debug!(%url, description_len = description.len(), "post mutation rejected");
        Err(graphql_error(Error::not_implemented("post is not implemented")))
    }

    /// Register a new account and return a token for it.
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<Option<AuthPayloadObject>> {
        let request = ctx.data::<RequestContext>()?;
        let password = Zeroizing::new(password);
        let payload = request
            .accounts()
            .signup(SignupRequest::new(&email, &password, &name))
            .await
            .map_err(graphql_error)?;
        Ok(Some(payload.into()))
    }

    /// Exchange email and password for a token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<Option<AuthPayloadObject>> {
        let request = ctx.data::<RequestContext>()?;
        let password = Zeroizing::new(password);
        let credentials = LoginCredentials::new(&email, &password);
        let payload = request
            .accounts()
            .login(&credentials)
            .await
            .map_err(graphql_error)?;
        Ok(Some(payload.into()))
    }
}
