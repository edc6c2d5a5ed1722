//! Root query resolvers.

use async_graphql::{Context, Object, Result};

use crate::domain::Error;

use super::types::{PostObject, UserObject};
use super::{RequestContext, graphql_error};

const GREETING: &str = "Hello World!";

/// Root `Query` type.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Constant greeting, useful as a smoke test.
    async fn info(&self) -> String {
        GREETING.to_owned()
    }

    /// All posts. Not implemented.
    async fn feed(&self) -> Result<Vec<PostObject>> {
        Err(graphql_error(Error::not_implemented("feed is not implemented")))
    }

    /// The user identified by the bearer token.
    async fn me(&self, ctx: &Context<'_>) -> Result<UserObject> {
        let request = ctx.data::<RequestContext>()?;
        request
            .current_user()
            .cloned()
            .map(UserObject::from)
            .ok_or_else(|| graphql_error(Error::unauthenticated("not authenticated")))
    }
}
