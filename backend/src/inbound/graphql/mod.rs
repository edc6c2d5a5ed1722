//! GraphQL adapter: schema, resolvers, and per-request context.
//!
//! - [`QueryRoot`]: `info`, `feed`, `me`
//! - [`MutationRoot`]: `post`, `signup`, `login`
//! - [`ContextFactory`]: turns an `Authorization` header into a
//!   [`RequestContext`] attached to each execution
//!
//! Resolvers delegate to [`crate::domain::AccountService`] and convert domain
//! errors into GraphQL errors carrying `extensions.code`.

mod context;
mod error;
mod mutation;
mod query;
mod types;

use async_graphql::{EmptySubscription, Schema};

pub use context::{ContextFactory, RequestContext};
pub use error::graphql_error;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{AuthPayloadObject, PostObject, UserObject};

/// Executable schema served at `/graphql`. There are no subscriptions.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema. Request-scoped data is attached per execution, so the
/// schema itself carries none and can be shared across workers.
pub fn build_schema() -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

#[cfg(test)]
mod tests;
