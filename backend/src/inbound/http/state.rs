//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they only
//! depend on the schema and the context factory and stay testable without
//! I/O.

use std::sync::Arc;

use crate::domain::AccountService;
use crate::domain::ports::{PasswordHasher, TokenIssuer, UserRepository};
use crate::inbound::graphql::{AppSchema, ContextFactory, build_schema};

/// Dependency bundle for the GraphQL endpoint.
#[derive(Clone)]
pub struct HttpState {
    /// Executable schema.
    pub schema: AppSchema,
    /// Per-request context builder.
    pub contexts: ContextFactory,
}

impl HttpState {
    /// Bundle an existing schema and factory.
    pub fn new(schema: AppSchema, contexts: ContextFactory) -> Self {
        Self { schema, contexts }
    }

    /// Wire the schema and account service over the given ports.
    pub fn from_ports(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let accounts = AccountService::new(users, hasher, tokens);
        Self::new(build_schema(), ContextFactory::new(accounts))
    }
}
