//! Inbound adapters translating external requests into domain calls.
//!
//! The GraphQL schema and resolvers live under [`graphql`]; the actix-web
//! endpoints that host them live under [`http`].

pub mod graphql;
pub mod http;
