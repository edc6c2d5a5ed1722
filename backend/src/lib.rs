//! feedql: a small GraphQL API with signup, login, and bearer-token sessions.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: values, errors, the account service, and port traits
//! - [`inbound`]: GraphQL schema and the actix-web endpoint hosting it
//! - [`outbound`]: Diesel, in-memory, bcrypt, and JWT adapters
//! - [`server`]: configuration and application assembly

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::TraceId;
pub use middleware::Trace;
