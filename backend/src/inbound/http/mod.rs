//! HTTP inbound adapter: the `/graphql` endpoint and health probes.

pub mod graphql;
pub mod health;
pub mod state;

pub use graphql::graphql_resource;
pub use health::HealthState;
pub use state::HttpState;
