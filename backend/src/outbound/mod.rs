//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **memory**: process-local repositories for development and tests
//! - **security**: bcrypt password hashing and JWT bearer tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
