//! Domain primitives, use-cases, and ports.
//!
//! Purpose: Define strongly typed values shared by the GraphQL adapter and the
//! persistence layer, and the account service that coordinates them. Nothing
//! in this module knows about HTTP, GraphQL, or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable code.
//! - User, UserId, UserName, EmailAddress: user values.
//! - SignupRequest, LoginCredentials, PasswordHash, AuthPayload: auth flows.
//! - AccountService: signup, login, and bearer token resolution.
//! - TraceId: request correlation identifier.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts::{AccountService, INVALID_PASSWORD, NO_SUCH_USER};
pub use self::auth::{AuthPayload, LoginCredentials, PasswordHash, SignupRequest};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, User, UserId, UserName, UserRecord, UserValidationError,
};
