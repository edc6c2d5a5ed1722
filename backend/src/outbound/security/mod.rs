//! Credential adapters: bcrypt password hashing and JWT bearer tokens.

mod bcrypt_hasher;
mod jwt_token_issuer;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt_token_issuer::{JwtSecret, JwtTokenIssuer};
