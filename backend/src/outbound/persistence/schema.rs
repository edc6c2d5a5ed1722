//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// bcrypt hash; never returned through the API.
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts. Not linked to users.
    posts (id) {
        id -> Uuid,
        title -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, posts);
