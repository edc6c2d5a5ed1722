//! GraphQL output types wrapping domain values.

use async_graphql::{ID, Object, Result, SimpleObject};

use crate::domain::{AuthPayload, Error, User};

use super::graphql_error;

/// `type User { id: ID! name: String! email: String! posts: [Post!]! }`
#[derive(Debug, Clone)]
pub struct UserObject(User);

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self(user)
    }
}

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID(self.0.id().to_string())
    }

    async fn name(&self) -> &str {
        self.0.name().as_ref()
    }

    async fn email(&self) -> &str {
        self.0.email().as_ref()
    }

    /// Posts have no author link in storage, so this cannot be answered.
    async fn posts(&self) -> Result<Vec<PostObject>> {
        Err(graphql_error(Error::not_implemented(
            "User.posts is not implemented",
        )))
    }
}

/// `type Post { id: ID! title: String! content: String! }`
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Post")]
pub struct PostObject {
    /// Post identifier.
    pub id: ID,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
}

/// `type AuthPayload { token: String user: User }`
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthPayload")]
pub struct AuthPayloadObject {
    /// Signed bearer token.
    pub token: Option<String>,
    /// Account the token belongs to.
    pub user: Option<UserObject>,
}

impl From<AuthPayload> for AuthPayloadObject {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: Some(payload.token),
            user: Some(payload.user.into()),
        }
    }
}
