//! [`UserRepository`] backed by a process-local map.
//!
//! Data lives only as long as the process. Email uniqueness is enforced the
//! same way the database enforces it: exact, case-sensitive match.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserRecord};

#[derive(Debug, Default)]
struct Store {
    by_id: HashMap<UserId, UserRecord>,
    by_email: HashMap<EmailAddress, UserId>,
}

/// Thread-safe in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("in-memory user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.store.write().map_err(poisoned)?;
        if store.by_email.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let created = User::new(UserId::random(), user.name.clone(), user.email.clone());
        store.by_email.insert(user.email.clone(), *created.id());
        store.by_id.insert(
            *created.id(),
            UserRecord {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.by_id.get(id).map(|record| record.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PasswordHash, UserName};
    use rstest::{fixture, rstest};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new("A"),
            email: EmailAddress::new(email),
            password_hash: PasswordHash::new("$2b$10$hash"),
        }
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn created_user_is_found_by_id_and_email(repo: InMemoryUserRepository) {
        let user = repo.create(&new_user("a@b.com")).await.expect("create");

        let by_id = repo.find_by_id(user.id()).await.expect("lookup");
        assert_eq!(by_id, Some(user.clone()));

        let record = repo
            .find_by_email(user.email())
            .await
            .expect("lookup")
            .expect("record present");
        assert_eq!(record.user, user);
        assert_eq!(record.password_hash.as_str(), "$2b$10$hash");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(repo: InMemoryUserRepository) {
        repo.create(&new_user("a@b.com")).await.expect("first create");
        let err = repo
            .create(&new_user("a@b.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::duplicate_email("a@b.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn email_match_is_case_sensitive(repo: InMemoryUserRepository) {
        repo.create(&new_user("a@b.com")).await.expect("create");
        repo.create(&new_user("A@b.com"))
            .await
            .expect("differently cased email is a new account");
        let missing = EmailAddress::new("a@B.com");
        assert!(repo.find_by_email(&missing).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn padded_email_does_not_match(repo: InMemoryUserRepository) {
        repo.create(&new_user("a@b.com")).await.expect("create");
        let padded = EmailAddress::new(" a@b.com");
        assert!(repo.find_by_email(&padded).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_id_is_none(repo: InMemoryUserRepository) {
        assert!(repo.find_by_id(&UserId::random()).await.expect("lookup").is_none());
    }
}
