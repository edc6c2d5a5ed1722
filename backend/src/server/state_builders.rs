//! Builders wiring port implementations into the HTTP state.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::UserRepository;
use crate::inbound::http::HttpState;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenIssuer};

use super::ServerSettings;

/// Failures preparing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Choose the user repository: PostgreSQL when a URL is configured (after
/// applying migrations), otherwise the in-memory store.
pub async fn build_user_repository(
    database_url: Option<&str>,
) -> Result<Arc<dyn UserRepository>, StartupError> {
    match database_url {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(PoolConfig::new(url)).await?;
            info!("using PostgreSQL user store");
            Ok(Arc::new(DieselUserRepository::new(pool)))
        }
        None => {
            info!("using in-memory user store");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}

/// Build the HTTP state from validated settings.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState, StartupError> {
    let users = build_user_repository(settings.database_url.as_deref()).await?;
    Ok(HttpState::from_ports(
        users,
        Arc::new(BcryptPasswordHasher::new()),
        Arc::new(JwtTokenIssuer::new(&settings.secret)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, NewUser, PasswordHash, UserName};

    #[tokio::test]
    async fn no_database_url_selects_memory_store() {
        let repo = build_user_repository(None).await.expect("memory store");
        let created = repo
            .create(&NewUser {
                name: UserName::new("A"),
                email: EmailAddress::new("a@b.com"),
                password_hash: PasswordHash::new("$2b$10$hash"),
            })
            .await
            .expect("create");
        let found = repo.find_by_id(created.id()).await.expect("lookup");
        assert_eq!(found, Some(created));
    }
}
