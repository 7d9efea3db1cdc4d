use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::database::models::User;
use crate::database::UserRepository;

use super::{ServiceError, ServiceResult};

/// Accounts, credentials and role checks.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        Self { repo, tokens, hasher }
    }

    /// Registers `login` with the named role. The role must already exist.
    pub async fn create_user(&self, login: &str, password: &str, role: &str) -> ServiceResult<i64> {
        if login.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation("login and password are required".to_string()));
        }

        let user = User {
            id: 0,
            login: login.to_string(),
            password: self.hasher.hash(password),
        };
        let id = self.repo.create_user(&user, role).await?;
        tracing::info!("Registered user {} ({}) with role '{}'", id, login, role);
        Ok(id)
    }

    /// Checks the credentials and returns a signed token for the user.
    pub async fn generate_token(&self, login: &str, password: &str) -> ServiceResult<String> {
        let hash = self.hasher.hash(password);
        let user = self
            .repo
            .find_by_credentials(login, &hash)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        Ok(self.tokens.issue(user.id)?)
    }

    pub fn parse_token(&self, token: &str) -> ServiceResult<i64> {
        Ok(self.tokens.parse(token)?)
    }

    /// True iff one of the user's roles is "admin". A user without any role
    /// is an error, not a plain `false`.
    pub async fn is_admin(&self, user_id: i64) -> ServiceResult<bool> {
        let roles = self.repo.roles_for_user(user_id).await?;
        if roles.is_empty() {
            return Err(ServiceError::NotFound(format!("roles for user {}", user_id)));
        }
        Ok(roles.iter().any(|r| r.is_admin()))
    }
}
