use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;
use auth::TokenPair;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Plaintext behind the hash that unknown-email logins are checked against.
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-placeholder-password";

/// Domain service implementation for user operations.
///
/// Password hashing and verification are CPU-bound and run on the blocking
/// pool so they do not stall other requests. A login for an unknown email
/// still verifies against a placeholder hash, so both failures cost the same.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    unknown_user_hash: OnceCell<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            unknown_user_hash: OnceCell::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Credential(e.to_string()))
    }

    /// Spend one password verification on a login that is bound to fail.
    async fn verify_unknown_user(&self, password: String) -> Result<(), UserError> {
        let stored_hash = self
            .unknown_user_hash
            .get_or_try_init(|| self.hash_password(UNKNOWN_USER_PASSWORD.to_string()))
            .await?
            .clone();
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.compare_password(&password, &stored_hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
            .map_err(|e| UserError::Credential(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthenticatedSession, UserError> {
        if command.role == Role::Admin {
            return Err(UserError::RoleNotAllowed(command.role.to_string()));
        }

        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        let user = self.repository.create(user).await?;
        let tokens = self.authenticator.issue_tokens(&user.identity())?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(AuthenticatedSession { user, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                self.verify_unknown_user(command.password).await?;
                return Err(UserError::InvalidCredentials);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let identity = user.identity();
        let password = command.password;

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &identity)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))??;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedSession { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError> {
        Ok(self.authenticator.refresh(refresh_token)?)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}
