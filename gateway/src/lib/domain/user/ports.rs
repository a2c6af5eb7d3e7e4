use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue its first token pair.
    ///
    /// # Errors
    /// * `RoleNotAllowed` - Command asks for a privileged role
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Credential` - Hashing or token issuance failed
    async fn register(&self, command: RegisterUserCommand)
        -> Result<AuthenticatedSession, UserError>;

    /// Check credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Credential` - Stored hash unreadable or token issuance failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, UserError>;

    /// Exchange a refresh token for a new pair.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token invalid, expired, or not a refresh token
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Store a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
