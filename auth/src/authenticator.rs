use serde::Serialize;

use crate::jwt::IdentityClaim;
use crate::jwt::JwtError;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;

/// Authentication coordinator combining password verification and token issuance.
///
/// This is the library surface handed to registration, login and profile
/// handlers. It holds no per-user state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Tokens issued on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default work factor and token lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::from_parts(PasswordHasher::new(), TokenCodec::new(jwt_secret))
    }

    pub fn from_parts(password_hasher: PasswordHasher, token_codec: TokenCodec) -> Self {
        Self {
            password_hasher,
            token_codec,
        }
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn compare_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access and refresh token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claim` - Identity to embed in the tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claim: &IdentityClaim,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.issue_tokens(claim)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used right after registration, when the credentials were just set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_tokens(&self, claim: &IdentityClaim) -> Result<TokenPair, AuthenticationError> {
        let access_claim = IdentityClaim {
            kind: Some(TokenKind::Access),
            ..claim.clone()
        };

        Ok(TokenPair {
            access_token: self.token_codec.issue_access_token(&access_claim)?,
            refresh_token: self.token_codec.issue_refresh_token(claim)?,
        })
    }

    /// Exchange a refresh token for a new token pair carrying the same identity.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is invalid, expired, or not a refresh token
    /// * `JwtError` - Token generation failed
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthenticationError> {
        let claim = self
            .token_codec
            .verify(refresh_token)
            .filter(|claim| claim.kind() == TokenKind::Refresh)
            .ok_or(AuthenticationError::InvalidRefreshToken)?;

        self.issue_tokens(&claim)
    }

    /// Validate a token and return the identity it carries.
    pub fn validate_token(&self, token: &str) -> Option<IdentityClaim> {
        self.token_codec.verify(token)
    }
}
