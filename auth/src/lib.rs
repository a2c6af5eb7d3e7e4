//! Stateless authentication primitives
//!
//! - Password hashing (Argon2id)
//! - Signed identity tokens (JWT) with embedded expiry
//! - An `Authenticator` facade for registration, login and refresh flows
//!
//! No token or session is ever stored: a token is valid when its signature
//! matches under the signing key and its expiry has not passed.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{IdentityClaim, Role, TokenCodec, TokenKind};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claim = IdentityClaim::new("user123", "alice@example.com", Role::Customer);
//!
//! let token = codec.issue_access_token(&claim).unwrap();
//! assert_eq!(codec.verify(&token), Some(claim.clone()));
//!
//! let refresh = codec.issue_refresh_token(&claim).unwrap();
//! assert_eq!(codec.verify(&refresh).unwrap().kind(), TokenKind::Refresh);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, IdentityClaim, Role};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let claim = IdentityClaim::new("user123", "alice@example.com", Role::Customer);
//! let tokens = auth.authenticate("password123", &hash, &claim).unwrap();
//!
//! // Every later request: validate token
//! let identity = auth.validate_token(&tokens.access_token).unwrap();
//! assert_eq!(identity.user_id, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::IdentityClaim;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Role;
pub use jwt::TokenClaims;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenCodec;
