//! Credential hashing.
//!
//! Passwords are stored as self-describing Argon2id PHC strings, so a stored
//! hash carries its own salt and work factor.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
