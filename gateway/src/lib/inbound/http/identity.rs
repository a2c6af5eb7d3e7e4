use auth::Authenticator;
use auth::IdentityClaim;
use axum::http::header;
use axum::http::HeaderMap;

/// Required scheme prefix of the `Authorization` header (case-sensitive).
pub const BEARER_PREFIX: &str = "Bearer ";

/// Token carried in an `Authorization: Bearer <token>` header.
///
/// Any other scheme, a non-UTF-8 value or an empty token gives `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;

    (!token.is_empty()).then_some(token)
}

/// Verified identity of the caller, or `None` when not authenticated.
///
/// Being unauthenticated is a normal outcome here, never an error. Token
/// validity is decided entirely by the authenticator.
pub fn extract_identity(headers: &HeaderMap, authenticator: &Authenticator) -> Option<IdentityClaim> {
    let token = bearer_token(headers)?;
    authenticator.validate_token(token)
}
