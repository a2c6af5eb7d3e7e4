use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::IdentityClaim;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenKind;

/// Default lifetime of an access token, in days.
pub const DEFAULT_ACCESS_TTL_DAYS: i64 = 7;

/// Default lifetime of a refresh token, in days.
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 30;

/// Issues and verifies self-contained identity tokens.
///
/// Validity is decided by signature and embedded expiry alone. Nothing about an
/// issued token is recorded server side.
pub struct TokenCodec {
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret` and the default lifetimes.
    pub fn new(secret: &[u8]) -> Self {
        Self::from_handler(JwtHandler::new(secret))
    }

    pub fn from_handler(jwt_handler: JwtHandler) -> Self {
        Self {
            jwt_handler,
            access_ttl: Duration::days(DEFAULT_ACCESS_TTL_DAYS),
            refresh_ttl: Duration::days(DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    /// Override the access token lifetime used by [`issue_access_token`](Self::issue_access_token).
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Override the refresh token lifetime.
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Issue an access token with the configured access lifetime.
    ///
    /// The claim is signed as given, including its kind (or lack of one).
    pub fn issue_access_token(&self, claim: &IdentityClaim) -> Result<String, JwtError> {
        self.issue_access_token_with_ttl(claim, self.access_ttl)
    }

    pub fn issue_access_token_with_ttl(
        &self,
        claim: &IdentityClaim,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(claim, Utc::now(), ttl)
    }

    /// Issue a refresh token.
    ///
    /// The kind is always `refresh`, whatever the input claim carries.
    pub fn issue_refresh_token(&self, claim: &IdentityClaim) -> Result<String, JwtError> {
        let claim = claim.clone().with_kind(TokenKind::Refresh);
        self.issue_at(&claim, Utc::now(), self.refresh_ttl)
    }

    /// Sign `claim` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        claim: &IdentityClaim,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = TokenClaims::new(claim, issued_at, ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token against the current wall clock.
    ///
    /// Every failure cause collapses to `None`; the cause is only logged.
    pub fn verify(&self, token: &str) -> Option<IdentityClaim> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<IdentityClaim> {
        match self.decode_at(token, now) {
            Ok(claims) => Some(claims.into_identity()),
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                None
            }
        }
    }

    /// Decode a token, reporting why it was rejected.
    ///
    /// # Errors
    /// * `Malformed` - Structure or payload shape is wrong
    /// * `InvalidSignature` - Signature does not match under the signing key
    /// * `TokenExpired` - `now` is past the embedded expiry
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let claims: TokenClaims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::jwt::Role;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn claim() -> IdentityClaim {
        IdentityClaim::new("user-42", "bob@example.com", Role::Admin)
    }

    #[test]
    fn test_access_token_round_trip() {
        let codec = TokenCodec::new(SECRET);

        let token = codec.issue_access_token(&claim()).expect("Failed to issue token");
        assert_eq!(codec.verify(&token), Some(claim()));

        let typed = claim().with_kind(TokenKind::Access);
        let token = codec.issue_access_token(&typed).expect("Failed to issue token");
        assert_eq!(codec.verify(&token), Some(typed));
    }

    #[test]
    fn test_access_token_default_lifetime() {
        let codec = TokenCodec::new(SECRET);
        let now = Utc::now();

        let token = codec
            .issue_at(&claim(), now, codec.access_ttl())
            .expect("Failed to issue token");
        let claims = codec.decode_at(&token, now).expect("Failed to decode token");

        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_token_forces_kind() {
        let codec = TokenCodec::new(SECRET);
        let now = Utc::now();

        for input in [
            claim(),
            claim().with_kind(TokenKind::Access),
            claim().with_kind(TokenKind::Refresh),
        ] {
            let token = codec.issue_refresh_token(&input).expect("Failed to issue token");
            let claims = codec.decode_at(&token, now).expect("Failed to decode token");

            assert_eq!(claims.kind, Some(TokenKind::Refresh));
            assert!(claims.exp - claims.iat >= 30 * 24 * 60 * 60 - 1);
            assert!(claims.exp - claims.iat <= 30 * 24 * 60 * 60);
        }
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let codec = TokenCodec::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(2);

        let token = codec
            .issue_at(&claim(), issued_at, Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(codec.verify(&token), None);
        assert_eq!(
            codec.decode_at(&token, Utc::now()).unwrap_err(),
            JwtError::TokenExpired
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = TokenCodec::new(SECRET);
        let issued_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let ttl = Duration::minutes(10);

        let token = codec.issue_at(&claim(), issued_at, ttl).expect("Failed to issue token");

        assert!(codec.verify_at(&token, issued_at).is_some());
        assert!(codec
            .verify_at(&token, issued_at + ttl - Duration::milliseconds(1))
            .is_some());
        assert!(codec.verify_at(&token, issued_at + ttl).is_none());
        assert!(codec
            .verify_at(&token, issued_at + ttl + Duration::seconds(1))
            .is_none());
    }

    #[test]
    fn test_expired_within_the_last_second() {
        let codec = TokenCodec::new(SECRET);
        let issued_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let ttl = Duration::minutes(10);

        let token = codec.issue_at(&claim(), issued_at, ttl).expect("Failed to issue token");

        let now = issued_at + ttl + Duration::milliseconds(900);
        assert_eq!(codec.verify_at(&token, now), None);
        assert_eq!(codec.decode_at(&token, now).unwrap_err(), JwtError::TokenExpired);
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue_access_token(&claim()).expect("Failed to issue token");

        let signature_start = token.rfind('.').unwrap() + 1;
        for index in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(codec.verify(&tampered), None, "byte {} accepted", index);
        }
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue_access_token(&claim()).expect("Failed to issue token");

        let other = TokenCodec::new(b"another_secret_key_at_least_32_bytes");
        let forged = other
            .issue_access_token(&IdentityClaim::new("user-1", "eve@example.com", Role::Admin))
            .expect("Failed to issue token");

        // Payload from the forged token, signature from the genuine one.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(
            codec.decode_at(&spliced, Utc::now()).unwrap_err(),
            JwtError::InvalidSignature
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = TokenCodec::new(SECRET);
        let verifier = TokenCodec::new(b"another_secret_key_at_least_32_bytes");

        let token = issuer.issue_access_token(&claim()).expect("Failed to issue token");
        assert_eq!(verifier.verify(&token), None);
    }

    #[test]
    fn test_garbage_is_invalid() {
        let codec = TokenCodec::new(SECRET);

        assert_eq!(codec.verify(""), None);
        assert_eq!(codec.verify("not-a-token"), None);
        assert_eq!(codec.verify("invalid.token.here"), None);
    }

    #[test]
    fn test_unexpected_payload_shape_is_invalid() {
        #[derive(serde::Serialize)]
        struct Foreign {
            sub: String,
            exp: i64,
        }

        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&Foreign {
                sub: "user-42".to_string(),
                exp: Utc::now().timestamp() + 3600,
            })
            .expect("Failed to encode token");

        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.decode_at(&token, Utc::now()),
            Err(JwtError::Malformed(_))
        ));
    }
}
