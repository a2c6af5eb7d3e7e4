use std::env;

use auth::Authenticator;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured.
///
/// Publicly known and therefore worthless as a secret. Accepted only outside
/// production, and always announced with a warning at startup.
pub const INSECURE_DEVELOPMENT_SECRET: &str = "insecure-development-secret-do-not-use-in-production";

/// Run mode in which the development secret is refused.
pub const PRODUCTION_RUN_MODE: &str = "production";

/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_TTL_HOURS: i64 = 365 * 24;

/// Longest accepted refresh token lifetime.
pub const MAX_REFRESH_TTL_DAYS: i64 = 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_run_mode")]
    pub run_mode: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: Option<PasswordConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_access_ttl_hours")]
    pub access_ttl_hours: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,
}

/// Argon2 work factor.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Where the token signing secret came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningSecret {
    Configured(String),
    InsecureFallback,
}

impl SigningSecret {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SigningSecret::Configured(secret) => secret.as_bytes(),
            SigningSecret::InsecureFallback => INSECURE_DEVELOPMENT_SECRET.as_bytes(),
        }
    }

    pub fn is_insecure(&self) -> bool {
        matches!(self, SigningSecret::InsecureFallback)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("No JWT signing secret configured (set JWT__SECRET); the development fallback is not allowed in run mode '{0}'")]
    MissingSigningSecret(String),

    #[error("Invalid password work factor: {0}")]
    InvalidWorkFactor(#[from] PasswordError),

    #[error("Invalid token lifetime: jwt.{field} = {value}, expected 1..={max}")]
    InvalidTokenLifetime {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

fn default_run_mode() -> String {
    "development".to_string()
}

fn default_access_ttl_hours() -> i64 {
    auth::token::DEFAULT_ACCESS_TTL_DAYS * 24
}

fn default_refresh_ttl_days() -> i64 {
    auth::token::DEFAULT_REFRESH_TTL_DAYS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 3000 }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            access_ttl_hours: default_access_ttl_hours(),
            refresh_ttl_days: default_refresh_ttl_days(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigurationError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| default_run_mode());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .set_override("run_mode", run_mode)?
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn is_production(&self) -> bool {
        self.run_mode == PRODUCTION_RUN_MODE
    }

    /// Resolve the token signing secret.
    ///
    /// An absent or empty secret resolves to the development fallback, except
    /// in production where it is an error.
    ///
    /// # Errors
    /// * `MissingSigningSecret` - No secret configured in production
    pub fn signing_secret(&self) -> Result<SigningSecret, ConfigurationError> {
        match self.jwt.secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(SigningSecret::Configured(secret.to_string())),
            _ if self.is_production() => Err(ConfigurationError::MissingSigningSecret(
                self.run_mode.clone(),
            )),
            _ => Ok(SigningSecret::InsecureFallback),
        }
    }

    /// Access and refresh token lifetimes.
    ///
    /// # Errors
    /// * `InvalidTokenLifetime` - A lifetime is not positive or exceeds its bound
    pub fn token_lifetimes(&self) -> Result<(Duration, Duration), ConfigurationError> {
        let access_hours = bounded_lifetime(
            "access_ttl_hours",
            self.jwt.access_ttl_hours,
            MAX_ACCESS_TTL_HOURS,
        )?;
        let refresh_days = bounded_lifetime(
            "refresh_ttl_days",
            self.jwt.refresh_ttl_days,
            MAX_REFRESH_TTL_DAYS,
        )?;

        Ok((Duration::hours(access_hours), Duration::days(refresh_days)))
    }

    /// Build the process-wide authenticator from this configuration.
    ///
    /// # Errors
    /// * `MissingSigningSecret` - No secret configured in production
    /// * `InvalidWorkFactor` - Password work factor rejected by Argon2
    /// * `InvalidTokenLifetime` - Token lifetime out of range
    pub fn authenticator(&self) -> Result<Authenticator, ConfigurationError> {
        let secret = self.signing_secret()?;
        let (access_ttl, refresh_ttl) = self.token_lifetimes()?;
        if secret.is_insecure() {
            tracing::warn!(
                run_mode = %self.run_mode,
                "!!! No JWT signing secret configured: using the INSECURE built-in development secret. \
                 Anyone can forge tokens for this instance. Set JWT__SECRET before exposing it !!!"
            );
        }

        let password_hasher = match &self.password {
            Some(work) => PasswordHasher::with_params(work.memory_kib, work.iterations, work.parallelism)?,
            None => PasswordHasher::new(),
        };

        let token_codec = TokenCodec::new(secret.as_bytes())
            .with_access_ttl(access_ttl)
            .with_refresh_ttl(refresh_ttl);

        Ok(Authenticator::from_parts(password_hasher, token_codec))
    }
}

fn bounded_lifetime(field: &'static str, value: i64, max: i64) -> Result<i64, ConfigurationError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidTokenLifetime { field, value, max })
    }
}
