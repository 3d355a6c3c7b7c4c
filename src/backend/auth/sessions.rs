/**
 * Session Management and JWT Tokens
 *
 * HS256 tokens signed with the configured secret. The secret and lifetime
 * come from `AppConfig` and travel with the app state as [`JwtConfig`].
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::AppConfig;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Username
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing secret and token lifetime
#[derive(Clone)]
pub struct JwtConfig {
    secret: Arc<str>,
    ttl_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_hours: u64) -> Self {
        Self {
            secret: Arc::from(secret.into()),
            ttl_hours,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_ttl_hours)
    }

    pub fn ttl_hours(&self) -> u64 {
        self.ttl_hours
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `email` - User email
    /// * `username` - Username, copied into the claims
    ///
    /// # Returns
    /// JWT token string
    pub fn create_token(
        &self,
        user_id: uuid::Uuid,
        email: &str,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            username: Some(username.to_string()),
            exp: now + self.ttl_hours * 60 * 60,
            iat: now,
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &key)
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}
