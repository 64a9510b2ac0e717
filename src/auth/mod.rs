pub mod credentials;
pub mod session;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::types::Role;

pub use credentials::{Credential, CredentialStore};
pub use session::SessionStore;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session expired or logged out")]
    SessionClosed,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Session secret is not configured")]
    InvalidSecret,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// Signed contents of the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<Role>,
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Token handed to the client after a successful login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
    pub max_age_secs: i64,
}

/// Form-login authentication: verifies credentials, issues signed session
/// tokens and tracks which sessions are still open.
pub struct Authenticator {
    credentials: CredentialStore,
    sessions: SessionStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
}

impl Authenticator {
    pub fn new(config: &SecurityConfig) -> Result<Self, AuthError> {
        if config.session_secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let credentials = CredentialStore::from_accounts(&config.users, &config.password_hash)?;
        info!("Loaded {} accounts into the credential store", credentials.account_count());

        Ok(Self {
            credentials,
            sessions: SessionStore::new(),
            encoding_key: EncodingKey::from_secret(config.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.session_secret.as_bytes()),
            expiry_hours: config.session_expiry_hours,
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let credential = match self.credentials.verify(username, password) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed login for '{}'", username);
                return Err(e);
            }
        };

        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiry_hours as i64);
        let sid = self.sessions.open(&credential.username, expires_at).await;

        let claims = Claims {
            sub: credential.username.clone(),
            roles: credential.roles.clone(),
            sid,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = match encode(&Header::default(), &claims, &self.encoding_key) {
            Ok(t) => t,
            Err(e) => {
                self.sessions.close(&sid).await;
                return Err(AuthError::TokenGeneration(e.to_string()));
            }
        };

        info!("User '{}' logged in", claims.sub);
        Ok(IssuedSession {
            token,
            claims,
            max_age_secs: (expires_at - now).num_seconds(),
        })
    }

    /// Validate a token and make sure its session has not been closed
    pub async fn resolve(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token)?;
        if !self.sessions.is_live(&claims.sid, &claims.sub).await {
            debug!("Rejected token for closed session {}", claims.sid);
            return Err(AuthError::SessionClosed);
        }
        Ok(claims)
    }

    /// Sessions opened by login that are neither closed nor expired
    pub async fn active_sessions(&self) -> usize {
        self.sessions.active_count().await
    }

    /// Close the session behind `token`. Unknown or malformed tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if let Ok(claims) = self.decode(token) {
            if self.sessions.close(&claims.sid).await {
                info!("User '{}' logged out", claims.sub);
            }
        }
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}
