use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::{RestAccess, Role};

const DEV_SESSION_SECRET: &str = "dev-only-session-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET must be set in {0:?} mode")]
    MissingSessionSecret(Environment),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub session_secret: String,
    pub session_cookie: String,
    pub session_expiry_hours: u64,
    pub rest_access: RestAccess,
    pub password_hash: PasswordHashConfig,
    pub users: Vec<UserAccount>,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Account known to the in-memory credential store. The password is
/// plaintext here and hashed once when the store is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
            Environment::Test => Self::test(),
        }
        .with_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = parse_override("PORT", &v)?;
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_override("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_override("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        // Security overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_COOKIE") {
            self.security.session_cookie = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = parse_override("SESSION_EXPIRY_HOURS", &v)?;
        }
        if let Ok(v) = env::var("REST_ACCESS") {
            self.security.rest_access = parse_override("REST_ACCESS", &v)?;
        }

        // Bootstrap overrides
        if let Ok(v) = env::var("SEED_ON_STARTUP") {
            self.bootstrap.seed_on_startup = parse_override("SEED_ON_STARTUP", &v)?;
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production
            && (self.security.session_secret.is_empty()
                || self.security.session_secret == DEV_SESSION_SECRET)
        {
            return Err(ConfigError::MissingSessionSecret(self.environment));
        }
        if self.security.session_cookie.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_COOKIE",
                reason: "cookie name cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                static_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                session_secret: DEV_SESSION_SECRET.to_string(),
                session_cookie: "INVENTORY_SESSION".to_string(),
                session_expiry_hours: 8,
                rest_access: RestAccess::RoleBased,
                password_hash: PasswordHashConfig {
                    memory_kib: 19 * 1024,
                    iterations: 2,
                    parallelism: 1,
                },
                users: default_accounts(),
            },
            bootstrap: BootstrapConfig { seed_on_startup: true },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                static_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://inventory.db".to_string(),
                max_connections: 10,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_cookie: "INVENTORY_SESSION".to_string(),
                session_expiry_hours: 2,
                rest_access: RestAccess::RoleBased,
                password_hash: PasswordHashConfig {
                    memory_kib: 19 * 1024,
                    iterations: 2,
                    parallelism: 1,
                },
                users: default_accounts(),
            },
            bootstrap: BootstrapConfig { seed_on_startup: true },
        }
    }

    /// In-memory store, fixed secret and a cheap hash cost for test suites
    pub fn test() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Test;
        config.server.port = 0;
        config.database.max_connections = 1;
        config.security.session_secret = "test-session-secret".to_string();
        config.security.password_hash = PasswordHashConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        };
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse an env override, rejecting values that do not fit the field
fn parse_override<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        reason: format!("'{}': {}", value, e),
    })
}

fn default_accounts() -> Vec<UserAccount> {
    vec![
        UserAccount {
            username: "admin".to_string(),
            password: "123".to_string(),
            roles: vec![Role::Admin, Role::User],
        },
        UserAccount {
            username: "user1".to_string(),
            password: "123".to_string(),
            roles: vec![Role::User],
        },
        UserAccount {
            username: "user2".to_string(),
            password: "123".to_string(),
            roles: vec![Role::User],
        },
    ]
}
