use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use std::collections::HashMap;

use crate::config::{PasswordHashConfig, UserAccount};
use crate::types::Role;

use super::AuthError;

/// Stored account: username, Argon2id PHC string, roles
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

/// Fixed set of accounts, hashed once at startup and read-only afterwards
pub struct CredentialStore {
    hasher: Argon2<'static>,
    accounts: HashMap<String, Credential>,
}

impl CredentialStore {
    pub fn from_accounts(
        accounts: &[UserAccount],
        cost: &PasswordHashConfig,
    ) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut store = Self {
            hasher,
            accounts: HashMap::with_capacity(accounts.len()),
        };
        for account in accounts {
            let password_hash = store.hash_password(&account.password)?;
            store.accounts.insert(
                account.username.clone(),
                Credential {
                    username: account.username.clone(),
                    password_hash,
                    roles: account.roles.clone(),
                },
            );
        }
        Ok(store)
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// Check a username/password pair, returning the stored credential on success
    pub fn verify(&self, username: &str, password: &str) -> Result<&Credential, AuthError> {
        let credential = self
            .accounts
            .get(username)
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&credential.password_hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        self.hasher
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(credential)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
