//! Admin accounts and login session
//!
//! Local credential store for the dashboard login. Passwords are stored as
//! argon2 PHC strings in the `admins` collection; the logged-in user is a
//! single persisted session marker. Unknown usernames and wrong passwords
//! are indistinguishable to the caller.

use crate::storage::{ADMINS, StorageError};
use crate::store::{DataStore, StoreError, StoreResult};
use shared::models::{AdminAccount, Session};
use shared::util::now_millis;

const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password using argon2
fn hash_password(password: &str) -> StoreResult<String> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored argon2 hash
fn verify_password(hash_pass: &str, password: &str) -> StoreResult<bool> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash_pass)
        .map_err(|e| StoreError::Internal(format!("Stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

impl DataStore {
    /// All admin accounts
    pub fn admins(&self) -> StoreResult<Vec<AdminAccount>> {
        self.load(ADMINS)
    }

    /// Create an admin account
    ///
    /// The username is trimmed and must be unique; the password must be at
    /// least 6 characters.
    pub fn register_admin(&self, username: &str, password: &str) -> StoreResult<AdminAccount> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::Validation("username is required".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(StoreError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut admins = self.admins()?;
        if admins.iter().any(|a| a.username == username) {
            return Err(StoreError::Duplicate(format!(
                "Username {username} already taken"
            )));
        }

        let account = AdminAccount {
            username: username.to_string(),
            hash_pass: hash_password(password)?,
            created_at: now_millis(),
        };
        admins.push(account.clone());
        self.save(ADMINS, &admins)?;

        tracing::info!(username = %account.username, "Admin account created");
        Ok(account)
    }

    /// Verify credentials and persist the session marker
    ///
    /// Returns `Ok(None)` for an unknown username or a wrong password.
    pub fn login(&self, username: &str, password: &str) -> StoreResult<Option<Session>> {
        let admins = self.admins()?;
        let Some(account) = admins.iter().find(|a| a.username == username.trim()) else {
            return Ok(None);
        };

        if !verify_password(&account.hash_pass, password)? {
            tracing::warn!(username = %account.username, "Failed login attempt");
            return Ok(None);
        }

        let session = Session {
            username: account.username.clone(),
            login_time: now_millis(),
        };
        let bytes = serde_json::to_vec(&session).map_err(StorageError::from)?;
        self.storage().write_session(&bytes)?;

        tracing::info!(username = %session.username, "User logged in");
        Ok(Some(session))
    }

    /// The persisted session marker, if a user is logged in
    pub fn current_user(&self) -> StoreResult<Option<Session>> {
        let Some(bytes) = self.storage().read_session()? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(error = %err, "Unparseable session payload, treating as logged out");
                Ok(None)
            }
        }
    }

    /// Clear the session marker
    pub fn logout(&self) -> StoreResult<()> {
        self.storage().clear_session()?;
        tracing::info!("User logged out");
        Ok(())
    }
}
