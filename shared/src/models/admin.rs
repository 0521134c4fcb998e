//! Admin Account Model

use serde::{Deserialize, Serialize};

/// Local admin account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub username: String,
    /// argon2 PHC hash string
    pub hash_pass: String,
    /// Unix millis
    pub created_at: i64,
}

/// Logged-in session marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    /// Unix millis
    pub login_time: i64,
}
