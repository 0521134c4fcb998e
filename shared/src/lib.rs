//! Shared types for the AgroVet store engine
//!
//! Entity models, Create/Update payload types, and small utilities used
//! across the workspace.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
