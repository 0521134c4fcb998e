//! AgroVet Store Engine
//!
//! Embeddable data layer for a small agricultural-supply retailer:
//! inventory, customers, sales, derived reports, plain-text report export,
//! and a local admin login. Everything is synchronous and in-process; state
//! lives in a single embedded key-value database file.
//!
//! # Module structure
//!
//! ```text
//! agrovet-store/src/
//! ├── config.rs    # Environment configuration
//! ├── logger.rs    # tracing setup
//! ├── storage.rs   # redb-backed collection persistence
//! ├── store/       # DataStore: CRUD, sale recording, seeding
//! ├── money.rs     # Decimal arithmetic over f64 amounts
//! ├── reports.rs   # Derived aggregates
//! ├── export.rs    # Plain-text report rendering
//! ├── auth.rs      # Admin accounts and session
//! └── seed.rs      # Demonstration data
//! ```

pub mod auth;
pub mod config;
pub mod export;
pub mod logger;
pub mod money;
pub mod reports;
pub mod seed;
pub mod storage;
pub mod store;

// Re-export public types
pub use config::Config;
pub use logger::{init_logger, init_logger_with_file};
pub use storage::{Storage, StorageError, StorageResult};
pub use store::{DataStore, StoreError, StoreResult};
