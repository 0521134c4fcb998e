use std::path::{Path, PathBuf};

/// Engine configuration
///
/// # Environment variables
///
/// All configuration items can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | AGROVET_WORK_DIR | ./agrovet-data | Directory holding the store file |
/// | AGROVET_LOG_LEVEL | info | tracing level |
/// | AGROVET_SEED_DEMO | true | Seed demonstration data on first run |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database file and logs
    pub work_dir: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Whether `DataStore::from_config` seeds demonstration data
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("AGROVET_WORK_DIR")
                .unwrap_or_else(|_| "./agrovet-data".into()),
            log_level: std::env::var("AGROVET_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            seed_demo_data: std::env::var("AGROVET_SEED_DEMO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Override the working directory
    ///
    /// Commonly used in tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Path of the store database file
    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("agrovet.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_work_dir() {
        let config = Config::with_work_dir("/tmp/agrovet-test");
        assert_eq!(config.work_dir, "/tmp/agrovet-test");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/agrovet-test/agrovet.redb"));
    }
}
