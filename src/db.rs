//! MySQL pool construction.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::DatabaseConfig;

/// Builds the shared connection pool from configuration.
///
/// The pool connects lazily: apart from URL parsing this never touches the
/// network, and the first acquired connection surfaces any connectivity
/// problem. That keeps startup independent of database availability and lets
/// router tests run without a live server.
pub fn connect(config: &DatabaseConfig) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy(&config.url)
        .context("Failed to parse database URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_lazy_does_not_touch_network() {
        let config = DatabaseConfig {
            url: String::from("mysql://nobody@db.invalid:3306/keebdex"),
            max_connections: 2,
            acquire_timeout_secs: 1,
        };
        // Host does not resolve, but lazy connection still succeeds.
        assert!(connect(&config).is_ok());
    }

    #[test]
    fn test_connect_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: String::from("not a url"),
            max_connections: 2,
            acquire_timeout_secs: 1,
        };
        assert!(connect(&config).is_err());
    }
}
