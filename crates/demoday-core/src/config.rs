// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration loading from environment variables.

use std::net::SocketAddr;

/// Demoday server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL or SQLite connection URL
    pub database_url: String,
    /// HTTP server address
    pub http_addr: SocketAddr,
    /// Maximum page size for list endpoints
    pub max_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DEMODAY_DATABASE_URL`: PostgreSQL or SQLite connection string
    ///
    /// Optional (with defaults):
    /// - `DEMODAY_HTTP_PORT`: HTTP server port (default: 8080)
    /// - `DEMODAY_MAX_PAGE_SIZE`: Maximum list page size (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DEMODAY_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("DEMODAY_DATABASE_URL"))?;

        let http_port: u16 = std::env::var("DEMODAY_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("DEMODAY_HTTP_PORT", "must be a valid port number")
            })?;

        let max_page_size: i64 = std::env::var("DEMODAY_MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("DEMODAY_MAX_PAGE_SIZE", "must be a positive integer")
            })?;
        if max_page_size < 1 {
            return Err(ConfigError::Invalid(
                "DEMODAY_MAX_PAGE_SIZE",
                "must be a positive integer",
            ));
        }

        Ok(Self {
            database_url,
            http_addr: SocketAddr::from(([0, 0, 0, 0], http_port)),
            max_page_size,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
