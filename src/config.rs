//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// MongoDB server
    Mongo,
    /// In-process collection, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the server binds to
    pub bind_host: IpAddr,
    /// First port tried when looking for a free one
    pub start_port: u16,
    /// Upper bound on ports probed before giving up
    pub max_port_attempts: u32,
    /// Which store holds the records
    pub storage: StorageBackend,
    /// MongoDB connection string
    pub mongodb_uri: String,
    /// MongoDB database name
    pub mongodb_database: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BIND_HOST` - Interface to bind (default: 127.0.0.1)
    /// - `START_PORT` - First port to try (default: 4000)
    /// - `MAX_PORT_ATTEMPTS` - Ports probed before giving up (default: 100)
    /// - `STORAGE_BACKEND` - `mongo` or `memory` (default: mongo)
    /// - `MONGODB_URI` - Connection string (default: mongodb://localhost:27017)
    /// - `MONGODB_DATABASE` - Database name (default: studentsdb)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_host: lookup("BIND_HOST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bind_host),
            start_port: lookup("START_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.start_port),
            max_port_attempts: lookup("MAX_PORT_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_port_attempts),
            storage: lookup("STORAGE_BACKEND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.storage),
            mongodb_uri: lookup("MONGODB_URI")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.mongodb_uri),
            mongodb_database: lookup("MONGODB_DATABASE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.mongodb_database),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            start_port: 4000,
            max_port_attempts: 100,
            storage: StorageBackend::Mongo,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "studentsdb".to_string(),
        }
    }
}
