use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::Cli;
use todo_config as vars;
use todo_storage::DatabaseConfig;

pub use todo_storage::db::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid database connection count: {0}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: IpAddr,
    pub cors_origin: String,
    pub database_path: Option<PathBuf>,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var(vars::PORT).unwrap_or_else(|_| DEFAULT_PORT.to_string());

        let port = port_str.trim().parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host = match env::var(vars::HOST) {
            Ok(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(value))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let cors_origin =
            env::var(vars::CORS_ORIGIN).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let database_path = env::var(vars::DATABASE_PATH)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let db_max_connections = match env::var(vars::DB_MAX_CONNECTIONS) {
            Ok(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(value)),
            },
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            port,
            host,
            cors_origin,
            database_path,
            db_max_connections,
        })
    }

    /// Apply command-line flags on top of the environment
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(port) = cli.port.filter(|p| *p != 0) {
            self.port = port;
        }
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(database) = &cli.database {
            self.database_path = Some(database.clone());
        }
        if let Some(origin) = &cli.cors_origin {
            self.cors_origin = origin.clone();
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.database_path.clone(),
            max_connections: self.db_max_connections,
        }
    }
}
