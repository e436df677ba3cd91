use std::net::{AddrParseError, IpAddr, SocketAddr};

use clap::Parser;

/// Connection strings starting with this prefix select the in-memory store.
pub const MEMORY_URL_PREFIX: &str = "memory://";

/// Server configuration, read from command-line flags or environment variables.
///
/// | Flag              | Env Var            | Default                                 |
/// |-------------------|--------------------|-----------------------------------------|
/// | `--database-url`  | `MONGODB_URI`      | `mongodb://localhost:27017/characters`  |
/// | `--database-name` | `MONGODB_DATABASE` | `characters`                            |
/// | `--host`          | `HOST`             | `0.0.0.0`                               |
/// | `--port`          | `PORT`             | `3000`                                  |
/// | `--unique-names`  | `UNIQUE_NAMES`     | `false`                                 |
#[derive(Debug, Clone, Parser)]
#[command(name = "chardex", version, about = "REST service for character documents")]
pub struct ServerConfig {
    /// Document store connection string. `memory://` keeps everything in process.
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017/characters")]
    pub database_url: String,
    /// Database used when the connection string does not name one.
    #[arg(long, env = "MONGODB_DATABASE", default_value = "characters")]
    pub database_name: String,
    /// Bind address.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Bind port.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
    /// Reject characters whose name already exists, ignoring case.
    #[arg(long, env = "UNIQUE_NAMES")]
    pub unique_names: bool,
}

impl ServerConfig {
    /// Whether the in-memory store was requested instead of MongoDB.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_URL_PREFIX)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        Ok(SocketAddr::new(self.host.parse::<IpAddr>()?, self.port))
    }
}
