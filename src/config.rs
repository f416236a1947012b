use std::net::SocketAddr;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};
use toml;

/// Configuration for the Frontdesk application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Host address to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the bind host
    #[serde(default)]
    pub host: Option<String>,
    /// Optional update for the bind port
    #[serde(default)]
    pub port: Option<u16>,
}

/// Command line arguments for the application
#[derive(Parser, Debug)]
#[clap(name = "frontdesk", about = "A REST CRUD API for user accounts")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[clap(long, env = "FRONTDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Host address to bind to
    #[clap(long, env = "FRONTDESK_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[clap(long, env = "FRONTDESK_PORT")]
    pub port: Option<u16>,

    /// Debug mode
    #[clap(long, env = "FRONTDESK_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
        }
    }

    /// Returns the socket address the server should bind to
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address: {}", e))
    }
}

/// Returns the base (default) configuration
pub fn base_config(data_dir: Option<PathBuf>) -> Config {
    let database_url = data_dir.map_or("frontdesk.db".to_string(), |path| {
        path.join("frontdesk.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 3000,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // if the config path is None, return the default config
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host.clone(),
        port: args.port,
    }
}

/// Builds the effective configuration
///
/// Precedence, lowest first: built-in defaults, then the TOML config
/// file, then command line arguments / environment variables.
///
/// ### Arguments
///
/// * `args` - Parsed command line arguments
///
/// ### Returns
///
/// The merged configuration, or an error message if the config file is
/// present but unreadable
pub fn load_config(args: &CliArgs) -> Result<Config, String> {
    let data_dir = ProjectDirs::from("", "", "frontdesk")
        .map(|dirs| dirs.data_dir().to_path_buf());

    let config = base_config(data_dir)
        .apply_update(config_from_file(args.config.clone())?)
        .apply_update(config_from_args(args));

    Ok(config)
}
