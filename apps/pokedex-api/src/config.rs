use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Page size used by listings when the request does not set a limit
    pub default_limit: i64,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let default_limit: i64 = env_or_default("DEFAULT_LIMIT", "6")
            .parse()
            .map_err(|e| eyre::eyre!("Invalid DEFAULT_LIMIT: {}", e))?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            default_limit,
        })
    }
}
