use std::env;

use auth::PasswordError;
use auth::PasswordHasher;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Storage settings. Without a URL the service keeps its data in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Optional Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PasswordConfig {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

impl PasswordConfig {
    /// Build the process-wide password hasher.
    ///
    /// Library defaults are used unless all three parameters are set.
    pub fn build_hasher(&self) -> Result<PasswordHasher, PasswordError> {
        match (self.memory_kib, self.iterations, self.parallelism) {
            (Some(memory_kib), Some(iterations), Some(parallelism)) => {
                PasswordHasher::with_params(memory_kib, iterations, parallelism)
            }
            (None, None, None) => Ok(PasswordHasher::new()),
            _ => Err(PasswordError::InvalidParameters(
                "memory_kib, iterations and parallelism must be set together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_weather_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    48
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_weather_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
