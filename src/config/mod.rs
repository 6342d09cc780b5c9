//! Process configuration: where the API lives, which key to send and how long a
//! response may take.
//!
//! Values come from an optional configuration file (`application.toml`,
//! `application.json`, ... or whatever `PETSTORE_CONFIG` names) overlaid by
//! `PETSTORE_*` environment variables, with `__` separating key segments
//! (`PETSTORE_BASE__URL` sets `base.url`). Every key falls back to its own default.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use tracing::{debug, warn};


pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
pub const DEFAULT_API_KEY: &str = "special-key";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

pub const CONFIG_FILE_VAR: &str = "PETSTORE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "application";
const ENV_PREFIX: &str = "PETSTORE";
const PROPERTIES_EXTENSION: &str = ".properties";

static INSTANCE: OnceLock<Configuration> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    /// Parsed and stored only. No request is ever retried.
    pub max_retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Configuration {
    /// The shared configuration, loaded on first access and never reloaded.
    pub fn get_instance() -> &'static Configuration {
        INSTANCE.get_or_init(|| Configuration::load(&config_file()))
    }

    /// Loads `file` (extension optional) plus environment overrides. A missing or
    /// unreadable source is logged and replaced by defaults. Java-style
    /// `.properties` files have no reader and are skipped with a warning, so the
    /// environment still applies.
    pub fn load(file: &str) -> Configuration {
        let mut builder = Config::builder();
        if file.ends_with(PROPERTIES_EXTENSION) {
            warn!(file, "Properties files are not supported, ignoring configuration file");
        } else {
            builder = builder.add_source(File::with_name(file).required(false));
        }
        let source = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build();

        match source {
            Ok(source) => {
                let configuration = Configuration::from_source(&source);
                debug!(file, base_url = %configuration.base_url, "Configuration loaded");
                configuration
            }
            Err(err) => {
                warn!(file, error = %err, "Error loading configuration, using default values");
                Configuration::default()
            }
        }
    }

    pub fn from_source(source: &Config) -> Configuration {
        Configuration {
            base_url: string_or(source, "base.url", DEFAULT_BASE_URL),
            api_key: string_or(source, "api.key", DEFAULT_API_KEY),
            timeout_seconds: number_or(source, "test.timeout", DEFAULT_TIMEOUT_SECONDS),
            max_retry_attempts: number_or(
                source,
                "retry.max.attempts",
                DEFAULT_MAX_RETRY_ATTEMPTS,
            ),
            retry_delay_ms: number_or(source, "retry.delay.ms", DEFAULT_RETRY_DELAY_MS),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// The file named by `PETSTORE_CONFIG`, or `application` in the working directory.
fn config_file() -> String {
    std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

fn string_or(source: &Config, key: &str, default: &str) -> String {
    match source.get_string(key) {
        Ok(value) => value,
        Err(ConfigError::NotFound(_)) => default.to_string(),
        Err(err) => {
            warn!(key, error = %err, "Invalid configuration value, using default");
            default.to_string()
        }
    }
}

fn number_or<T>(source: &Config, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match source.get_string(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %value, default = %default, "Invalid number in configuration, using default");
            default
        }),
        Err(ConfigError::NotFound(_)) => default,
        Err(err) => {
            warn!(key, error = %err, "Invalid configuration value, using default");
            default
        }
    }
}
