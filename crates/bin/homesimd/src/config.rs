//! Configuration loading from an optional TOML file.
//!
//! Looks for `homesim.toml` in the working directory. Every field has a
//! default so the file is optional. No environment variables are read.

use std::time::Duration;

use homesim_domain::automation::presets::PresetConfig;
use serde::Deserialize;

const CONFIG_FILE: &str = "homesim.toml";
const MIN_TICK_MILLIS: u64 = 100;
const COMFORT_RANGE: (f64, f64) = (10.0, 32.0);

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Tick loop and device physics.
    pub simulation: SimulationConfig,
    /// Built-in rules.
    pub automation: AutomationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `127.0.0.1`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Simulation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tick period in milliseconds. Also drives the dashboard refresh.
    pub tick_millis: u64,
    /// How long a camera keeps reporting motion before it clears.
    pub motion_hold_secs: u64,
}

/// Automation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Initial state of the global automation switch.
    pub enabled: bool,
    /// Target temperature used by the temperature control rule, in °C.
    pub comfort_temperature: f64,
    pub morning_hour: u32,
    pub evening_hour: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`EnvFilter` syntax).
    pub filter: String,
}

impl Config {
    /// Load and validate configuration from `homesim.toml` (if present).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is malformed,
    /// or holds out-of-range values.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_file(CONFIG_FILE)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.simulation.tick_millis < MIN_TICK_MILLIS {
            return Err(ConfigError::Validation(format!(
                "tick_millis must be at least {MIN_TICK_MILLIS}"
            )));
        }
        let (low, high) = COMFORT_RANGE;
        let comfort = self.automation.comfort_temperature;
        if !(low..=high).contains(&comfort) {
            return Err(ConfigError::Validation(format!(
                "comfort_temperature must be between {low} and {high}, got {comfort}"
            )));
        }
        for (name, hour) in [
            ("morning_hour", self.automation.morning_hour),
            ("evening_hour", self.automation.evening_hour),
        ] {
            if hour > 23 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between 0 and 23, got {hour}"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_millis)
    }

    #[must_use]
    pub fn motion_hold(&self) -> Duration {
        Duration::from_secs(self.simulation.motion_hold_secs)
    }

    /// Tunables for the built-in rule set.
    #[must_use]
    pub fn presets(&self) -> PresetConfig {
        PresetConfig {
            comfort_temperature: self.automation.comfort_temperature,
            morning_hour: self.automation.morning_hour,
            evening_hour: self.automation.evening_hour,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_millis: 2000,
            motion_hold_secs: 5,
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        let presets = PresetConfig::default();
        Self {
            enabled: true,
            comfort_temperature: presets.comfort_temperature,
            morning_hour: presets.morning_hour,
            evening_hour: presets.evening_hour,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homesimd=info,homesim=info,tower_http=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
