use crate::error::{HarvestError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Paths to the district reference CSV tables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReferenceConfig {
    pub soil_table: PathBuf,
    pub groundwater_table: PathBuf,
    pub classification_table: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            soil_table: PathBuf::from("data/soil_dataset.csv"),
            groundwater_table: PathBuf::from("data/gdwater.csv"),
            classification_table: PathBuf::from("data/class.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_user_agent() -> String {
    "RainwaterHarvestingApp/1.0".to_string()
}

fn default_weather_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Config {
    /// Load from the given path, or the first config.yaml found in the
    /// standard locations. Falls back to built-in defaults when no file exists.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(HarvestError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HarvestError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parse YAML config text, substituting `${VAR}` placeholders from the environment
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HarvestError::Config(format!("Failed to parse config: {}", e)))?;

        if config.geocoding.timeout_secs == 0 || config.weather.timeout_secs == 0 {
            return Err(HarvestError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(config)
    }

    /// Search for config.yaml in the working directory, then the XDG config directory
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("rainharvest").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/rainharvest/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HarvestError::Config("Cannot determine config directory".into()))?
            .join("rainharvest");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        let defaults = Self::default();

        println!();
        println!("Reference tables (CSV)");
        let soil_table = prompt_path("  Soil table", &defaults.reference.soil_table)?;
        let groundwater_table =
            prompt_path("  Groundwater table", &defaults.reference.groundwater_table)?;
        let classification_table = prompt_path(
            "  Tariff classification table",
            &defaults.reference.classification_table,
        )?;

        println!();
        println!("Geocoding");
        let user_agent: String = Input::new()
            .with_prompt("  User-Agent")
            .default(defaults.geocoding.user_agent.clone())
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("HTTP server");
        let bind: String = Input::new()
            .with_prompt("  Bind address")
            .default(defaults.server.bind.clone())
            .interact_text()
            .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            reference: ReferenceConfig {
                soil_table,
                groundwater_table,
                classification_table,
            },
            geocoding: GeocodingConfig {
                user_agent,
                ..defaults.geocoding
            },
            weather: defaults.weather,
            server: ServerConfig { bind },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HarvestError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# rainharvest configuration\n# Generated by `rainharvest init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| HarvestError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

fn prompt_path(prompt: &str, default: &std::path::Path) -> Result<PathBuf> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()
        .map_err(|e| HarvestError::Config(format!("Input error: {}", e)))?;
    Ok(PathBuf::from(value))
}
