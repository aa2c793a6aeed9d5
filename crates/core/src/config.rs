use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::weather::{WeatherCondition, WeatherType};
use crate::recommendations::{DEFAULT_LOCATION, DEFAULT_MAX_RECOMMENDATIONS, MIN_CANDIDATE_POOL};

const MAX_RESULTS_LIMIT: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub recommendations: RecommendationConfig,
    pub weather: WeatherConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationConfig {
    pub max_results: usize,
    pub min_candidate_pool: usize,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherConfig {
    pub provider: WeatherProviderKind,
    pub default_location: String,
    pub seed: Option<u64>,
    pub fixed_type: WeatherType,
    pub fixed_temperature: i32,
    pub fixed_precipitation_chance: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherProviderKind {
    Simulated,
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub max_results: Option<usize>,
    pub recommendation_seed: Option<u64>,
    pub weather_provider: Option<WeatherProviderKind>,
    pub default_location: Option<String>,
    pub weather_seed: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommendations: RecommendationConfig {
                max_results: DEFAULT_MAX_RECOMMENDATIONS,
                min_candidate_pool: MIN_CANDIDATE_POOL,
                seed: None,
            },
            weather: WeatherConfig {
                provider: WeatherProviderKind::Simulated,
                default_location: DEFAULT_LOCATION.to_string(),
                seed: None,
                fixed_type: WeatherType::Cloudy,
                fixed_temperature: 15,
                fixed_precipitation_chance: 30,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl WeatherConfig {
    /// Condition served by the fixed provider.
    pub fn fixed_condition(&self) -> WeatherCondition {
        WeatherCondition::new(
            self.fixed_type,
            self.fixed_temperature,
            self.fixed_precipitation_chance,
        )
    }
}

impl std::str::FromStr for WeatherProviderKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "fixed" => Ok(Self::Fixed),
            other => Err(ConfigError::Validation(format!(
                "unsupported weather provider `{other}` (expected simulated|fixed)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("stylist.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommendations) = patch.recommendations {
            if let Some(max_results) = recommendations.max_results {
                self.recommendations.max_results = max_results;
            }
            if let Some(min_candidate_pool) = recommendations.min_candidate_pool {
                self.recommendations.min_candidate_pool = min_candidate_pool;
            }
            if let Some(seed) = recommendations.seed {
                self.recommendations.seed = Some(seed);
            }
        }

        if let Some(weather) = patch.weather {
            if let Some(provider) = weather.provider {
                self.weather.provider = provider;
            }
            if let Some(default_location) = weather.default_location {
                self.weather.default_location = default_location;
            }
            if let Some(seed) = weather.seed {
                self.weather.seed = Some(seed);
            }
            if let Some(fixed_type) = weather.fixed_type {
                self.weather.fixed_type = fixed_type;
            }
            if let Some(fixed_temperature) = weather.fixed_temperature {
                self.weather.fixed_temperature = fixed_temperature;
            }
            if let Some(fixed_precipitation_chance) = weather.fixed_precipitation_chance {
                self.weather.fixed_precipitation_chance = fixed_precipitation_chance;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STYLIST_RECOMMENDATIONS_MAX_RESULTS") {
            self.recommendations.max_results =
                parse_env("STYLIST_RECOMMENDATIONS_MAX_RESULTS", &value)?;
        }
        if let Some(value) = read_env("STYLIST_RECOMMENDATIONS_MIN_CANDIDATE_POOL") {
            self.recommendations.min_candidate_pool =
                parse_env("STYLIST_RECOMMENDATIONS_MIN_CANDIDATE_POOL", &value)?;
        }
        if let Some(value) = read_env("STYLIST_RECOMMENDATIONS_SEED") {
            self.recommendations.seed = Some(parse_env("STYLIST_RECOMMENDATIONS_SEED", &value)?);
        }

        if let Some(value) = read_env("STYLIST_WEATHER_PROVIDER") {
            self.weather.provider = value.parse()?;
        }
        if let Some(value) = read_env("STYLIST_WEATHER_DEFAULT_LOCATION") {
            self.weather.default_location = value;
        }
        if let Some(value) = read_env("STYLIST_WEATHER_SEED") {
            self.weather.seed = Some(parse_env("STYLIST_WEATHER_SEED", &value)?);
        }
        if let Some(value) = read_env("STYLIST_WEATHER_FIXED_TYPE") {
            self.weather.fixed_type = value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "STYLIST_WEATHER_FIXED_TYPE".to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = read_env("STYLIST_WEATHER_FIXED_TEMPERATURE") {
            self.weather.fixed_temperature =
                parse_env("STYLIST_WEATHER_FIXED_TEMPERATURE", &value)?;
        }
        if let Some(value) = read_env("STYLIST_WEATHER_FIXED_PRECIPITATION_CHANCE") {
            self.weather.fixed_precipitation_chance =
                parse_env("STYLIST_WEATHER_FIXED_PRECIPITATION_CHANCE", &value)?;
        }

        let log_level =
            read_env("STYLIST_LOGGING_LEVEL").or_else(|| read_env("STYLIST_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STYLIST_LOGGING_FORMAT").or_else(|| read_env("STYLIST_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(max_results) = overrides.max_results {
            self.recommendations.max_results = max_results;
        }
        if let Some(seed) = overrides.recommendation_seed {
            self.recommendations.seed = Some(seed);
        }
        if let Some(provider) = overrides.weather_provider {
            self.weather.provider = provider;
        }
        if let Some(default_location) = overrides.default_location {
            self.weather.default_location = default_location;
        }
        if let Some(seed) = overrides.weather_seed {
            self.weather.seed = Some(seed);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_recommendations(&self.recommendations)?;
        validate_weather(&self.weather)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("stylist.toml"), PathBuf::from("config/stylist.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_recommendations(recommendations: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendations.max_results == 0 || recommendations.max_results > MAX_RESULTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "recommendations.max_results must be in range 1..={MAX_RESULTS_LIMIT}"
        )));
    }

    if recommendations.min_candidate_pool == 0 {
        return Err(ConfigError::Validation(
            "recommendations.min_candidate_pool must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_weather(weather: &WeatherConfig) -> Result<(), ConfigError> {
    if weather.default_location.trim().is_empty() {
        return Err(ConfigError::Validation(
            "weather.default_location must not be empty".to_string(),
        ));
    }

    if weather.fixed_precipitation_chance > 100 {
        return Err(ConfigError::Validation(
            "weather.fixed_precipitation_chance must be in range 0..=100".to_string(),
        ));
    }

    if !(-60..=60).contains(&weather.fixed_temperature) {
        return Err(ConfigError::Validation(
            "weather.fixed_temperature must be in range -60..=60".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommendations: Option<RecommendationsPatch>,
    weather: Option<WeatherPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsPatch {
    max_results: Option<usize>,
    min_candidate_pool: Option<usize>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherPatch {
    provider: Option<WeatherProviderKind>,
    default_location: Option<String>,
    seed: Option<u64>,
    fixed_type: Option<WeatherType>,
    fixed_temperature: Option<i32>,
    fixed_precipitation_chance: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, WeatherProviderKind};
    use crate::domain::weather::WeatherType;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.recommendations.max_results == 5, "default max_results should be 5")?;
        ensure(
            config.recommendations.min_candidate_pool == 5,
            "default min_candidate_pool should be 5",
        )?;
        ensure(
            config.weather.provider == WeatherProviderKind::Simulated,
            "default weather provider should be simulated",
        )?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_STYLIST_CITY", "Reykjavik");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("stylist.toml");
            fs::write(
                &path,
                r#"
[weather]
provider = "fixed"
default_location = "${TEST_STYLIST_CITY}"
fixed_type = "snowy"
fixed_temperature = -4
fixed_precipitation_chance = 85
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.weather.default_location == "Reykjavik",
                "location should be interpolated from environment",
            )?;
            ensure(
                config.weather.provider == WeatherProviderKind::Fixed,
                "provider should be loaded from file",
            )?;
            let condition = config.weather.fixed_condition();
            ensure(condition.weather_type == WeatherType::Snowy, "fixed type should be snowy")?;
            ensure(condition.temperature == -4, "fixed temperature should be -4")?;
            ensure(condition.precipitation_chance == 85, "fixed precipitation should be 85")?;
            Ok(())
        })();

        clear_vars(&["TEST_STYLIST_CITY"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STYLIST_LOG_LEVEL", "warn");
        env::set_var("STYLIST_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["STYLIST_LOG_LEVEL", "STYLIST_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STYLIST_RECOMMENDATIONS_MAX_RESULTS", "8");
        env::set_var("STYLIST_WEATHER_DEFAULT_LOCATION", "Lisbon");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("stylist.toml");
            fs::write(
                &path,
                r#"
[recommendations]
max_results = 3
seed = 17

[weather]
default_location = "Porto"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.recommendations.max_results == 8, "env max_results should win over file")?;
            ensure(config.recommendations.seed == Some(17), "file seed should be kept")?;
            ensure(
                config.weather.default_location == "Lisbon",
                "env location should win over file",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            Ok(())
        })();

        clear_vars(&["STYLIST_RECOMMENDATIONS_MAX_RESULTS", "STYLIST_WEATHER_DEFAULT_LOCATION"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STYLIST_RECOMMENDATIONS_MAX_RESULTS", "0");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("recommendations.max_results")
            );
            ensure(has_message, "validation failure should mention recommendations.max_results")
        })();

        clear_vars(&["STYLIST_RECOMMENDATIONS_MAX_RESULTS"]);
        result
    }

    #[test]
    fn malformed_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("STYLIST_WEATHER_SEED", "not-a-number");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, .. }) => {
                ensure(key == "STYLIST_WEATHER_SEED", "error should name the offending variable")
            }
            Err(other) => Err(format!("unexpected error: {other}")),
            Ok(_) => Err("expected invalid override error".to_string()),
        };

        clear_vars(&["STYLIST_WEATHER_SEED"]);
        result
    }
}
