use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use stylist_core::config::{AppConfig, LoadOptions};
use toml::Value;

struct Field {
    key_path: &'static str,
    env_key: &'static str,
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let optional =
        |value: Option<u64>| value.map_or_else(|| "<unset>".to_string(), |v| v.to_string());

    let fields = [
        Field {
            key_path: "recommendations.max_results",
            env_key: "STYLIST_RECOMMENDATIONS_MAX_RESULTS",
            value: config.recommendations.max_results.to_string(),
        },
        Field {
            key_path: "recommendations.min_candidate_pool",
            env_key: "STYLIST_RECOMMENDATIONS_MIN_CANDIDATE_POOL",
            value: config.recommendations.min_candidate_pool.to_string(),
        },
        Field {
            key_path: "recommendations.seed",
            env_key: "STYLIST_RECOMMENDATIONS_SEED",
            value: optional(config.recommendations.seed),
        },
        Field {
            key_path: "weather.provider",
            env_key: "STYLIST_WEATHER_PROVIDER",
            value: format!("{:?}", config.weather.provider),
        },
        Field {
            key_path: "weather.default_location",
            env_key: "STYLIST_WEATHER_DEFAULT_LOCATION",
            value: config.weather.default_location.clone(),
        },
        Field {
            key_path: "weather.seed",
            env_key: "STYLIST_WEATHER_SEED",
            value: optional(config.weather.seed),
        },
        Field {
            key_path: "weather.fixed_type",
            env_key: "STYLIST_WEATHER_FIXED_TYPE",
            value: config.weather.fixed_type.to_string(),
        },
        Field {
            key_path: "weather.fixed_temperature",
            env_key: "STYLIST_WEATHER_FIXED_TEMPERATURE",
            value: config.weather.fixed_temperature.to_string(),
        },
        Field {
            key_path: "weather.fixed_precipitation_chance",
            env_key: "STYLIST_WEATHER_FIXED_PRECIPITATION_CHANCE",
            value: config.weather.fixed_precipitation_chance.to_string(),
        },
        Field {
            key_path: "logging.level",
            env_key: "STYLIST_LOGGING_LEVEL",
            value: config.logging.level.clone(),
        },
        Field {
            key_path: "logging.format",
            env_key: "STYLIST_LOGGING_FORMAT",
            value: format!("{:?}", config.logging.format),
        },
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in &fields {
        lines.push(render_line(
            field.key_path,
            &field.value,
            field_source(
                field.key_path,
                Some(field.env_key),
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        ));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("stylist.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/stylist.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
