use thiserror::Error;

use crate::config::ConfigError;
use crate::weather::WeatherError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown wardrobe category `{0}`")]
    UnknownCategory(String),
    #[error("unknown weather type `{0}`")]
    UnknownWeatherType(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("invalid input: {0}")]
    Input(String),
}

impl ApplicationError {
    /// Stable machine-readable class for operator output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Input(_) => "input",
            Self::Weather(_) => "weather",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Input(_) => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Weather(_) => "Weather data is temporarily unavailable. Please retry shortly.",
            Self::Configuration(_) => "The configuration is invalid.",
        }
    }
}
