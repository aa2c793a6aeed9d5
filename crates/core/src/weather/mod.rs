//! Weather adapter consulted by weather-based recommendations.
//!
//! Real providers live in the host application and implement
//! [`WeatherProvider`]. The crate ships a seasonal simulator for offline use
//! and a fixed provider for deterministic runs.

mod simulator;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{WeatherConfig, WeatherProviderKind};
use crate::domain::weather::WeatherCondition;

pub use simulator::{simulate_for_month, SeasonalWeatherSimulator};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("weather unavailable for `{location}`: {reason}")]
    Unavailable { location: String, reason: String },
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
}

/// Source of current weather for a location.
///
/// Implementations own their retry and timeout policy; the engine calls
/// each provider once per request.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, location: &str) -> Result<WeatherCondition, WeatherError>;
}

/// Always reports the same condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWeatherProvider {
    condition: WeatherCondition,
}

impl FixedWeatherProvider {
    pub fn new(condition: WeatherCondition) -> Self {
        Self { condition }
    }
}

#[async_trait]
impl WeatherProvider for FixedWeatherProvider {
    async fn current_conditions(&self, location: &str) -> Result<WeatherCondition, WeatherError> {
        tracing::debug!(
            event_name = "weather.fixed.served",
            location,
            weather_type = %self.condition.weather_type,
            temperature = self.condition.temperature,
            "serving fixed weather condition"
        );
        Ok(self.condition)
    }
}

/// Provider chosen by `weather.provider` in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfiguredWeatherProvider {
    Simulated(SeasonalWeatherSimulator),
    Fixed(FixedWeatherProvider),
}

impl ConfiguredWeatherProvider {
    pub fn from_config(config: &WeatherConfig) -> Self {
        match config.provider {
            WeatherProviderKind::Simulated => {
                let simulator = SeasonalWeatherSimulator::new();
                Self::Simulated(match config.seed {
                    Some(seed) => simulator.with_seed(seed),
                    None => simulator,
                })
            }
            WeatherProviderKind::Fixed => {
                Self::Fixed(FixedWeatherProvider::new(config.fixed_condition()))
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for ConfiguredWeatherProvider {
    async fn current_conditions(&self, location: &str) -> Result<WeatherCondition, WeatherError> {
        match self {
            Self::Simulated(provider) => provider.current_conditions(location).await,
            Self::Fixed(provider) => provider.current_conditions(location).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfiguredWeatherProvider, FixedWeatherProvider, WeatherProvider};
    use crate::config::{AppConfig, WeatherProviderKind};
    use crate::domain::weather::{WeatherCondition, WeatherType};

    #[tokio::test]
    async fn fixed_provider_returns_configured_condition() {
        let condition = WeatherCondition::new(WeatherType::Windy, 9, 35);
        let provider = FixedWeatherProvider::new(condition);

        let served = provider.current_conditions("Oslo").await.expect("fixed weather");
        assert_eq!(served, condition);
    }

    #[tokio::test]
    async fn configured_provider_follows_config_kind() {
        let mut config = AppConfig::default().weather;
        assert!(matches!(
            ConfiguredWeatherProvider::from_config(&config),
            ConfiguredWeatherProvider::Simulated(_)
        ));

        config.provider = WeatherProviderKind::Fixed;
        config.fixed_type = WeatherType::Rainy;
        config.fixed_temperature = 18;
        config.fixed_precipitation_chance = 75;
        let provider = ConfiguredWeatherProvider::from_config(&config);

        let served = provider.current_conditions("Bergen").await.expect("fixed weather");
        assert_eq!(served, WeatherCondition::new(WeatherType::Rainy, 18, 75));
    }
}
