use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherType {
    Sunny,
    Rainy,
    Snowy,
    Cloudy,
    Windy,
}

impl WeatherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherType::Sunny => "sunny",
            WeatherType::Rainy => "rainy",
            WeatherType::Snowy => "snowy",
            WeatherType::Cloudy => "cloudy",
            WeatherType::Windy => "windy",
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunny" => Ok(Self::Sunny),
            "rainy" => Ok(Self::Rainy),
            "snowy" => Ok(Self::Snowy),
            "cloudy" => Ok(Self::Cloudy),
            "windy" => Ok(Self::Windy),
            other => Err(DomainError::UnknownWeatherType(other.to_owned())),
        }
    }
}

/// Point-in-time weather for a location. Recomputed per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(rename = "type")]
    pub weather_type: WeatherType,
    /// Degrees Celsius.
    pub temperature: i32,
    /// Percentage in 0..=100.
    pub precipitation_chance: u8,
}

impl WeatherCondition {
    pub fn new(weather_type: WeatherType, temperature: i32, precipitation_chance: u8) -> Self {
        Self { weather_type, temperature, precipitation_chance: precipitation_chance.min(100) }
    }

    /// Rain or snow is falling or expected.
    pub fn is_wet(&self) -> bool {
        matches!(self.weather_type, WeatherType::Rainy | WeatherType::Snowy)
    }
}
