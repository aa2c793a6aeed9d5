use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{WeatherError, WeatherProvider};
use crate::domain::weather::{WeatherCondition, WeatherType};

/// Draws a plausible condition for a calendar month (1 = January).
///
/// Months fall into four bands: Dec-Feb, Mar-May, Jun-Sep and Oct-Nov, each
/// with its own temperature, precipitation and condition distribution.
pub fn simulate_for_month<R: Rng>(
    month: u32,
    rng: &mut R,
) -> Result<WeatherCondition, WeatherError> {
    let condition = match month {
        12 | 1 | 2 => {
            let temperature = rng.gen_range(-5..5);
            let weather_type =
                if rng.gen_bool(0.5) { WeatherType::Snowy } else { WeatherType::Cloudy };
            WeatherCondition::new(weather_type, temperature, rng.gen_range(40..100))
        }
        3..=5 => {
            let temperature = rng.gen_range(10..20);
            let weather_type = if rng.gen_bool(0.3) {
                WeatherType::Rainy
            } else if rng.gen_bool(0.5) {
                WeatherType::Cloudy
            } else {
                WeatherType::Sunny
            };
            WeatherCondition::new(weather_type, temperature, rng.gen_range(20..70))
        }
        6..=9 => {
            let temperature = rng.gen_range(20..30);
            let weather_type =
                if rng.gen_bool(0.2) { WeatherType::Rainy } else { WeatherType::Sunny };
            WeatherCondition::new(weather_type, temperature, rng.gen_range(0..30))
        }
        10 | 11 => {
            let temperature = rng.gen_range(5..15);
            let weather_type = if rng.gen_bool(0.4) {
                WeatherType::Rainy
            } else if rng.gen_bool(0.5) {
                WeatherType::Cloudy
            } else {
                WeatherType::Windy
            };
            WeatherCondition::new(weather_type, temperature, rng.gen_range(30..70))
        }
        other => return Err(WeatherError::InvalidMonth(other)),
    };

    Ok(condition)
}

/// Offline stand-in for a real weather service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeasonalWeatherSimulator {
    month: Option<u32>,
    seed: Option<u64>,
}

impl SeasonalWeatherSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the simulated month instead of reading the clock.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Make every draw reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[async_trait]
impl WeatherProvider for SeasonalWeatherSimulator {
    async fn current_conditions(&self, location: &str) -> Result<WeatherCondition, WeatherError> {
        let month = self.month.unwrap_or_else(|| Utc::now().month());
        let condition = simulate_for_month(month, &mut self.rng())?;

        tracing::debug!(
            event_name = "weather.simulated",
            location,
            month,
            weather_type = %condition.weather_type,
            temperature = condition.temperature,
            precipitation_chance = condition.precipitation_chance,
            "simulated weather condition"
        );

        Ok(condition)
    }
}
