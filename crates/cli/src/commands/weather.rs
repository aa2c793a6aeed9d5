use serde_json::json;
use stylist_core::config::ConfigOverrides;
use stylist_core::{ApplicationError, ConfiguredWeatherProvider, Season, WeatherProvider};

use crate::commands::{application_failure, current_thread_runtime, load_config, CommandResult};

pub fn run(location: Option<&str>) -> CommandResult {
    const COMMAND: &str = "weather";

    let config = match load_config(COMMAND, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match current_thread_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let location = location.unwrap_or(config.weather.default_location.as_str());
    let provider = ConfiguredWeatherProvider::from_config(&config.weather);

    match runtime.block_on(provider.current_conditions(location)) {
        Ok(condition) => CommandResult::success(
            COMMAND,
            format!(
                "{location}: {} at {}C, {}% precipitation",
                condition.weather_type, condition.temperature, condition.precipitation_chance
            ),
            Some(json!({
                "location": location,
                "weather": condition,
                "season": Season::from_temperature(condition.temperature),
            })),
        ),
        Err(error) => application_failure(COMMAND, ApplicationError::from(error)),
    }
}
