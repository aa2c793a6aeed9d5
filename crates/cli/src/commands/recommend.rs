use serde_json::json;
use stylist_core::config::{AppConfig, ConfigOverrides};
use stylist_core::recommendations::{EngineSettings, RecommendationEngine};
use stylist_core::{
    ApplicationError, ConfiguredWeatherProvider, RecommendationCriteria, RecommendedOutfit,
};

use crate::commands::{
    application_failure, current_thread_runtime, load_config, load_wardrobe, CommandResult,
};
use crate::{RecommendArgs, WeatherRecommendArgs};

fn engine(config: &AppConfig) -> RecommendationEngine<ConfiguredWeatherProvider> {
    RecommendationEngine::new(ConfiguredWeatherProvider::from_config(&config.weather))
        .with_settings(EngineSettings::from_config(config))
}

fn criteria_from(args: &RecommendArgs) -> RecommendationCriteria {
    let mut criteria = RecommendationCriteria::new()
        .with_style_preference(non_empty(&args.styles))
        .with_color_scheme(non_empty(&args.colors));
    if let Some(occasion) = args.occasion.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        criteria = criteria.with_occasion(occasion);
    }
    if let Some(season) = args.season.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        criteria = criteria.with_season(season.to_ascii_lowercase());
    }
    criteria
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect()
}

fn summary(outfits: &[RecommendedOutfit<'_>]) -> String {
    match outfits.first() {
        Some(best) => format!("{} outfit(s) recommended; best: {}", outfits.len(), best.name),
        None => "no outfits could be assembled from this wardrobe".to_string(),
    }
}

pub fn run(args: &RecommendArgs) -> CommandResult {
    const COMMAND: &str = "recommend";

    let overrides = ConfigOverrides { recommendation_seed: args.seed, ..ConfigOverrides::default() };
    let config = match load_config(COMMAND, overrides) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let items = match load_wardrobe(&args.items) {
        Ok(items) => items,
        Err(error) => {
            return application_failure(COMMAND, ApplicationError::Input(format!("{error:#}")))
        }
    };

    let criteria = criteria_from(args);
    let outfits = engine(&config).recommend(&items, &criteria);

    tracing::info!(
        event_name = "cli.recommend.completed",
        item_count = items.len(),
        outfit_count = outfits.len(),
        "recommendations produced"
    );

    CommandResult::success(
        COMMAND,
        summary(&outfits),
        Some(json!({ "outfits": outfits })),
    )
}

pub fn run_weather(args: &WeatherRecommendArgs) -> CommandResult {
    const COMMAND: &str = "weather-recommend";

    let overrides = ConfigOverrides { recommendation_seed: args.seed, ..ConfigOverrides::default() };
    let config = match load_config(COMMAND, overrides) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let items = match load_wardrobe(&args.items) {
        Ok(items) => items,
        Err(error) => {
            return application_failure(COMMAND, ApplicationError::Input(format!("{error:#}")))
        }
    };

    let runtime = match current_thread_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let engine = engine(&config);
    let result =
        runtime.block_on(engine.recommend_for_weather_detailed(&items, args.location.as_deref()));

    tracing::info!(
        event_name = "cli.weather_recommend.completed",
        item_count = items.len(),
        outfit_count = result.outfits.len(),
        weather_resolved = result.weather.is_some(),
        "weather-based recommendations produced"
    );

    CommandResult::success(
        COMMAND,
        summary(&result.outfits),
        Some(json!({
            "weather": result.weather,
            "season": result.season,
            "outfits": result.outfits,
        })),
    )
}
