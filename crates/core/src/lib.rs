pub mod config;
pub mod domain;
pub mod errors;
pub mod recommendations;
pub mod weather;

pub use config::{AppConfig, ConfigError, LoadOptions};
pub use domain::season::Season;
pub use domain::wardrobe::{Category, ItemId, WardrobeItem};
pub use domain::weather::{WeatherCondition, WeatherType};
pub use errors::{ApplicationError, DomainError};
pub use recommendations::{
    OutfitFamily, RecommendationCriteria, RecommendationEngine, RecommendedOutfit, SuitabilityTag,
};
pub use weather::{
    ConfiguredWeatherProvider, FixedWeatherProvider, SeasonalWeatherSimulator, WeatherError,
    WeatherProvider,
};
