//! Outfit Recommendation Engine
//!
//! Turns a closet into ranked outfit suggestions: candidates are filtered by
//! season, occasion, style and weather, combined into outfits per category
//! slot, scored against the same criteria and truncated to the best few.

mod combinations;
mod engine;
mod filter;
mod scoring;
mod types;

pub use combinations::{generate_combinations, CategoryGroups};
pub use engine::{EngineSettings, RecommendationEngine, WeatherBasedRecommendations};
pub use filter::{filter_candidates, matches_or_wildcard, suits_weather, CandidatePool, FilterStage};
pub use scoring::{OutfitScorer, ScoringWeights};
pub use types::*;

/// Default point values for outfit scoring
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    per_item: 5,
    occasion_match: 20,
    season_match: 15,
    weather_match: 10,
    style_match: 5,
    color_match: 5,
    category_variety: 5,
};

/// Maximum outfits returned per request
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Candidate pool size below which filters are relaxed
pub const MIN_CANDIDATE_POOL: usize = 5;

/// Per-slot caps for the top + bottom + shoes family
pub const MAX_TOPS: usize = 5;
pub const MAX_BOTTOMS: usize = 5;
pub const MAX_SHOES: usize = 3;

/// Cap on dresses for the dress + shoes family
pub const MAX_DRESSES: usize = 5;

/// Location used when weather-based callers name none
pub const DEFAULT_LOCATION: &str = "New York";
