//! Recommendation Engine implementation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AppConfig;
use crate::domain::season::Season;
use crate::domain::wardrobe::WardrobeItem;
use crate::domain::weather::WeatherCondition;
use crate::weather::WeatherProvider;

use super::combinations::generate_combinations;
use super::filter::filter_candidates;
use super::scoring::OutfitScorer;
use super::types::{RecommendationCriteria, RecommendedOutfit};
use super::{DEFAULT_LOCATION, DEFAULT_MAX_RECOMMENDATIONS, MIN_CANDIDATE_POOL};

/// Tunables for a [`RecommendationEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Outfits returned per request
    pub max_results: usize,
    /// Pool size below which filters are relaxed
    pub min_candidate_pool: usize,
    /// Seed for accessory selection; entropy when unset
    pub seed: Option<u64>,
    /// Location queried when the caller names none
    pub default_location: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RECOMMENDATIONS,
            min_candidate_pool: MIN_CANDIDATE_POOL,
            seed: None,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_results: config.recommendations.max_results,
            min_candidate_pool: config.recommendations.min_candidate_pool,
            seed: config.recommendations.seed,
            default_location: config.weather.default_location.clone(),
        }
    }
}

/// Weather-based recommendations together with the reading that drove them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherBasedRecommendations<'a> {
    /// `None` when the provider failed and criteria were dropped
    pub weather: Option<WeatherCondition>,
    pub season: Option<Season>,
    pub outfits: Vec<RecommendedOutfit<'a>>,
}

/// The main outfit recommendation engine
#[derive(Debug, Clone)]
pub struct RecommendationEngine<W> {
    weather: W,
    scorer: OutfitScorer,
    settings: EngineSettings,
}

impl<W: WeatherProvider> RecommendationEngine<W> {
    /// Create an engine with default settings and weights
    pub fn new(weather: W) -> Self {
        Self { weather, scorer: OutfitScorer::new(), settings: EngineSettings::default() }
    }

    pub fn from_config(weather: W, config: &AppConfig) -> Self {
        Self::new(weather).with_settings(EngineSettings::from_config(config))
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the default scorer, e.g. one built with custom weights
    pub fn with_scorer(mut self, scorer: OutfitScorer) -> Self {
        self.scorer = scorer;
        self
    }

    fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Ranked outfits for `items` under `criteria`.
    pub fn recommend<'a>(
        &self,
        items: &'a [WardrobeItem],
        criteria: &RecommendationCriteria,
    ) -> Vec<RecommendedOutfit<'a>> {
        self.recommend_with_rng(items, criteria, &mut self.rng())
    }

    /// Same as [`recommend`](Self::recommend) with a caller-supplied random source.
    pub fn recommend_with_rng<'a, R: Rng>(
        &self,
        items: &'a [WardrobeItem],
        criteria: &RecommendationCriteria,
        rng: &mut R,
    ) -> Vec<RecommendedOutfit<'a>> {
        if items.is_empty() {
            tracing::debug!(
                event_name = "recommendations.skipped",
                reason = "empty_wardrobe",
                "no items to recommend from"
            );
            return Vec::new();
        }

        let pool = filter_candidates(items, criteria, self.settings.min_candidate_pool);
        let outfits = generate_combinations(&pool.items, criteria, rng);
        let generated = outfits.len();
        let ranked = self.scorer.rank(outfits, criteria, self.settings.max_results);

        tracing::debug!(
            event_name = "recommendations.ranked",
            item_count = items.len(),
            candidate_count = pool.items.len(),
            filter_stage = pool.stage.as_str(),
            generated,
            returned = ranked.len(),
            top_score = ranked.first().map(|outfit| outfit.score).unwrap_or_default(),
            "outfit recommendations ranked"
        );

        ranked
    }

    /// Recommendations conditioned on the weather at `location`.
    ///
    /// A provider failure degrades to criteria-free recommendations.
    pub async fn recommend_for_weather<'a>(
        &self,
        items: &'a [WardrobeItem],
        location: Option<&str>,
    ) -> Vec<RecommendedOutfit<'a>> {
        self.recommend_for_weather_detailed(items, location).await.outfits
    }

    pub async fn recommend_for_weather_detailed<'a>(
        &self,
        items: &'a [WardrobeItem],
        location: Option<&str>,
    ) -> WeatherBasedRecommendations<'a> {
        let location = location.unwrap_or(self.settings.default_location.as_str());

        match self.weather.current_conditions(location).await {
            Ok(condition) => {
                let season = Season::from_temperature(condition.temperature);
                let criteria = RecommendationCriteria::for_weather(condition);

                tracing::debug!(
                    event_name = "recommendations.weather.resolved",
                    location,
                    weather_type = %condition.weather_type,
                    temperature = condition.temperature,
                    season = season.as_str(),
                    "weather criteria resolved"
                );

                WeatherBasedRecommendations {
                    weather: Some(condition),
                    season: Some(season),
                    outfits: self.recommend(items, &criteria),
                }
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "recommendations.weather.fallback",
                    location,
                    error = %error,
                    "weather unavailable; recommending without criteria"
                );

                WeatherBasedRecommendations {
                    weather: None,
                    season: None,
                    outfits: self.recommend(items, &RecommendationCriteria::default()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::wardrobe::Category;
    use crate::domain::weather::WeatherType;
    use crate::recommendations::{OutfitFamily, ScoringWeights};
    use crate::weather::{FixedWeatherProvider, WeatherError};

    struct FailingWeather;

    #[async_trait]
    impl WeatherProvider for FailingWeather {
        async fn current_conditions(
            &self,
            location: &str,
        ) -> Result<WeatherCondition, WeatherError> {
            Err(WeatherError::Unavailable {
                location: location.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn seeded(seed: u64) -> EngineSettings {
        EngineSettings { seed: Some(seed), ..EngineSettings::default() }
    }

    fn sample_closet() -> Vec<WardrobeItem> {
        vec![
            WardrobeItem::new("t1", Category::Top)
                .with_name("Wool Sweater")
                .with_description("heavy wool"),
            WardrobeItem::new("t2", Category::Top).with_name("Linen Tee"),
            WardrobeItem::new("b1", Category::Bottom).with_name("Chinos"),
            WardrobeItem::new("b2", Category::Bottom)
                .with_name("Shorts")
                .with_description("cotton shorts"),
            WardrobeItem::new("o1", Category::Outerwear).with_name("Parka"),
            WardrobeItem::new("s1", Category::Shoes).with_name("Boots"),
            WardrobeItem::new("s2", Category::Shoes)
                .with_name("Sandals")
                .with_description("open sandal"),
            WardrobeItem::new("a1", Category::Accessories).with_name("Beanie"),
        ]
    }

    #[test]
    fn test_empty_wardrobe_yields_nothing() {
        let engine = RecommendationEngine::new(FailingWeather);
        let criteria = RecommendationCriteria::new().with_occasion("work");

        assert!(engine.recommend(&[], &criteria).is_empty());
    }

    #[test]
    fn test_returns_at_most_five_sorted_outfits() {
        let engine = RecommendationEngine::new(FailingWeather).with_settings(seeded(9));
        let items = sample_closet();

        let outfits = engine.recommend(&items, &RecommendationCriteria::new());

        assert_eq!(outfits.len(), 5);
        assert!(outfits.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[tokio::test]
    async fn test_weather_based_uses_inferred_season() {
        let cold = WeatherCondition::new(WeatherType::Snowy, 1, 90);
        let engine =
            RecommendationEngine::new(FixedWeatherProvider::new(cold)).with_settings(seeded(4));
        let items = sample_closet();

        let result = engine.recommend_for_weather_detailed(&items, Some("Oslo")).await;

        assert_eq!(result.weather, Some(cold));
        assert_eq!(result.season, Some(Season::Winter));
        assert!(!result.outfits.is_empty());
        assert!(result.outfits.iter().all(|outfit| outfit.season.as_deref() == Some("winter")));
        // season + snowy/cold + cool bonuses put the layered outfit first
        assert_eq!(result.outfits[0].family, OutfitFamily::Layered);
        assert_eq!(result.outfits[0].score, 85);
    }

    #[tokio::test]
    async fn test_failing_weather_falls_back_to_plain_recommendations() {
        let engine = RecommendationEngine::new(FailingWeather).with_settings(seeded(21));
        let items = sample_closet();

        let fallback = engine.recommend_for_weather(&items, None).await;
        let direct = engine.recommend(&items, &RecommendationCriteria::default());

        assert_eq!(fallback, direct);
        assert!(!fallback.is_empty());
    }

    #[test]
    fn test_custom_weights_change_the_ranking() {
        let items = vec![
            WardrobeItem::new("t1", Category::Top).with_name("Oxford Shirt"),
            WardrobeItem::new("b1", Category::Bottom).with_name("Chinos"),
            WardrobeItem::new("d1", Category::Dress).with_name("Slip Dress").with_color("red"),
            WardrobeItem::new("s1", Category::Shoes).with_name("Loafers"),
        ];
        let criteria = RecommendationCriteria::new().with_color_scheme(vec!["red".to_string()]);

        // top+bottom+shoes: 15 + 15 = 30, dress+shoes: 10 + 10 + 5 = 25
        let default_engine = RecommendationEngine::new(FailingWeather).with_settings(seeded(3));
        let ranked = default_engine.recommend(&items, &criteria);
        assert_eq!(ranked[0].family, OutfitFamily::TopBottomShoes);
        assert_eq!(ranked[0].score, 30);

        let color_first = ScoringWeights { color_match: 50, ..ScoringWeights::default() };
        let tuned_engine = RecommendationEngine::new(FailingWeather)
            .with_settings(seeded(3))
            .with_scorer(OutfitScorer::with_weights(color_first));
        let ranked = tuned_engine.recommend(&items, &criteria);
        assert_eq!(ranked[0].family, OutfitFamily::DressShoes);
        assert_eq!(ranked[0].score, 70);
        assert_eq!(ranked[1].score, 30);
    }
}
