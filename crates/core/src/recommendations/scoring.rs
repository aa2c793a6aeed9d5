//! Scoring and ranking for outfit recommendations

use std::collections::HashSet;

use crate::domain::wardrobe::WardrobeItem;
use crate::domain::weather::WeatherType;

use super::filter::contains_any;
use super::types::{RecommendationCriteria, RecommendedOutfit, SuitabilityTag};

/// Points awarded per scoring signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Per item in the outfit (default: 5)
    pub per_item: u32,
    /// Outfit occasion equals the requested one (default: 20)
    pub occasion_match: u32,
    /// Outfit season equals the requested one (default: 15)
    pub season_match: u32,
    /// Per satisfied weather rule (default: 10)
    pub weather_match: u32,
    /// Per item matching a preferred style (default: 5)
    pub style_match: u32,
    /// Per item matching a preferred color (default: 5)
    pub color_match: u32,
    /// Per distinct category in the outfit (default: 5)
    pub category_variety: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Additive outfit scorer
#[derive(Debug, Clone, Default)]
pub struct OutfitScorer {
    weights: ScoringWeights,
}

impl OutfitScorer {
    /// Create a scorer with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Total score for an outfit. Unbounded; no normalization. Saturates at
    /// `u32::MAX` for oversized custom weights.
    pub fn score(&self, outfit: &RecommendedOutfit<'_>, criteria: &RecommendationCriteria) -> u32 {
        let weights = &self.weights;
        let per = |weight: u32, count: usize| {
            weight.saturating_mul(u32::try_from(count).unwrap_or(u32::MAX))
        };

        let mut score = per(weights.per_item, outfit.items.len());

        if criteria.occasion.is_some() && criteria.occasion == outfit.occasion {
            score = score.saturating_add(weights.occasion_match);
        }

        if criteria.season.is_some() && criteria.season == outfit.season {
            score = score.saturating_add(weights.season_match);
        }

        let styled =
            Self::count_matching(outfit, &criteria.style_preference, |item| item.style.as_deref());
        let colored =
            Self::count_matching(outfit, &criteria.color_scheme, |item| item.color.as_deref());
        let categories: HashSet<_> = outfit.items.iter().map(|item| item.category).collect();

        score
            .saturating_add(self.weather_bonus(outfit, criteria))
            .saturating_add(per(weights.style_match, styled))
            .saturating_add(per(weights.color_match, colored))
            .saturating_add(per(weights.category_variety, categories.len()))
    }

    /// Weather rules are independent; an outfit can collect several bonuses.
    pub fn weather_bonus(
        &self,
        outfit: &RecommendedOutfit<'_>,
        criteria: &RecommendationCriteria,
    ) -> u32 {
        let Some(weather) = criteria.weather.as_ref() else {
            return 0;
        };
        let tagged = |tag: SuitabilityTag| outfit.weather_suitability.contains(&tag);

        let rules = [
            weather.weather_type == WeatherType::Rainy && tagged(SuitabilityTag::Rainy),
            weather.weather_type == WeatherType::Snowy && tagged(SuitabilityTag::Cold),
            weather.weather_type == WeatherType::Sunny
                && weather.temperature > 20
                && tagged(SuitabilityTag::Warm),
            weather.temperature < 15 && tagged(SuitabilityTag::Cool),
        ];

        let hits = rules.iter().filter(|&&hit| hit).count() as u32;
        self.weights.weather_match.saturating_mul(hits)
    }

    fn count_matching(
        outfit: &RecommendedOutfit<'_>,
        preferences: &[String],
        field: impl Fn(&WardrobeItem) -> Option<&str>,
    ) -> usize {
        if preferences.is_empty() {
            return 0;
        }

        outfit
            .items
            .iter()
            .filter(|item| field(item).is_some_and(|value| contains_any(value, preferences)))
            .count()
    }

    /// Score every outfit, sort by score descending and keep the first `limit`.
    /// Equal scores keep generation order.
    pub fn rank<'a>(
        &self,
        mut outfits: Vec<RecommendedOutfit<'a>>,
        criteria: &RecommendationCriteria,
        limit: usize,
    ) -> Vec<RecommendedOutfit<'a>> {
        for outfit in &mut outfits {
            outfit.score = self.score(outfit, criteria);
        }

        outfits.sort_by(|a, b| b.score.cmp(&a.score));
        outfits.truncate(limit);
        outfits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wardrobe::Category;
    use crate::domain::weather::WeatherCondition;
    use crate::recommendations::OutfitFamily;

    fn outfit<'a>(items: Vec<&'a WardrobeItem>) -> RecommendedOutfit<'a> {
        RecommendedOutfit::new(
            OutfitFamily::TopBottomShoes,
            "test".to_string(),
            "test outfit".to_string(),
            items,
            "reason",
        )
    }

    #[test]
    fn test_base_and_variety_points() {
        let top = WardrobeItem::new("t", Category::Top);
        let bottom = WardrobeItem::new("b", Category::Bottom);
        let shoes = WardrobeItem::new("s", Category::Shoes);
        let scorer = OutfitScorer::new();

        let score =
            scorer.score(&outfit(vec![&top, &bottom, &shoes]), &RecommendationCriteria::new());

        // 3 items * 5 + 3 categories * 5
        assert_eq!(score, 30);
    }

    #[test]
    fn test_occasion_and_season_need_exact_match() {
        let top = WardrobeItem::new("t", Category::Top);
        let scorer = OutfitScorer::new();
        let candidate = outfit(vec![&top])
            .with_occasion(Some("casual".to_string()))
            .with_season(Some("summer".to_string()));

        let matched = RecommendationCriteria::new().with_occasion("casual").with_season("summer");
        let mismatched =
            RecommendationCriteria::new().with_occasion("Casual").with_season("winter");

        assert_eq!(scorer.score(&candidate, &matched), 10 + 20 + 15);
        assert_eq!(scorer.score(&candidate, &mismatched), 10);
    }

    #[test]
    fn test_weather_bonuses_stack() {
        let top = WardrobeItem::new("t", Category::Top);
        let scorer = OutfitScorer::new();
        let layered = outfit(vec![&top]).with_weather_suitability(vec![
            SuitabilityTag::Cold,
            SuitabilityTag::Cool,
            SuitabilityTag::Windy,
        ]);

        let snowy = RecommendationCriteria::new()
            .with_weather(WeatherCondition::new(WeatherType::Snowy, -2, 80));
        assert_eq!(scorer.weather_bonus(&layered, &snowy), 20);

        let mild = RecommendationCriteria::new()
            .with_weather(WeatherCondition::new(WeatherType::Sunny, 22, 0));
        assert_eq!(scorer.weather_bonus(&layered, &mild), 0);

        let warm = outfit(vec![&top]).with_weather_suitability(vec![SuitabilityTag::Warm]);
        assert_eq!(scorer.weather_bonus(&warm, &mild), 10);
    }

    #[test]
    fn test_style_and_color_count_items() {
        let top =
            WardrobeItem::new("t", Category::Top).with_style("Casual Chic").with_color("Navy Blue");
        let bottom =
            WardrobeItem::new("b", Category::Bottom).with_style("street").with_color("blue");
        let scorer = OutfitScorer::new();
        let criteria = RecommendationCriteria::new()
            .with_style_preference(vec!["chic".to_string()])
            .with_color_scheme(vec!["BLUE".to_string()]);

        // base 10 + variety 10 + style 5 + color 10
        assert_eq!(scorer.score(&outfit(vec![&top, &bottom]), &criteria), 35);
    }

    #[test]
    fn test_more_items_never_score_lower() {
        let top = WardrobeItem::new("t", Category::Top);
        let bottom = WardrobeItem::new("b", Category::Bottom);
        let shoes = WardrobeItem::new("s", Category::Shoes);
        let scorer = OutfitScorer::new();
        let criteria = RecommendationCriteria::new();

        let smaller = scorer.score(&outfit(vec![&top, &bottom]), &criteria);
        let larger = scorer.score(&outfit(vec![&top, &bottom, &shoes]), &criteria);
        assert!(larger >= smaller);
    }

    #[test]
    fn test_rank_is_stable_and_truncates() {
        let top = WardrobeItem::new("t", Category::Top);
        let shoes = WardrobeItem::new("s", Category::Shoes);
        let scorer = OutfitScorer::new();

        let mut outfits = Vec::new();
        for index in 0..6 {
            let mut candidate = outfit(vec![&top]);
            candidate.name = format!("tie-{index}");
            outfits.push(candidate);
        }
        let mut best = outfit(vec![&top, &shoes]);
        best.name = "best".to_string();
        outfits.push(best);

        let ranked = scorer.rank(outfits, &RecommendationCriteria::new(), 5);
        let names: Vec<_> = ranked.iter().map(|o| o.name.as_str()).collect();

        assert_eq!(names, vec!["best", "tie-0", "tie-1", "tie-2", "tie-3"]);
        assert_eq!(ranked[0].score, 20);
        assert!(ranked[1..].iter().all(|o| o.score == 10));
    }

    #[test]
    fn test_oversized_weights_saturate() {
        let top = WardrobeItem::new("t", Category::Top).with_color("red");
        let bottom = WardrobeItem::new("b", Category::Bottom).with_color("red");
        let weights = ScoringWeights {
            per_item: u32::MAX / 2,
            color_match: u32::MAX,
            ..ScoringWeights::default()
        };
        let scorer = OutfitScorer::with_weights(weights);
        let criteria = RecommendationCriteria::new()
            .with_occasion("casual")
            .with_color_scheme(vec!["red".to_string()]);
        let candidate = outfit(vec![&top, &bottom]).with_occasion(Some("casual".to_string()));

        assert_eq!(scorer.score(&candidate, &criteria), u32::MAX);
    }
}
