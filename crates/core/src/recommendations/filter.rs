//! Candidate filtering with progressive relaxation

use crate::domain::wardrobe::{Category, WardrobeItem};
use crate::domain::weather::WeatherCondition;

use super::types::RecommendationCriteria;

/// Which filter stage produced the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    /// Every requested filter applied
    Full,
    /// Style and weather filters dropped
    Occasion,
    /// Only the season filter kept
    Season,
    /// No filter kept
    Unfiltered,
}

impl FilterStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterStage::Full => "full",
            FilterStage::Occasion => "occasion",
            FilterStage::Season => "season",
            FilterStage::Unfiltered => "unfiltered",
        }
    }
}

/// Items eligible for combination, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool<'a> {
    pub items: Vec<&'a WardrobeItem>,
    pub stage: FilterStage,
}

/// True when `tags` is empty or contains `target` exactly.
pub fn matches_or_wildcard(tags: &[String], target: &str) -> bool {
    tags.is_empty() || tags.iter().any(|tag| tag == target)
}

/// Case-insensitive substring search for any needle.
pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(&needle.to_lowercase()))
}

fn matches_style(item: &WardrobeItem, preferences: &[String]) -> bool {
    match item.style.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(style) => contains_any(style, preferences),
    }
}

fn mentions(description: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| description.contains(keyword))
}

/// Category-specific weather rules.
pub fn suits_weather(item: &WardrobeItem, weather: &WeatherCondition) -> bool {
    let temperature = weather.temperature;
    let description = item.description_lowercase();

    match item.category {
        // Wanted below 15C or in wet weather, tolerated otherwise; heat above
        // 25C excludes it even when wet.
        Category::Outerwear => temperature <= 25,
        Category::Top => {
            !(temperature > 25 && mentions(&description, &["heavy", "wool", "winter"]))
        }
        Category::Bottom => {
            let too_cold = temperature < 10 && mentions(&description, &["short"]);
            let too_hot = temperature > 28 && mentions(&description, &["jeans", "thick"]);
            !(too_cold || too_hot)
        }
        Category::Dress => !(temperature < 10 && !mentions(&description, &["long"])),
        Category::Shoes => {
            let soaked = weather.is_wet() && weather.precipitation_chance > 50;
            !(soaked && mentions(&description, &["sandal", "open"]))
        }
        Category::Accessories | Category::Bags | Category::Other => true,
    }
}

fn keep<'a>(
    items: &[&'a WardrobeItem],
    predicate: impl Fn(&WardrobeItem) -> bool,
) -> Vec<&'a WardrobeItem> {
    items.iter().copied().filter(|item| predicate(item)).collect()
}

/// Narrow `items` by season, occasion, style and weather in that order.
///
/// When the fully filtered pool holds fewer than `min_pool` items the
/// weather and style results are discarded for the occasion-filtered pool,
/// then the season-filtered pool, then the whole input. Dropped filters are
/// never re-applied.
pub fn filter_candidates<'a>(
    items: &'a [WardrobeItem],
    criteria: &RecommendationCriteria,
    min_pool: usize,
) -> CandidatePool<'a> {
    let all: Vec<&'a WardrobeItem> = items.iter().collect();

    let by_season = match criteria.season.as_deref() {
        Some(season) => keep(&all, |item| matches_or_wildcard(&item.seasons, season)),
        None => all.clone(),
    };

    let by_occasion = match criteria.occasion.as_deref() {
        Some(occasion) => keep(&by_season, |item| matches_or_wildcard(&item.occasions, occasion)),
        None => by_season.clone(),
    };

    let by_style = if criteria.style_preference.is_empty() {
        by_occasion.clone()
    } else {
        keep(&by_occasion, |item| matches_style(item, &criteria.style_preference))
    };

    let by_weather = match criteria.weather.as_ref() {
        Some(weather) => keep(&by_style, |item| suits_weather(item, weather)),
        None => by_style,
    };

    let pool = if by_weather.len() >= min_pool {
        CandidatePool { items: by_weather, stage: FilterStage::Full }
    } else if by_occasion.len() >= min_pool {
        CandidatePool { items: by_occasion, stage: FilterStage::Occasion }
    } else if by_season.len() >= min_pool {
        CandidatePool { items: by_season, stage: FilterStage::Season }
    } else {
        CandidatePool { items: all, stage: FilterStage::Unfiltered }
    };

    tracing::debug!(
        event_name = "recommendations.filter.completed",
        input_count = items.len(),
        candidate_count = pool.items.len(),
        stage = pool.stage.as_str(),
        "candidate filtering completed"
    );

    pool
}
