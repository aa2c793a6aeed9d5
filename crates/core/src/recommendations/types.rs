//! Types for the Recommendation Engine

use serde::Serialize;

use crate::domain::season::Season;
use crate::domain::wardrobe::WardrobeItem;
use crate::domain::weather::WeatherCondition;

/// Optional conditions an outfit should satisfy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationCriteria {
    /// Occasion label, matched exactly
    pub occasion: Option<String>,
    /// Season label, matched exactly
    pub season: Option<String>,
    /// Current weather
    pub weather: Option<WeatherCondition>,
    /// Preferred styles, matched as case-insensitive substrings
    pub style_preference: Vec<String>,
    /// Preferred colors, matched as case-insensitive substrings
    pub color_scheme: Vec<String>,
}

impl RecommendationCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_weather(mut self, weather: WeatherCondition) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_style_preference(mut self, styles: Vec<String>) -> Self {
        self.style_preference = styles;
        self
    }

    pub fn with_color_scheme(mut self, colors: Vec<String>) -> Self {
        self.color_scheme = colors;
        self
    }

    /// Criteria derived from a weather reading: the season implied by the
    /// temperature plus the condition itself.
    pub fn for_weather(weather: WeatherCondition) -> Self {
        Self::new()
            .with_season(Season::from_temperature(weather.temperature).as_str())
            .with_weather(weather)
    }
}

/// Generation strategy that produced an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutfitFamily {
    /// Top, bottom and shoes
    TopBottomShoes,
    /// Dress and shoes
    DressShoes,
    /// Top, bottom, outerwear and shoes
    Layered,
}

/// Weather an outfit was assembled to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityTag {
    Cold,
    Cool,
    Windy,
    Rainy,
    Warm,
}

/// A ranked outfit suggestion. Borrows the closet items it is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedOutfit<'a> {
    /// Label built from item names
    pub name: String,
    /// Sentence summarizing the combination
    pub description: String,
    /// Items in slot order
    pub items: Vec<&'a WardrobeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    /// Only set for outfits built for weather
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weather_suitability: Vec<SuitabilityTag>,
    /// Display-only justification
    pub reasoning: String,
    /// Rank key; zero until scored
    pub score: u32,
    pub family: OutfitFamily,
    #[serde(skip)]
    accessorized: bool,
}

impl<'a> RecommendedOutfit<'a> {
    pub(crate) fn new(
        family: OutfitFamily,
        name: String,
        description: String,
        items: Vec<&'a WardrobeItem>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            name,
            description,
            items,
            occasion: None,
            season: None,
            weather_suitability: Vec::new(),
            reasoning: reasoning.into(),
            score: 0,
            family,
            accessorized: false,
        }
    }

    pub(crate) fn with_occasion(mut self, occasion: Option<String>) -> Self {
        self.occasion = occasion;
        self
    }

    pub(crate) fn with_season(mut self, season: Option<String>) -> Self {
        self.season = season;
        self
    }

    pub(crate) fn with_weather_suitability(mut self, tags: Vec<SuitabilityTag>) -> Self {
        self.weather_suitability = tags;
        self
    }

    /// Appends one accessory. A second call is a no-op.
    pub(crate) fn accessorize(&mut self, accessory: &'a WardrobeItem) -> bool {
        if self.accessorized {
            return false;
        }

        self.items.push(accessory);
        self.description.push_str(&format!(" Accessorize with {}.", accessory.display_name()));
        self.accessorized = true;
        true
    }

    /// Whether the accessory pass added an item.
    pub fn is_accessorized(&self) -> bool {
        self.accessorized
    }
}
