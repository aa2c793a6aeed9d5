use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closet category. Decides which outfit slot an item can fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Dress,
    Outerwear,
    Shoes,
    Accessories,
    Bags,
    #[serde(other)]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Dress => "dress",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Bags => "bags",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "dress" => Ok(Self::Dress),
            "outerwear" => Ok(Self::Outerwear),
            "shoes" => Ok(Self::Shoes),
            "accessories" | "accessory" => Ok(Self::Accessories),
            "bags" | "bag" => Ok(Self::Bags),
            "other" => Ok(Self::Other),
            other => Err(DomainError::UnknownCategory(other.to_owned())),
        }
    }
}

/// A closet item as stored by the host application. Read-only to the engine.
///
/// Empty `seasons` or `occasions` lists act as wildcards: the item is
/// considered suitable for every season or occasion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: ItemId,
    pub category: Category,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
}

impl WardrobeItem {
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: ItemId(id.into()),
            category,
            name: None,
            description: None,
            color: None,
            style: None,
            seasons: Vec::new(),
            occasions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_seasons<I, S>(mut self, seasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seasons = seasons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_occasions<I, S>(mut self, occasions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.occasions = occasions.into_iter().map(Into::into).collect();
        self
    }

    /// Name shown in outfit labels; unnamed items use their category.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.category.as_str(),
        }
    }

    pub fn description_lowercase(&self) -> String {
        self.description.as_deref().unwrap_or_default().to_lowercase()
    }
}
