//! Outfit assembly from filtered candidates

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::wardrobe::{Category, WardrobeItem};

use super::types::{OutfitFamily, RecommendationCriteria, RecommendedOutfit, SuitabilityTag};
use super::{MAX_BOTTOMS, MAX_DRESSES, MAX_SHOES, MAX_TOPS};

const CASUAL: &str = "casual";
const FORMAL: &str = "formal";
const FALL: &str = "fall";

/// Candidates grouped by the outfit slot they can fill, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups<'a> {
    pub tops: Vec<&'a WardrobeItem>,
    pub bottoms: Vec<&'a WardrobeItem>,
    pub dresses: Vec<&'a WardrobeItem>,
    pub outerwear: Vec<&'a WardrobeItem>,
    pub shoes: Vec<&'a WardrobeItem>,
    pub accessories: Vec<&'a WardrobeItem>,
}

impl<'a> CategoryGroups<'a> {
    pub fn partition(items: &[&'a WardrobeItem]) -> Self {
        let mut groups = Self::default();
        for &item in items {
            match item.category {
                Category::Top => groups.tops.push(item),
                Category::Bottom => groups.bottoms.push(item),
                Category::Dress => groups.dresses.push(item),
                Category::Outerwear => groups.outerwear.push(item),
                Category::Shoes => groups.shoes.push(item),
                Category::Accessories => groups.accessories.push(item),
                Category::Bags | Category::Other => {}
            }
        }
        groups
    }
}

fn occasion_or(criteria: &RecommendationCriteria, fallback: &str) -> Option<String> {
    Some(criteria.occasion.clone().unwrap_or_else(|| fallback.to_owned()))
}

fn top_bottom_shoes<'a>(
    groups: &CategoryGroups<'a>,
    criteria: &RecommendationCriteria,
) -> Vec<RecommendedOutfit<'a>> {
    let mut outfits = Vec::new();

    for &top in groups.tops.iter().take(MAX_TOPS) {
        for &bottom in groups.bottoms.iter().take(MAX_BOTTOMS) {
            for &shoes in groups.shoes.iter().take(MAX_SHOES) {
                let outfit = RecommendedOutfit::new(
                    OutfitFamily::TopBottomShoes,
                    format!("{} with {}", top.display_name(), bottom.display_name()),
                    format!(
                        "{} paired with {}, finished with {}.",
                        top.display_name(),
                        bottom.display_name(),
                        shoes.display_name()
                    ),
                    vec![top, bottom, shoes],
                    "A balanced top and bottom pairing completed with shoes.",
                )
                .with_occasion(occasion_or(criteria, CASUAL))
                .with_season(criteria.season.clone());
                outfits.push(outfit);
            }
        }
    }

    outfits
}

fn dress_shoes<'a>(
    groups: &CategoryGroups<'a>,
    criteria: &RecommendationCriteria,
) -> Vec<RecommendedOutfit<'a>> {
    let mut outfits = Vec::new();

    for &dress in groups.dresses.iter().take(MAX_DRESSES) {
        for &shoes in groups.shoes.iter().take(MAX_SHOES) {
            let outfit = RecommendedOutfit::new(
                OutfitFamily::DressShoes,
                format!("{} ensemble", dress.display_name()),
                format!("{} styled with {}.", dress.display_name(), shoes.display_name()),
                vec![dress, shoes],
                "A dress carries the look on its own; the shoes complete it.",
            )
            .with_occasion(occasion_or(criteria, FORMAL))
            .with_season(criteria.season.clone());
            outfits.push(outfit);
        }
    }

    outfits
}

/// At most one layered outfit, always built from the first item of each slot.
fn layered<'a>(
    groups: &CategoryGroups<'a>,
    criteria: &RecommendationCriteria,
) -> Option<RecommendedOutfit<'a>> {
    let top = *groups.tops.first()?;
    let bottom = *groups.bottoms.first()?;
    let outerwear = *groups.outerwear.first()?;
    let shoes = *groups.shoes.first()?;

    let outfit = RecommendedOutfit::new(
        OutfitFamily::Layered,
        format!("Layered {} look", outerwear.display_name()),
        format!(
            "{} and {} layered under {}, with {}.",
            top.display_name(),
            bottom.display_name(),
            outerwear.display_name(),
            shoes.display_name()
        ),
        vec![top, bottom, outerwear, shoes],
        "Layering adds warmth for cool or changeable weather.",
    )
    .with_occasion(occasion_or(criteria, CASUAL))
    .with_season(Some(criteria.season.clone().unwrap_or_else(|| FALL.to_owned())))
    .with_weather_suitability(vec![
        SuitabilityTag::Cold,
        SuitabilityTag::Cool,
        SuitabilityTag::Windy,
    ]);

    Some(outfit)
}

/// Add one random accessory to every other outfit, starting with the first.
fn accessorize<'a, R: Rng>(
    outfits: &mut [RecommendedOutfit<'a>],
    accessories: &[&'a WardrobeItem],
    rng: &mut R,
) {
    if accessories.is_empty() {
        return;
    }

    for outfit in outfits.iter_mut().step_by(2) {
        if let Some(&accessory) = accessories.choose(rng) {
            outfit.accessorize(accessory);
        }
    }
}

/// Build every applicable outfit family from `items`, then run the
/// accessory pass. Scores are left at zero.
pub fn generate_combinations<'a, R: Rng>(
    items: &[&'a WardrobeItem],
    criteria: &RecommendationCriteria,
    rng: &mut R,
) -> Vec<RecommendedOutfit<'a>> {
    let groups = CategoryGroups::partition(items);

    let mut outfits = top_bottom_shoes(&groups, criteria);
    outfits.extend(dress_shoes(&groups, criteria));
    outfits.extend(layered(&groups, criteria));

    accessorize(&mut outfits, &groups.accessories, rng);

    tracing::debug!(
        event_name = "recommendations.combinations.generated",
        candidate_count = items.len(),
        outfit_count = outfits.len(),
        accessory_count = groups.accessories.len(),
        "outfit combinations generated"
    );

    outfits
}
