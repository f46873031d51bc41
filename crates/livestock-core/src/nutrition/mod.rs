//! Nutrition guidelines by species and category.
//!
//! Handles:
//! - Lookup with fallback to the species' `adult` entry
//! - Structured views over free-text quantity ranges ("30-35")
//! - Seasonal feeding advice
//! - Indicative daily feed cost

mod cost;
mod season;
mod table;

pub use cost::*;
pub use season::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Category used when the requested one has no entry.
pub const FALLBACK_CATEGORY: &str = "adult";

/// Daily intake targets, kept as the display strings shown to farmers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRequirements {
    /// kg per day
    pub green_fodder: String,
    /// kg per day
    pub dry_fodder: String,
    /// kg per day
    pub concentrate: String,
    /// litres per day
    pub water: String,
    /// grams per day
    pub mineral_mixture: String,
}

impl DailyRequirements {
    /// Structured ranges for every quantity that parses.
    pub fn ranges(&self) -> Vec<(&'static str, QuantityRange)> {
        [
            ("green_fodder", &self.green_fodder, "kg"),
            ("dry_fodder", &self.dry_fodder, "kg"),
            ("concentrate", &self.concentrate, "kg"),
            ("water", &self.water, "L"),
            ("mineral_mixture", &self.mineral_mixture, "g"),
        ]
        .into_iter()
        .filter_map(|(name, text, unit)| QuantityRange::parse(text, unit).map(|r| (name, r)))
        .collect()
    }
}

/// Ration composition targets (percentages or energy density, as text).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedComposition {
    pub crude_protein: String,
    pub energy: String,
    pub calcium: String,
    pub phosphorus: String,
}

/// Advisory text per season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalAdvice {
    pub summer: String,
    pub monsoon: String,
    pub winter: String,
}

/// Feeding guideline for one (species, category).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionRequirement {
    pub species: String,
    pub category: String,
    pub daily: DailyRequirements,
    pub composition: FeedComposition,
    pub seasonal: SeasonalAdvice,
}

impl NutritionRequirement {
    /// Advice for the given season.
    pub fn advice_for(&self, season: Season) -> &str {
        match season {
            Season::Summer => &self.seasonal.summer,
            Season::Monsoon => &self.seasonal.monsoon,
            Season::Winter => &self.seasonal.winter,
        }
    }
}

/// Parsed numeric range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantityRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

impl QuantityRange {
    /// Parse "a-b" or a single "a". Trailing unit text on either side is ignored.
    pub fn parse(text: &str, unit: &str) -> Option<Self> {
        let mut parts = text.splitn(2, '-');
        let min = cost::leading_number(parts.next()?)?;
        let max = match parts.next() {
            Some(rest) => cost::leading_number(rest)?,
            None => min,
        };
        Some(Self {
            min,
            max,
            unit: unit.to_string(),
        })
    }
}

/// Lookup table of feeding guidelines.
pub struct NutritionGuide {
    /// (species, category) → requirement, both keys lowercase
    requirements: HashMap<(String, String), NutritionRequirement>,
}

impl Default for NutritionGuide {
    fn default() -> Self {
        Self::new()
    }
}

impl NutritionGuide {
    /// Create a guide with the built-in table.
    pub fn new() -> Self {
        let mut guide = Self {
            requirements: HashMap::new(),
        };
        for requirement in table::default_requirements() {
            guide.add_requirement(requirement);
        }
        guide
    }

    /// Exact match, else the species' adult entry, else `None`.
    pub fn lookup(&self, species: &str, category: &str) -> Option<&NutritionRequirement> {
        let species = species.trim().to_lowercase();
        let category = category.trim().to_lowercase();
        self.requirements
            .get(&(species.clone(), category))
            .or_else(|| {
                self.requirements
                    .get(&(species, FALLBACK_CATEGORY.to_string()))
            })
    }

    /// Indicative daily feed cost for a species/category.
    pub fn estimate_daily_cost(&self, species: &str, category: &str) -> Option<CostEstimate> {
        let requirement = self.lookup(species, category)?;
        estimate_from_requirements(&requirement.daily)
    }

    /// Seasonal advice for a month (1-12).
    pub fn seasonal_advice(&self, species: &str, category: &str, month: u32) -> Option<&str> {
        self.lookup(species, category)
            .map(|r| r.advice_for(Season::for_month(month)))
    }

    /// Species with at least one entry, sorted.
    pub fn species(&self) -> Vec<String> {
        let mut species: Vec<String> = self
            .requirements
            .keys()
            .map(|(s, _)| s.clone())
            .collect();
        species.sort();
        species.dedup();
        species
    }

    /// Categories known for a species, sorted.
    pub fn categories(&self, species: &str) -> Vec<String> {
        let species = species.trim().to_lowercase();
        let mut categories: Vec<String> = self
            .requirements
            .keys()
            .filter(|(s, _)| *s == species)
            .map(|(_, c)| c.clone())
            .collect();
        categories.sort();
        categories
    }

    /// Add or replace an entry.
    pub fn add_requirement(&mut self, requirement: NutritionRequirement) {
        let key = (
            requirement.species.to_lowercase(),
            requirement.category.to_lowercase(),
        );
        self.requirements.insert(key, requirement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let guide = NutritionGuide::new();
        let r = guide.lookup("Cattle", "Lactating").unwrap();
        assert_eq!(r.category, "lactating");
        assert_eq!(r.daily.green_fodder, "30-35");
    }

    #[test]
    fn test_falls_back_to_adult() {
        let guide = NutritionGuide::new();
        let r = guide.lookup("goat", "castrated").unwrap();
        assert_eq!(r.category, "adult");
    }

    #[test]
    fn test_unknown_species() {
        let guide = NutritionGuide::new();
        assert!(guide.lookup("camel", "adult").is_none());
        assert!(guide.estimate_daily_cost("camel", "adult").is_none());
    }

    #[test]
    fn test_cost_is_deterministic() {
        let guide = NutritionGuide::new();
        let first = guide.estimate_daily_cost("cattle", "lactating").unwrap();
        let second = guide.estimate_daily_cost("cattle", "lactating").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, CostEstimate { min: 155.0, max: 233.0 });
    }

    #[test]
    fn test_quantity_range_parse() {
        assert_eq!(
            QuantityRange::parse("30-35", "kg"),
            Some(QuantityRange { min: 30.0, max: 35.0, unit: "kg".into() })
        );
        assert_eq!(
            QuantityRange::parse("3-4 kg", "kg").map(|r| r.max),
            Some(4.0)
        );
        assert_eq!(QuantityRange::parse("2", "kg").map(|r| (r.min, r.max)), Some((2.0, 2.0)));
        assert_eq!(QuantityRange::parse("ad lib", "kg"), None);
    }

    #[test]
    fn test_display_strings_preserved() {
        let guide = NutritionGuide::new();
        let r = guide.lookup("cattle", "lactating").unwrap();
        assert_eq!(r.daily.concentrate, "3-4 kg");
        assert_eq!(r.daily.ranges().len(), 5);
    }

    #[test]
    fn test_seasonal_advice() {
        let guide = NutritionGuide::new();
        let summer = guide.seasonal_advice("buffalo", "adult", 4).unwrap();
        assert!(summer.contains("wallowing"));
        let winter = guide.seasonal_advice("buffalo", "adult", 12).unwrap();
        assert_ne!(summer, winter);
    }

    #[test]
    fn test_species_and_categories() {
        let guide = NutritionGuide::new();
        assert!(guide.species().contains(&"poultry".to_string()));
        assert_eq!(
            guide.categories("goat"),
            vec!["adult", "kid", "lactating", "pregnant"]
        );
    }
}
