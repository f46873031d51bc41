//! Built-in feeding guidelines.
//!
//! Quantities are per animal per day. Fodder and concentrate in kg, water in
//! litres, mineral mixture in grams.

use super::{DailyRequirements, FeedComposition, NutritionRequirement, SeasonalAdvice};

const COOL_WATER: &str = "Provide cool drinking water at all times, feed green fodder in early morning and evening, and keep animals in shade during peak heat.";
const DRY_SHED: &str = "Keep sheds dry, avoid wet or mouldy fodder, and deworm before and after the rains.";
const WARM_RATION: &str = "Increase dry fodder and concentrate slightly for extra energy, and protect animals from cold drafts at night.";

type Row = (
    &'static str,
    &'static str,
    [&'static str; 5],
    [&'static str; 4],
    Option<[&'static str; 3]>,
);

/// (species, category, [green, dry, concentrate, water, mineral], [CP, TDN, Ca, P], seasonal override)
const ROWS: &[Row] = &[
    ("cattle", "calf", ["5-10", "1-2", "0.5-1", "10-15", "10-20"], ["18-20%", "70-72%", "0.7%", "0.5%"], None),
    ("cattle", "heifer", ["15-20", "3-4", "1-1.5", "30-40", "30-40"], ["12-14%", "60-65%", "0.5%", "0.35%"], None),
    ("cattle", "adult", ["20-25", "4-5", "1-2", "40-60", "40-50"], ["10-12%", "55-60%", "0.4%", "0.3%"], None),
    ("cattle", "lactating", ["30-35", "5-6", "3-4 kg", "60-80", "50-60"], ["16-18%", "65-70%", "0.6%", "0.4%"], Some([
        "Milking animals lose more water in heat; offer water after every milking and add electrolytes.",
        "Check udders daily for mastitis in humid weather and keep the milking area dry.",
        "Add 0.5-1 kg extra concentrate to sustain milk yield in the cold.",
    ])),
    ("cattle", "pregnant", ["25-30", "5-6", "1.5-2", "50-60", "50-60"], ["12-14%", "60-65%", "0.5%", "0.35%"], None),
    ("cattle", "dry", ["20-25", "5-6", "1-1.5", "40-50", "40-50"], ["10-12%", "55-60%", "0.45%", "0.3%"], None),
    ("buffalo", "calf", ["6-10", "1-2", "0.5-1", "12-18", "10-20"], ["18-20%", "70-72%", "0.7%", "0.5%"], None),
    ("buffalo", "adult", ["25-30", "5-6", "1.5-2", "50-70", "40-50"], ["10-12%", "55-60%", "0.4%", "0.3%"], Some([
        "Buffaloes tolerate heat poorly; allow wallowing or sprinkle water twice a day.",
        DRY_SHED,
        WARM_RATION,
    ])),
    ("buffalo", "lactating", ["35-40", "6-7", "3.5-4.5 kg", "70-90", "50-60"], ["16-18%", "65-70%", "0.6%", "0.4%"], None),
    ("goat", "kid", ["0.5-1", "0.1-0.2", "0.1-0.15", "0.5-1", "5-10"], ["18-20%", "70-72%", "0.6%", "0.4%"], None),
    ("goat", "adult", ["3-4", "0.5-1", "0.2-0.3", "3-5", "10-15"], ["12-14%", "60-65%", "0.4%", "0.25%"], None),
    ("goat", "lactating", ["4-5", "1-1.5", "0.4-0.5 kg", "5-7", "15-20"], ["14-16%", "65-68%", "0.6%", "0.4%"], None),
    ("goat", "pregnant", ["4-5", "1-1.5", "0.3-0.4", "4-6", "15-20"], ["14-16%", "62-65%", "0.5%", "0.35%"], None),
    ("sheep", "lamb", ["0.5-1", "0.1-0.2", "0.1-0.15", "0.5-1", "5-10"], ["16-18%", "68-70%", "0.5%", "0.35%"], None),
    ("sheep", "adult", ["3-4", "0.5-1", "0.2-0.25", "3-5", "10-15"], ["10-12%", "58-62%", "0.35%", "0.25%"], Some([
        "Shear before peak summer and graze in the cooler hours only.",
        "Avoid grazing on waterlogged pasture to limit foot rot and liver fluke.",
        WARM_RATION,
    ])),
    ("sheep", "pregnant", ["3.5-4.5", "1-1.5", "0.3-0.4", "4-6", "15-20"], ["12-14%", "60-65%", "0.45%", "0.3%"], None),
    ("pig", "grower", ["1-2", "0-0.5", "1.5-2", "6-8", "10-15"], ["16-18%", "70-75%", "0.6%", "0.5%"], None),
    ("pig", "adult", ["2-3", "0.5-1", "2-2.5", "8-12", "15-20"], ["13-14%", "70-72%", "0.6%", "0.5%"], None),
    ("poultry", "broiler", ["0.01-0.02", "0-0.01", "0.1-0.15", "0.2-0.3", "1-2"], ["20-22%", "3000 kcal/kg", "1%", "0.45%"], None),
    ("poultry", "adult", ["0.02-0.03", "0-0.01", "0.1-0.12", "0.2-0.25", "2-3"], ["16-18%", "2700 kcal/kg", "3.5%", "0.35%"], Some([
        "Provide cool water with electrolytes and reduce stocking density during heat waves.",
        "Keep litter dry and turn it frequently to prevent coccidiosis.",
        "Use curtains on open sides and raise energy in the ration for egg production.",
    ])),
];

/// Build the default requirement table.
pub(super) fn default_requirements() -> Vec<NutritionRequirement> {
    ROWS.iter()
        .map(|(species, category, daily, composition, seasonal)| {
            let [summer, monsoon, winter] = seasonal.unwrap_or([COOL_WATER, DRY_SHED, WARM_RATION]);
            NutritionRequirement {
                species: species.to_string(),
                category: category.to_string(),
                daily: DailyRequirements {
                    green_fodder: daily[0].to_string(),
                    dry_fodder: daily[1].to_string(),
                    concentrate: daily[2].to_string(),
                    water: daily[3].to_string(),
                    mineral_mixture: daily[4].to_string(),
                },
                composition: FeedComposition {
                    crude_protein: composition[0].to_string(),
                    energy: composition[1].to_string(),
                    calcium: composition[2].to_string(),
                    phosphorus: composition[3].to_string(),
                },
                seasonal: SeasonalAdvice {
                    summer: summer.to_string(),
                    monsoon: monsoon.to_string(),
                    winter: winter.to_string(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique() {
        let rows = default_requirements();
        let keys: HashSet<(String, String)> = rows
            .iter()
            .map(|r| (r.species.clone(), r.category.clone()))
            .collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_every_species_has_adult_fallback() {
        let rows = default_requirements();
        let species: HashSet<&str> = rows.iter().map(|r| r.species.as_str()).collect();
        for s in species {
            assert!(
                rows.iter().any(|r| r.species == s && r.category == "adult"),
                "missing adult entry for {}",
                s
            );
        }
    }
}
