//! Rough daily feed cost estimate.
//!
//! The per-kg multipliers are approximations carried over from the portal's
//! feeding page. They are not a costing model and should only be shown as an
//! indicative range.

use serde::{Deserialize, Serialize};

use super::DailyRequirements;

/// Cost per kg of green fodder.
pub const GREEN_FODDER_PER_KG: f64 = 2.0;
/// Cost per kg of dry fodder.
pub const DRY_FODDER_PER_KG: f64 = 1.0;
/// Cost per kg of concentrate.
pub const CONCENTRATE_PER_KG: f64 = 30.0;
/// Upper estimate as a multiple of the lower one.
pub const MAX_FACTOR: f64 = 1.5;

/// Indicative daily feed cost range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CostEstimate {
    pub min: f64,
    pub max: f64,
}

/// Estimate daily cost from the lower bound of each fodder quantity.
///
/// Returns `None` if any of the three quantities has no leading number.
pub fn estimate_from_requirements(daily: &DailyRequirements) -> Option<CostEstimate> {
    let green = first_range_token(&daily.green_fodder)?;
    let dry = first_range_token(&daily.dry_fodder)?;
    let concentrate = parse_number(&strip_non_numeric(range_head(&daily.concentrate)))?;

    let min = green * GREEN_FODDER_PER_KG + dry * DRY_FODDER_PER_KG + concentrate * CONCENTRATE_PER_KG;
    Some(CostEstimate {
        min,
        max: (min * MAX_FACTOR).ceil(),
    })
}

/// Lower bound of a free-text range: the leading number before the first `-`.
///
/// `"30-35"` → 30, `"5 kg"` → 5, `"about 3"` → `None`.
pub fn first_range_token(text: &str) -> Option<f64> {
    leading_number(range_head(text))
}

fn range_head(text: &str) -> &str {
    text.split('-').next().unwrap_or("").trim()
}

/// Parse the longest numeric prefix (digits and dots).
pub(super) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    parse_number(&text[..end])
}

fn strip_non_numeric(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(green: &str, dry: &str, concentrate: &str) -> DailyRequirements {
        DailyRequirements {
            green_fodder: green.into(),
            dry_fodder: dry.into(),
            concentrate: concentrate.into(),
            water: "10".into(),
            mineral_mixture: "10".into(),
        }
    }

    #[test]
    fn test_first_range_token() {
        assert_eq!(first_range_token("30-35"), Some(30.0));
        assert_eq!(first_range_token("0.5-1"), Some(0.5));
        assert_eq!(first_range_token("5 kg"), Some(5.0));
        assert_eq!(first_range_token("about 3"), None);
        assert_eq!(first_range_token(""), None);
    }

    #[test]
    fn test_concentrate_strips_units() {
        let estimate = estimate_from_requirements(&daily("30-35", "5-6", "3-4 kg")).unwrap();
        // 30*2 + 5*1 + 3*30
        assert_eq!(estimate.min, 155.0);
        assert_eq!(estimate.max, 233.0);

        let estimate = estimate_from_requirements(&daily("10", "2", "~1.5kg")).unwrap();
        assert_eq!(estimate.min, 67.0);
    }

    #[test]
    fn test_unparseable_quantity() {
        assert!(estimate_from_requirements(&daily("ad lib", "5-6", "3-4")).is_none());
        assert!(estimate_from_requirements(&daily("30-35", "5-6", "as needed")).is_none());
    }
}
