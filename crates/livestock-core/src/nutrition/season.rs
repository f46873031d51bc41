//! Feeding seasons.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Season used to pick a feeding advisory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Monsoon,
    Winter,
}

impl Season {
    /// March–May summer, June–September monsoon, everything else winter.
    pub fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::Winter,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.month())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::Winter => "winter",
        }
    }
}
