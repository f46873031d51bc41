//! Disease trend analysis over health records.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};

use crate::models::{DiseaseStat, HealthRecord, Trend};

/// Window, in days, that counts as "recent".
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Recent share (percent) above which a diagnosis is trending up.
pub const TREND_UP_PERCENT: usize = 60;

/// Recent share (percent) below which a diagnosis is trending down.
pub const TREND_DOWN_PERCENT: usize = 30;

/// Group health records by normalized diagnosis and compute per-group stats.
///
/// Records without a diagnosis are skipped. Output is sorted by descending
/// count; groups with equal counts keep the order they were first seen in.
pub fn compute_disease_stats(health_records: &[HealthRecord], today: NaiveDate) -> Vec<DiseaseStat> {
    let cutoff = today - Duration::days(RECENT_WINDOW_DAYS);

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in health_records {
        let Some(key) = record.diagnosis_key() else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Group::new(key));
            groups.len() - 1
        });
        let group = &mut groups[slot];

        group.count += 1;
        if record.record_date >= cutoff {
            group.recent += 1;
        }
        if let Some(animal) = &record.animal {
            group.species.insert(animal.species.clone());
        }
    }

    let mut stats: Vec<DiseaseStat> = groups
        .into_iter()
        .map(|g| DiseaseStat {
            trend: classify_trend(g.recent, g.count),
            diagnosis: g.diagnosis,
            count: g.count,
            recent_cases: g.recent,
            species_affected: g.species,
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Trend from recent vs total counts.
///
/// Compares `recent / total * 100` against the thresholds using integer
/// arithmetic so that exactly 60% and exactly 30% are both `Stable`.
pub fn classify_trend(recent: usize, total: usize) -> Trend {
    if total == 0 {
        return Trend::Stable;
    }
    let scaled = recent * 100;
    if scaled > TREND_UP_PERCENT * total {
        Trend::Up
    } else if scaled < TREND_DOWN_PERCENT * total {
        Trend::Down
    } else {
        Trend::Stable
    }
}

struct Group {
    diagnosis: String,
    count: usize,
    recent: usize,
    species: BTreeSet<String>,
}

impl Group {
    fn new(diagnosis: String) -> Self {
        Self {
            diagnosis,
            count: 0,
            recent: 0,
            species: BTreeSet::new(),
        }
    }
}
