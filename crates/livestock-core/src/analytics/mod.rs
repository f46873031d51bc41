//! Derivation routines over record snapshots.
//!
//! Pipeline: Record fetch → Snapshot → {alerts, disease stats, reminders}
//!
//! Everything here is pure: same snapshot and date in, same output out.

mod alerts;
mod disease;
mod vaccination;

pub use alerts::*;
pub use disease::*;
pub use vaccination::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    Alert, AnimalRecord, DiseaseStat, HealthRecord, VaccinationRecord, VaccinationReminder,
};

/// Records fetched for one dashboard refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub animals: Vec<AnimalRecord>,
    pub vaccinations: Vec<VaccinationRecord>,
    pub health_records: Vec<HealthRecord>,
}

/// All derived views for a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub alerts: Vec<Alert>,
    pub disease_stats: Vec<DiseaseStat>,
    pub reminders: Vec<VaccinationReminder>,
}

impl Insights {
    /// Run every classifier over the snapshot.
    pub fn compute(snapshot: &Snapshot, today: NaiveDate, horizon_days: i64) -> Self {
        Self {
            alerts: compute_alerts(
                &snapshot.animals,
                &snapshot.vaccinations,
                &snapshot.health_records,
                today,
            ),
            disease_stats: compute_disease_stats(&snapshot.health_records, today),
            reminders: compute_reminders(&snapshot.vaccinations, today, horizon_days),
        }
    }

    /// Number of alerts at critical priority.
    pub fn critical_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.priority == crate::models::Priority::Critical)
            .count()
    }
}
