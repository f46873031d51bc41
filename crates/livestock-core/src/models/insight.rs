//! Derived views: alerts, disease statistics and vaccination reminders.
//!
//! None of these are persisted. They are recomputed from the underlying
//! records every time a dashboard refreshes.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of alert raised for an animal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    CriticalHealth,
    VaccinationDue,
    CheckupOverdue,
}

/// Alert priority. `Critical` sorts before `High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
}

/// A single alert on the farmer dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    /// Stable ID derived from the source record (e.g., "vaccination-<id>")
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub message: String,
    pub priority: Priority,
    /// Date the alert was derived on
    pub created_at: NaiveDate,
}

/// Direction of a diagnosis over the last 30 days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Aggregate statistics for one normalized diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseStat {
    /// Normalized (trimmed, lowercase) diagnosis
    pub diagnosis: String,
    /// Total records with this diagnosis
    pub count: usize,
    pub trend: Trend,
    /// Records within the last 30 days
    pub recent_cases: usize,
    pub species_affected: BTreeSet<String>,
}

impl DiseaseStat {
    /// Display label: first character uppercased, the rest left as is.
    pub fn label(&self) -> String {
        let mut chars = self.diagnosis.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Urgency tier of an upcoming or missed vaccination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Urgent,
    Upcoming,
}

/// A vaccination due within the reminder horizon (or already missed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationReminder {
    /// Vaccination record ID
    pub id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub vaccine_name: String,
    pub next_due_date: NaiveDate,
    /// Calendar days from today; negative when overdue
    pub days_until_due: i64,
    pub urgency: Urgency,
}

impl VaccinationReminder {
    /// Human-readable due phrase.
    pub fn due_phrase(&self) -> String {
        describe_due(self.days_until_due)
    }
}

/// "N days overdue", "Due today", "Due tomorrow" or "Due in N days".
pub fn describe_due(days_until_due: i64) -> String {
    match days_until_due {
        d if d < 0 => format!("{} days overdue", -d),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {} days", d),
    }
}
