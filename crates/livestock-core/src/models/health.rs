//! Vaccination and health record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AnimalSummary;

/// A vaccination dose, with the next scheduled dose if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationRecord {
    /// Unique record ID
    pub id: String,
    /// Animal the dose was given to
    pub animal_id: String,
    /// Vaccine name (e.g., "FMD", "HS-BQ")
    pub vaccine_name: String,
    /// Date this dose was given
    pub date_administered: Option<NaiveDate>,
    /// Next scheduled dose; `None` means no follow-up is planned
    pub next_due_date: Option<NaiveDate>,
    /// Joined animal columns, when the fetch included them
    pub animal: Option<AnimalSummary>,
}

impl VaccinationRecord {
    /// Create a new vaccination record.
    pub fn new(animal_id: String, vaccine_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id,
            vaccine_name,
            date_administered: None,
            next_due_date: None,
            animal: None,
        }
    }

    /// Builder-style due date.
    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.next_due_date = Some(date);
        self
    }
}

/// A health event (checkup, diagnosis, treatment) for an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    /// Unique record ID
    pub id: String,
    /// Animal the record belongs to
    pub animal_id: String,
    /// Kind of record (e.g., "checkup", "treatment")
    pub record_type: Option<String>,
    /// Free-text diagnosis as entered
    pub diagnosis: Option<String>,
    /// Free-text treatment notes
    pub treatment: Option<String>,
    /// Date of the event
    pub record_date: NaiveDate,
    /// Next checkup, if scheduled
    pub next_checkup_date: Option<NaiveDate>,
    /// Joined animal columns, when the fetch included them
    pub animal: Option<AnimalSummary>,
}

impl HealthRecord {
    /// Create a new health record dated `record_date`.
    pub fn new(animal_id: String, record_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id,
            record_type: None,
            diagnosis: None,
            treatment: None,
            record_date,
            next_checkup_date: None,
            animal: None,
        }
    }

    /// Builder-style diagnosis.
    pub fn with_diagnosis(mut self, diagnosis: &str) -> Self {
        self.diagnosis = Some(diagnosis.to_string());
        self
    }

    /// Grouping key for the diagnosis: trimmed and lowercased.
    ///
    /// Blank diagnoses are treated the same as missing ones.
    pub fn diagnosis_key(&self) -> Option<String> {
        let key = self.diagnosis.as_deref()?.trim().to_lowercase();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}
