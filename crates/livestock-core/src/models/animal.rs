//! Animal models.

use serde::{Deserialize, Serialize};

use super::timestamp_now;

/// Health status of an animal as recorded by the farmer or a vet.
///
/// Unknown values are preserved verbatim so that new statuses added on the
/// portal side never fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    Healthy,
    Sick,
    UnderTreatment,
    Quarantine,
    Other(String),
}

impl HealthStatus {
    /// Storage/wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Sick => "sick",
            HealthStatus::UnderTreatment => "under_treatment",
            HealthStatus::Quarantine => "quarantine",
            HealthStatus::Other(s) => s,
        }
    }

    /// Whether this status should raise a health alert.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            HealthStatus::Sick | HealthStatus::UnderTreatment | HealthStatus::Quarantine
        )
    }

    /// Short phrase used in alert messages ("is sick", "is under treatment").
    pub fn describe(&self) -> String {
        match self {
            HealthStatus::Healthy => "is healthy".into(),
            HealthStatus::Sick => "is sick".into(),
            HealthStatus::UnderTreatment => "is under treatment".into(),
            HealthStatus::Quarantine => "is in quarantine".into(),
            HealthStatus::Other(s) => format!("has status '{}'", s),
        }
    }
}

impl From<&str> for HealthStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "healthy" => HealthStatus::Healthy,
            "sick" => HealthStatus::Sick,
            "under_treatment" => HealthStatus::UnderTreatment,
            "quarantine" => HealthStatus::Quarantine,
            _ => HealthStatus::Other(value.to_string()),
        }
    }
}

impl From<String> for HealthStatus {
    fn from(value: String) -> Self {
        HealthStatus::from(value.as_str())
    }
}

impl From<HealthStatus> for String {
    fn from(status: HealthStatus) -> Self {
        status.as_str().to_string()
    }
}

/// An animal owned by a farmer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalRecord {
    /// Unique animal ID
    pub id: String,
    /// Farmer account that owns the animal
    pub owner_id: String,
    /// Display name or tag
    pub name: String,
    /// Species (e.g., "cattle", "goat", "buffalo")
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Current health status
    pub health_status: HealthStatus,
    /// Creation timestamp
    pub created_at: String,
}

impl AnimalRecord {
    /// Create a new healthy animal.
    pub fn new(owner_id: String, name: String, species: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            name,
            species,
            breed: None,
            health_status: HealthStatus::Healthy,
            created_at: timestamp_now(),
        }
    }

    /// Builder-style status override.
    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.health_status = status;
        self
    }

    /// Name/species pair carried on joined vaccination and health rows.
    pub fn summary(&self) -> AnimalSummary {
        AnimalSummary {
            name: self.name.clone(),
            species: self.species.clone(),
        }
    }
}

/// Joined animal columns attached to vaccination and health rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimalSummary {
    pub name: String,
    pub species: String,
}
