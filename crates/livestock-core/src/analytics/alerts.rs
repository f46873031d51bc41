//! Alert classifier.
//!
//! Merges three independent sources into one list:
//! - animals whose health status needs attention
//! - vaccinations whose next dose is already past due
//! - health records whose next checkup is already past due

use chrono::NaiveDate;

use crate::models::{
    Alert, AlertKind, AnimalRecord, AnimalSummary, HealthRecord, HealthStatus, Priority,
    VaccinationRecord,
};

/// Name/species shown when a record arrives without its joined animal.
const UNKNOWN: &str = "Unknown";

/// Compute the unified alert list for a snapshot of records.
///
/// Critical alerts come first; within a priority the input order is kept.
pub fn compute_alerts(
    animals: &[AnimalRecord],
    vaccinations: &[VaccinationRecord],
    health_records: &[HealthRecord],
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for animal in animals {
        if !animal.health_status.needs_attention() {
            continue;
        }
        let priority = if animal.health_status == HealthStatus::Sick {
            Priority::Critical
        } else {
            Priority::High
        };
        alerts.push(Alert {
            id: format!("critical-{}", animal.id),
            kind: AlertKind::CriticalHealth,
            animal_id: animal.id.clone(),
            animal_name: animal.name.clone(),
            species: animal.species.clone(),
            message: format!("{} {}", animal.name, animal.health_status.describe()),
            priority,
            created_at: today,
        });
    }

    for vaccination in vaccinations {
        let Some(due) = vaccination.next_due_date else {
            continue;
        };
        if due >= today {
            continue;
        }
        let (animal_name, species) = joined(vaccination.animal.as_ref());
        // Every missed vaccination is surfaced as critical, however recent.
        alerts.push(Alert {
            id: format!("vaccination-{}", vaccination.id),
            kind: AlertKind::VaccinationDue,
            animal_id: vaccination.animal_id.clone(),
            animal_name,
            species,
            message: format!(
                "{} vaccination overdue since {}",
                vaccination.vaccine_name, due
            ),
            priority: Priority::Critical,
            created_at: today,
        });
    }

    for record in health_records {
        let Some(checkup) = record.next_checkup_date else {
            continue;
        };
        if checkup >= today {
            continue;
        }
        let (animal_name, species) = joined(record.animal.as_ref());
        alerts.push(Alert {
            id: format!("checkup-{}", record.id),
            kind: AlertKind::CheckupOverdue,
            animal_id: record.animal_id.clone(),
            animal_name,
            species,
            message: format!("Health checkup overdue since {}", checkup),
            priority: Priority::High,
            created_at: today,
        });
    }

    // Stable sort keeps input order within a priority.
    alerts.sort_by_key(|alert| alert.priority);
    alerts
}

fn joined(animal: Option<&AnimalSummary>) -> (String, String) {
    match animal {
        Some(a) => (a.name.clone(), a.species.clone()),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}
