//! Livestock Portal Core Library
//!
//! Derivation logic behind the farmer dashboards: health alerts, disease
//! trends, vaccination reminders and nutrition guidance.
//!
//! # Architecture
//!
//! ```text
//! animals / vaccinations / health_records (SQLite)
//!                  │
//!                  │  writes ──► ChangeFeed ──► Dashboard marked stale
//!                  ▼
//!              Snapshot
//!                  │
//!     ┌────────────┼────────────────┐
//!     ▼            ▼                ▼
//!  Alerts    Disease stats   Vaccination reminders
//!
//! NutritionGuide (static table) ──► lookup / seasonal advice / cost estimate
//! DemoDataSource ──► regional disease alerts, weather, sample notifications
//! ```
//!
//! # Core Principle
//!
//! **Derived views are never stored.** They are recomputed from the records
//! on every refresh, and recomputing the same snapshot on the same day gives
//! the same result.
//!
//! # Modules
//!
//! - [`db`]: SQLite store for herd, marketplace and admin records
//! - [`models`]: Domain types (AnimalRecord, VaccinationRecord, Alert, etc.)
//! - [`analytics`]: Alert, disease trend and vaccination urgency classifiers
//! - [`nutrition`]: Feeding guidelines and cost estimate
//! - [`dashboard`]: Change-driven dashboard view
//! - [`demo`]: Placeholder regional feeds

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod demo;
pub mod feed;
pub mod models;
pub mod nutrition;
pub mod source;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use analytics::{Insights, Snapshot};
pub use config::PortalConfig;
pub use dashboard::Dashboard;
pub use db::Database;
pub use feed::{ChangeFeed, LocalChangeFeed};
pub use models::{
    Alert, AlertKind, AnimalRecord, DiseaseStat, HealthRecord, HealthStatus, Priority, Trend,
    Urgency, VaccinationRecord, VaccinationReminder,
};
pub use nutrition::NutritionGuide;
pub use source::RecordSource;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use demo::{Coordinates, DemoDataSource, DiseaseAlert, FarmDataSource, WeatherReport};
use nutrition::{CostEstimate, NutritionRequirement};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LivestockError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Feed error: {0}")]
    FeedError(String),
}

impl From<db::DbError> for LivestockError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Validation(v) => LivestockError::InvalidInput(v.to_string()),
            db::DbError::NotFound(what) => LivestockError::NotFound(what),
            other => LivestockError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for LivestockError {
    fn from(e: serde_json::Error) -> Self {
        LivestockError::SerializationError(e.to_string())
    }
}

impl From<demo::FeedError> for LivestockError {
    fn from(e: demo::FeedError) -> Self {
        match e {
            demo::FeedError::InvalidCoordinates(..) => LivestockError::InvalidInput(e.to_string()),
            demo::FeedError::Unavailable(_) => LivestockError::FeedError(e.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for LivestockError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        LivestockError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, LivestockError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        LivestockError::InvalidInput(format!("{}: expected YYYY-MM-DD, got '{}' ({})", field, value, e))
    })
}

fn parse_optional_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, LivestockError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(field, &v))
        .transpose()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<LivestockCore>, LivestockError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(LivestockCore::new(db, None, analytics::DEFAULT_HORIZON_DAYS)))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<LivestockCore>, LivestockError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(LivestockCore::new(db, None, analytics::DEFAULT_HORIZON_DAYS)))
}

/// Open the database named in a config file (plus `LIVESTOCK_*` overrides).
#[uniffi::export]
pub fn open_with_config(config_path: Option<String>) -> Result<Arc<LivestockCore>, LivestockError> {
    let config = PortalConfig::load(config_path.as_deref().map(std::path::Path::new))
        .map_err(|e| LivestockError::InvalidInput(e.to_string()))?;
    let db = Database::open(&config.database_path)?;
    Ok(Arc::new(LivestockCore::new(
        db,
        config.demo_seed,
        config.reminder_horizon_days,
    )))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe facade for host apps.
#[derive(uniffi::Object)]
pub struct LivestockCore {
    db: Arc<Mutex<Database>>,
    nutrition: NutritionGuide,
    demo: Mutex<Box<dyn FarmDataSource + Send>>,
    /// Look-ahead used by `insights_json`
    horizon_days: i64,
}

impl LivestockCore {
    fn new(db: Database, demo_seed: Option<u64>, horizon_days: i64) -> Self {
        Self {
            horizon_days,
            db: Arc::new(Mutex::new(db)),
            nutrition: NutritionGuide::new(),
            demo: Mutex::new(Box::new(DemoDataSource::from_optional_seed(demo_seed))),
        }
    }

    fn snapshot(&self, owner_id: Option<&str>) -> Result<Snapshot, LivestockError> {
        let db = self.db.lock()?;
        Ok(Snapshot::fetch(&*db, owner_id)?)
    }
}

#[uniffi::export]
impl LivestockCore {
    // =========================================================================
    // Herd Operations
    // =========================================================================

    /// Register a new animal.
    pub fn create_animal(
        &self,
        owner_id: String,
        name: String,
        species: String,
        breed: Option<String>,
    ) -> Result<FfiAnimal, LivestockError> {
        let db = self.db.lock()?;
        let mut animal = AnimalRecord::new(owner_id, name, species);
        animal.breed = breed;
        db.insert_animal(&animal)?;
        Ok(animal.into())
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: String) -> Result<Option<FfiAnimal>, LivestockError> {
        let db = self.db.lock()?;
        Ok(db.get_animal(&id)?.map(Into::into))
    }

    /// List animals, optionally for one owner.
    pub fn list_animals(&self, owner_id: Option<String>) -> Result<Vec<FfiAnimal>, LivestockError> {
        let db = self.db.lock()?;
        let animals = db.list_animals(owner_id.as_deref())?;
        Ok(animals.into_iter().map(Into::into).collect())
    }

    /// Change an animal's health status. Unknown statuses are stored as given.
    pub fn set_health_status(&self, animal_id: String, status: String) -> Result<(), LivestockError> {
        let db = self.db.lock()?;
        if !db.set_health_status(&animal_id, &HealthStatus::from(status))? {
            return Err(LivestockError::NotFound(format!("animal {}", animal_id)));
        }
        Ok(())
    }

    /// Record a vaccination. Dates are `YYYY-MM-DD`. Returns the record ID.
    pub fn record_vaccination(
        &self,
        animal_id: String,
        vaccine_name: String,
        date_administered: Option<String>,
        next_due_date: Option<String>,
    ) -> Result<String, LivestockError> {
        let mut record = VaccinationRecord::new(animal_id, vaccine_name);
        record.date_administered = parse_optional_date("date_administered", date_administered)?;
        record.next_due_date = parse_optional_date("next_due_date", next_due_date)?;

        let db = self.db.lock()?;
        db.insert_vaccination(&record)?;
        Ok(record.id)
    }

    /// Record a health check or treatment. Returns the record ID.
    pub fn record_health(
        &self,
        animal_id: String,
        record_date: String,
        diagnosis: Option<String>,
        treatment: Option<String>,
        next_checkup_date: Option<String>,
    ) -> Result<String, LivestockError> {
        let mut record = HealthRecord::new(animal_id, parse_date("record_date", &record_date)?);
        record.diagnosis = diagnosis;
        record.treatment = treatment;
        record.next_checkup_date = parse_optional_date("next_checkup_date", next_checkup_date)?;

        let db = self.db.lock()?;
        db.insert_health_record(&record)?;
        Ok(record.id)
    }

    // =========================================================================
    // Dashboard Operations
    // =========================================================================

    /// Health alerts as of `today`, critical first.
    pub fn alerts(&self, owner_id: Option<String>, today: String) -> Result<Vec<FfiAlert>, LivestockError> {
        let today = parse_date("today", &today)?;
        let snapshot = self.snapshot(owner_id.as_deref())?;
        let alerts = analytics::compute_alerts(
            &snapshot.animals,
            &snapshot.vaccinations,
            &snapshot.health_records,
            today,
        );
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    /// Diagnosis statistics, most frequent first.
    pub fn disease_stats(
        &self,
        owner_id: Option<String>,
        today: String,
    ) -> Result<Vec<FfiDiseaseStat>, LivestockError> {
        let today = parse_date("today", &today)?;
        let snapshot = self.snapshot(owner_id.as_deref())?;
        let stats = analytics::compute_disease_stats(&snapshot.health_records, today);
        Ok(stats.into_iter().map(Into::into).collect())
    }

    /// Vaccinations due within `horizon_days` (or overdue), soonest first.
    pub fn vaccination_reminders(
        &self,
        owner_id: Option<String>,
        today: String,
        horizon_days: u32,
    ) -> Result<Vec<FfiVaccinationReminder>, LivestockError> {
        let today = parse_date("today", &today)?;
        if i64::from(horizon_days) > analytics::MAX_HORIZON_DAYS {
            return Err(LivestockError::InvalidInput(format!(
                "horizon_days must be at most {}, got {}",
                analytics::MAX_HORIZON_DAYS,
                horizon_days
            )));
        }
        let snapshot = self.snapshot(owner_id.as_deref())?;
        let reminders =
            analytics::compute_reminders(&snapshot.vaccinations, today, i64::from(horizon_days));
        Ok(reminders.into_iter().map(Into::into).collect())
    }

    /// Every dashboard view as one JSON document, using the configured
    /// reminder horizon.
    pub fn insights_json(&self, owner_id: Option<String>, today: String) -> Result<String, LivestockError> {
        let today = parse_date("today", &today)?;
        let snapshot = self.snapshot(owner_id.as_deref())?;
        let insights = Insights::compute(&snapshot, today, self.horizon_days);
        Ok(serde_json::to_string(&insights)?)
    }

    // =========================================================================
    // Nutrition Operations
    // =========================================================================

    /// Feeding guideline, falling back to the species' adult entry.
    pub fn nutrition_requirement(&self, species: String, category: String) -> Option<FfiNutritionRequirement> {
        self.nutrition
            .lookup(&species, &category)
            .cloned()
            .map(Into::into)
    }

    /// Indicative daily feed cost.
    pub fn estimate_daily_cost(&self, species: String, category: String) -> Option<FfiCostEstimate> {
        self.nutrition
            .estimate_daily_cost(&species, &category)
            .map(Into::into)
    }

    /// Seasonal feeding advice for a month (1-12).
    pub fn seasonal_advice(&self, species: String, category: String, month: u32) -> Option<String> {
        self.nutrition
            .seasonal_advice(&species, &category, month)
            .map(str::to_string)
    }

    pub fn nutrition_species(&self) -> Vec<String> {
        self.nutrition.species()
    }

    pub fn nutrition_categories(&self, species: String) -> Vec<String> {
        self.nutrition.categories(&species)
    }

    // =========================================================================
    // Regional Feeds
    // =========================================================================

    /// Regional disease alerts, most severe first.
    pub fn regional_disease_alerts(&self, count: u32) -> Result<Vec<FfiDiseaseAlert>, LivestockError> {
        let mut demo = self.demo.lock()?;
        let alerts = demo.disease_alerts(count as usize)?;
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    /// Weather at a location.
    pub fn weather(&self, latitude: f64, longitude: f64) -> Result<FfiWeatherReport, LivestockError> {
        let at = Coordinates::new(latitude, longitude)?;
        let mut demo = self.demo.lock()?;
        Ok(demo.weather(at)?.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe animal.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub health_status: String,
    pub created_at: String,
}

impl From<AnimalRecord> for FfiAnimal {
    fn from(animal: AnimalRecord) -> Self {
        Self {
            health_status: animal.health_status.as_str().to_string(),
            id: animal.id,
            owner_id: animal.owner_id,
            name: animal.name,
            species: animal.species,
            breed: animal.breed,
            created_at: animal.created_at,
        }
    }
}

/// FFI-safe alert. Enum fields use their snake_case names.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAlert {
    pub id: String,
    pub kind: String,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub message: String,
    pub priority: String,
    pub created_at: String,
}

impl From<Alert> for FfiAlert {
    fn from(alert: Alert) -> Self {
        Self {
            id: alert.id,
            kind: enum_name(&alert.kind),
            animal_id: alert.animal_id,
            animal_name: alert.animal_name,
            species: alert.species,
            message: alert.message,
            priority: enum_name(&alert.priority),
            created_at: alert.created_at.to_string(),
        }
    }
}

/// FFI-safe disease statistic.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiseaseStat {
    pub diagnosis: String,
    pub label: String,
    pub count: u32,
    pub trend: String,
    pub recent_cases: u32,
    pub species_affected: Vec<String>,
}

impl From<DiseaseStat> for FfiDiseaseStat {
    fn from(stat: DiseaseStat) -> Self {
        Self {
            label: stat.label(),
            count: stat.count as u32,
            trend: enum_name(&stat.trend),
            recent_cases: stat.recent_cases as u32,
            species_affected: stat.species_affected.into_iter().collect(),
            diagnosis: stat.diagnosis,
        }
    }
}

/// FFI-safe vaccination reminder.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccinationReminder {
    pub id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub vaccine_name: String,
    pub next_due_date: String,
    pub days_until_due: i64,
    pub urgency: String,
    pub due_phrase: String,
}

impl From<VaccinationReminder> for FfiVaccinationReminder {
    fn from(reminder: VaccinationReminder) -> Self {
        Self {
            due_phrase: reminder.due_phrase(),
            urgency: enum_name(&reminder.urgency),
            next_due_date: reminder.next_due_date.to_string(),
            id: reminder.id,
            animal_id: reminder.animal_id,
            animal_name: reminder.animal_name,
            species: reminder.species,
            vaccine_name: reminder.vaccine_name,
            days_until_due: reminder.days_until_due,
        }
    }
}

/// FFI-safe feeding guideline (flattened).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNutritionRequirement {
    pub species: String,
    pub category: String,
    pub green_fodder: String,
    pub dry_fodder: String,
    pub concentrate: String,
    pub water: String,
    pub mineral_mixture: String,
    pub crude_protein: String,
    pub energy: String,
    pub calcium: String,
    pub phosphorus: String,
    pub summer_advice: String,
    pub monsoon_advice: String,
    pub winter_advice: String,
}

impl From<NutritionRequirement> for FfiNutritionRequirement {
    fn from(r: NutritionRequirement) -> Self {
        Self {
            species: r.species,
            category: r.category,
            green_fodder: r.daily.green_fodder,
            dry_fodder: r.daily.dry_fodder,
            concentrate: r.daily.concentrate,
            water: r.daily.water,
            mineral_mixture: r.daily.mineral_mixture,
            crude_protein: r.composition.crude_protein,
            energy: r.composition.energy,
            calcium: r.composition.calcium,
            phosphorus: r.composition.phosphorus,
            summer_advice: r.seasonal.summer,
            monsoon_advice: r.seasonal.monsoon,
            winter_advice: r.seasonal.winter,
        }
    }
}

/// FFI-safe cost estimate.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCostEstimate {
    pub min: f64,
    pub max: f64,
}

impl From<CostEstimate> for FfiCostEstimate {
    fn from(c: CostEstimate) -> Self {
        Self { min: c.min, max: c.max }
    }
}

/// FFI-safe regional disease alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiseaseAlert {
    pub id: String,
    pub disease: String,
    pub species: String,
    pub location: String,
    pub severity: String,
    pub cases_reported: u32,
    pub prediction: String,
    pub reported_days_ago: u32,
}

impl From<DiseaseAlert> for FfiDiseaseAlert {
    fn from(a: DiseaseAlert) -> Self {
        Self {
            severity: enum_name(&a.severity),
            id: a.id,
            disease: a.disease,
            species: a.species,
            location: a.location,
            cases_reported: a.cases_reported,
            prediction: a.prediction,
            reported_days_ago: a.reported_days_ago,
        }
    }
}

/// FFI-safe weather report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWeatherReport {
    pub latitude: f64,
    pub longitude: f64,
    pub condition: String,
    pub temperature_c: i32,
    pub humidity_percent: u32,
    pub alert: Option<String>,
}

impl From<WeatherReport> for FfiWeatherReport {
    fn from(w: WeatherReport) -> Self {
        Self {
            latitude: w.location.latitude,
            longitude: w.location.longitude,
            condition: w.condition,
            temperature_c: w.temperature_c,
            humidity_percent: w.humidity_percent,
            alert: w.alert,
        }
    }
}

/// Serialized name of a unit enum variant (e.g., "critical_health").
fn enum_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_end_to_end() {
        let core = open_database_in_memory().unwrap();
        let goat = core
            .create_animal("f1".into(), "A1".into(), "goat".into(), None)
            .unwrap();
        core.set_health_status(goat.id.clone(), "sick".into()).unwrap();
        core.record_vaccination(goat.id.clone(), "PPR".into(), None, Some("2024-06-10".into()))
            .unwrap();

        let alerts = core.alerts(Some("f1".into()), "2024-06-15".into()).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, "critical_health");
        assert_eq!(alerts[1].kind, "vaccination_due");
        assert_eq!(alerts[1].priority, "critical");

        let reminders = core
            .vaccination_reminders(Some("f1".into()), "2024-06-15".into(), 30)
            .unwrap();
        assert_eq!(reminders[0].urgency, "overdue");
        assert_eq!(reminders[0].due_phrase, "5 days overdue");
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let core = open_database_in_memory().unwrap();
        let result = core.vaccination_reminders(None, "2024-06-15".into(), u32::MAX);
        assert!(matches!(result, Err(LivestockError::InvalidInput(_))));

        let max = analytics::MAX_HORIZON_DAYS as u32;
        assert!(core.vaccination_reminders(None, "2024-06-15".into(), max).is_ok());
    }

    #[test]
    fn test_configured_horizon_drives_insights() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("portal.toml");
        std::fs::write(
            &config_path,
            format!(
                "database_path = {:?}\nreminder_horizon_days = 5\n",
                dir.path().join("portal.db").to_string_lossy()
            ),
        )
        .unwrap();

        let core = open_with_config(Some(config_path.to_string_lossy().to_string())).unwrap();
        let goat = core
            .create_animal("f1".into(), "A1".into(), "goat".into(), None)
            .unwrap();
        core.record_vaccination(goat.id.clone(), "PPR".into(), None, Some("2024-06-25".into()))
            .unwrap();
        core.record_vaccination(goat.id, "ET".into(), None, Some("2024-06-18".into()))
            .unwrap();

        let json = core.insights_json(None, "2024-06-15".into()).unwrap();
        let insights: Insights = serde_json::from_str(&json).unwrap();
        assert_eq!(insights.reminders.len(), 1);
        assert_eq!(insights.reminders[0].vaccine_name, "ET");
    }

    #[test]
    fn test_bad_date_is_invalid_input() {
        let core = open_database_in_memory().unwrap();
        let result = core.alerts(None, "15/06/2024".into());
        assert!(matches!(result, Err(LivestockError::InvalidInput(_))));
    }

    #[test]
    fn test_validation_maps_to_invalid_input() {
        let core = open_database_in_memory().unwrap();
        let result = core.create_animal("f1".into(), "".into(), "goat".into(), None);
        assert!(matches!(result, Err(LivestockError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_animal_status_update() {
        let core = open_database_in_memory().unwrap();
        let result = core.set_health_status("missing".into(), "sick".into());
        assert!(matches!(result, Err(LivestockError::NotFound(_))));
    }

    #[test]
    fn test_nutrition_facade() {
        let core = open_database_in_memory().unwrap();
        let cost = core
            .estimate_daily_cost("cattle".into(), "lactating".into())
            .unwrap();
        assert_eq!((cost.min, cost.max), (155.0, 233.0));

        let fallback = core
            .nutrition_requirement("goat".into(), "unknown".into())
            .unwrap();
        assert_eq!(fallback.category, "adult");
        assert!(core.nutrition_requirement("yak".into(), "adult".into()).is_none());
    }

    #[test]
    fn test_weather_rejects_bad_coordinates() {
        let core = open_database_in_memory().unwrap();
        assert!(matches!(
            core.weather(120.0, 0.0),
            Err(LivestockError::InvalidInput(_))
        ));
        assert!(core.weather(18.5, 73.8).is_ok());
    }
}
