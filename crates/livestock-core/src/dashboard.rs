//! Farmer dashboard: derived views kept fresh by the change feed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::analytics::{Insights, Snapshot};
use crate::db::{tables, DbResult};
use crate::feed::{ChangeEvent, ChangeFeed, Subscription};
use crate::source::RecordSource;

/// Tables whose changes invalidate the dashboard.
const WATCHED_TABLES: [&str; 3] = [tables::ANIMALS, tables::VACCINATIONS, tables::HEALTH_RECORDS];

/// Alerts, disease statistics and reminders for one herd.
///
/// Change events only mark the view stale; the next
/// [`Dashboard::refresh_if_stale`] refetches and recomputes.
pub struct Dashboard {
    owner_id: Option<String>,
    horizon_days: i64,
    insights: Insights,
    stale: Arc<AtomicBool>,
    subscriptions: Vec<Subscription>,
}

impl Dashboard {
    /// Create a dashboard watching `feed`. It starts stale.
    pub fn new(feed: Arc<dyn ChangeFeed>, owner_id: Option<String>, horizon_days: i64) -> Self {
        let stale = Arc::new(AtomicBool::new(true));
        let subscriptions = WATCHED_TABLES
            .iter()
            .map(|table| {
                let flag = Arc::clone(&stale);
                Subscription::new(
                    Arc::clone(&feed),
                    table,
                    Arc::new(move |_: &ChangeEvent| flag.store(true, Ordering::SeqCst)),
                )
            })
            .collect();

        Self {
            owner_id,
            horizon_days,
            insights: Insights::default(),
            stale,
            subscriptions,
        }
    }

    /// Refetch every record set and recompute.
    ///
    /// A failed fetch is logged and treated as empty, so the other sections
    /// still render.
    pub fn refresh(&mut self, source: &dyn RecordSource, today: NaiveDate) -> &Insights {
        self.stale.store(false, Ordering::SeqCst);
        let owner = self.owner_id.as_deref();

        let snapshot = Snapshot {
            animals: or_empty("animals", source.fetch_animals(owner)),
            vaccinations: or_empty("vaccinations", source.fetch_vaccinations(owner)),
            health_records: or_empty("health_records", source.fetch_health_records(owner)),
        };
        self.insights = Insights::compute(&snapshot, today, self.horizon_days);

        tracing::debug!(
            owner = ?self.owner_id,
            alerts = self.insights.alerts.len(),
            diseases = self.insights.disease_stats.len(),
            reminders = self.insights.reminders.len(),
            "dashboard refreshed"
        );
        &self.insights
    }

    /// Refresh only if a watched table changed since the last refresh.
    /// Returns whether a refresh happened.
    pub fn refresh_if_stale(&mut self, source: &dyn RecordSource, today: NaiveDate) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.refresh(source, today);
        true
    }

    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Stop watching the change feed.
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

fn or_empty<T>(section: &str, fetched: DbResult<Vec<T>>) -> Vec<T> {
    fetched.unwrap_or_else(|e| {
        tracing::warn!(section, error = %e, "fetch failed, showing empty section");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DbError};
    use crate::feed::LocalChangeFeed;
    use crate::models::{AnimalRecord, HealthRecord, HealthStatus, VaccinationRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Source whose vaccination fetch always fails.
    struct BrokenVaccinations(Snapshot);

    impl RecordSource for BrokenVaccinations {
        fn fetch_animals(&self, owner_id: Option<&str>) -> DbResult<Vec<AnimalRecord>> {
            self.0.fetch_animals(owner_id)
        }

        fn fetch_vaccinations(&self, _: Option<&str>) -> DbResult<Vec<VaccinationRecord>> {
            Err(DbError::NotFound("vaccinations offline".into()))
        }

        fn fetch_health_records(&self, owner_id: Option<&str>) -> DbResult<Vec<HealthRecord>> {
            self.0.fetch_health_records(owner_id)
        }
    }

    #[test]
    fn test_writes_mark_dashboard_stale() {
        let feed = Arc::new(LocalChangeFeed::new());
        let db = Database::open_in_memory()
            .unwrap()
            .with_change_feed(feed.clone());
        let mut dashboard = Dashboard::new(feed.clone(), Some("f1".into()), 30);

        assert!(dashboard.refresh_if_stale(&db, today()));
        assert!(!dashboard.refresh_if_stale(&db, today()));
        assert!(dashboard.insights().alerts.is_empty());

        let animal = AnimalRecord::new("f1".into(), "Bella".into(), "cattle".into())
            .with_status(HealthStatus::Sick);
        db.insert_animal(&animal).unwrap();
        assert!(dashboard.is_stale());

        assert!(dashboard.refresh_if_stale(&db, today()));
        assert_eq!(dashboard.insights().critical_count(), 1);
    }

    #[test]
    fn test_failed_fetch_degrades_to_empty_section() {
        let animal = AnimalRecord::new("f1".into(), "Bella".into(), "cattle".into())
            .with_status(HealthStatus::Quarantine);
        let vaccination = VaccinationRecord::new(animal.id.clone(), "HS".into())
            .due_on(today() - chrono::Duration::days(1));
        let source = BrokenVaccinations(Snapshot {
            animals: vec![animal],
            vaccinations: vec![vaccination],
            health_records: vec![],
        });

        let feed = Arc::new(LocalChangeFeed::new());
        let mut dashboard = Dashboard::new(feed, None, 30);
        let insights = dashboard.refresh(&source, today());

        assert_eq!(insights.alerts.len(), 1);
        assert!(insights.reminders.is_empty());
    }

    #[test]
    fn test_dispose_unsubscribes() {
        let feed = Arc::new(LocalChangeFeed::new());
        let mut dashboard = Dashboard::new(feed.clone(), None, 30);
        assert_eq!(feed.subscriber_count(), 3);

        dashboard.dispose();
        assert_eq!(feed.subscriber_count(), 0);
    }
}
