//! Property tests for the classifiers.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use livestock_core::analytics::{
    classify_trend, classify_urgency, compute_alerts, compute_disease_stats, compute_reminders,
};
use livestock_core::models::{
    AlertKind, AnimalRecord, HealthRecord, HealthStatus, Priority, Trend, Urgency,
    VaccinationRecord,
};
use livestock_core::NutritionGuide;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn status() -> impl Strategy<Value = HealthStatus> {
    prop_oneof![
        Just(HealthStatus::Healthy),
        Just(HealthStatus::Sick),
        Just(HealthStatus::UnderTreatment),
        Just(HealthStatus::Quarantine),
        "[a-z]{3,8}".prop_map(HealthStatus::from),
    ]
}

fn herd(statuses: Vec<HealthStatus>) -> Vec<AnimalRecord> {
    statuses
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            AnimalRecord::new("f1".into(), format!("animal{}", i), "cattle".into()).with_status(s)
        })
        .collect()
}

proptest! {
    #[test]
    fn at_most_one_health_alert_per_animal(statuses in prop::collection::vec(status(), 0..20)) {
        let animals = herd(statuses);
        let alerts = compute_alerts(&animals, &[], &[], today());

        for animal in &animals {
            let mine: Vec<_> = alerts
                .iter()
                .filter(|a| a.animal_id == animal.id && a.kind == AlertKind::CriticalHealth)
                .collect();
            let expected = match animal.health_status {
                HealthStatus::Sick => Some(Priority::Critical),
                HealthStatus::UnderTreatment | HealthStatus::Quarantine => Some(Priority::High),
                _ => None,
            };
            prop_assert_eq!(mine.first().map(|a| a.priority), expected);
            prop_assert!(mine.len() <= 1);
        }
    }

    #[test]
    fn critical_alerts_come_first(
        statuses in prop::collection::vec(status(), 0..10),
        due_offsets in prop::collection::vec(-60i64..60, 0..10),
        checkup_offsets in prop::collection::vec(-60i64..60, 0..10),
    ) {
        let animals = herd(statuses);
        let vaccinations: Vec<VaccinationRecord> = due_offsets
            .iter()
            .map(|d| VaccinationRecord::new("a".into(), "FMD".into()).due_on(today() + Duration::days(*d)))
            .collect();
        let records: Vec<HealthRecord> = checkup_offsets
            .iter()
            .map(|d| {
                let mut r = HealthRecord::new("a".into(), today() - Duration::days(90));
                r.next_checkup_date = Some(today() + Duration::days(*d));
                r
            })
            .collect();

        let alerts = compute_alerts(&animals, &vaccinations, &records, today());
        let priorities: Vec<Priority> = alerts.iter().map(|a| a.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        prop_assert_eq!(priorities, sorted);

        let overdue = due_offsets.iter().filter(|d| **d < 0).count();
        let vaccination_alerts = alerts.iter().filter(|a| a.kind == AlertKind::VaccinationDue).count();
        prop_assert_eq!(vaccination_alerts, overdue);
    }

    #[test]
    fn reminders_sorted_and_within_horizon(
        offsets in prop::collection::vec(-100i64..100, 0..30),
        horizon in 0i64..60,
    ) {
        let vaccinations: Vec<VaccinationRecord> = offsets
            .iter()
            .map(|d| VaccinationRecord::new("a".into(), "HS".into()).due_on(today() + Duration::days(*d)))
            .collect();
        let reminders = compute_reminders(&vaccinations, today(), horizon);

        prop_assert_eq!(reminders.len(), offsets.iter().filter(|d| **d <= horizon).count());
        for pair in reminders.windows(2) {
            prop_assert!(pair[0].next_due_date <= pair[1].next_due_date);
        }
        for r in &reminders {
            prop_assert_eq!(r.urgency, classify_urgency(r.days_until_due));
            prop_assert_eq!(r.urgency == Urgency::Overdue, r.days_until_due < 0);
        }
    }

    #[test]
    fn disease_counts_add_up(diagnoses in prop::collection::vec("(Bloat|bloat |BLOAT|pox|Pox| )", 0..30)) {
        let records: Vec<HealthRecord> = diagnoses
            .iter()
            .map(|d| HealthRecord::new("a".into(), today()).with_diagnosis(d))
            .collect();
        let stats = compute_disease_stats(&records, today());

        let with_diagnosis = diagnoses.iter().filter(|d| !d.trim().is_empty()).count();
        prop_assert_eq!(stats.iter().map(|s| s.count).sum::<usize>(), with_diagnosis);
        prop_assert!(stats.len() <= 2);
        for pair in stats.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn trend_thresholds(total in 1usize..200, recent_fraction in 0.0f64..=1.0) {
        let recent = ((total as f64) * recent_fraction).floor() as usize;
        let trend = classify_trend(recent, total);
        let pct = recent as f64 / total as f64 * 100.0;
        if recent * 100 > 60 * total {
            prop_assert_eq!(trend, Trend::Up);
            prop_assert!(pct > 60.0);
        } else if recent * 100 < 30 * total {
            prop_assert_eq!(trend, Trend::Down);
        } else {
            prop_assert_eq!(trend, Trend::Stable);
        }
    }

    #[test]
    fn cost_estimate_is_deterministic(species in "(cattle|buffalo|goat|sheep)", category in "(adult|lactating|calf|kid)") {
        let guide = NutritionGuide::new();
        let first = guide.estimate_daily_cost(&species, &category);
        let second = guide.estimate_daily_cost(&species, &category);
        prop_assert_eq!(first, second);
        if let Some(cost) = first {
            prop_assert!(cost.max >= cost.min);
        }
    }
}
