//! Vaccination urgency classifier.

use chrono::{Duration, NaiveDate};

use crate::models::{Urgency, VaccinationRecord, VaccinationReminder};

/// Default look-ahead for reminders.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// Longest look-ahead accepted from callers and configuration.
pub const MAX_HORIZON_DAYS: i64 = 3650;

/// Days-until-due at or below which a vaccination is urgent.
pub const URGENT_WITHIN_DAYS: i64 = 7;

/// Reminders for every vaccination due on or before `today + horizon_days`.
///
/// Overdue doses are always included. Sorted by ascending due date.
pub fn compute_reminders(
    vaccinations: &[VaccinationRecord],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<VaccinationReminder> {
    // A horizon past the representable date range has no upper bound.
    let horizon = Duration::try_days(horizon_days)
        .and_then(|span| today.checked_add_signed(span))
        .unwrap_or(if horizon_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });

    let mut reminders: Vec<VaccinationReminder> = vaccinations
        .iter()
        .filter_map(|v| {
            let due = v.next_due_date?;
            if due > horizon {
                return None;
            }
            let days_until_due = (due - today).num_days();
            let (animal_name, species) = match &v.animal {
                Some(a) => (a.name.clone(), a.species.clone()),
                None => ("Unknown".to_string(), "Unknown".to_string()),
            };
            Some(VaccinationReminder {
                id: v.id.clone(),
                animal_id: v.animal_id.clone(),
                animal_name,
                species,
                vaccine_name: v.vaccine_name.clone(),
                next_due_date: due,
                days_until_due,
                urgency: classify_urgency(days_until_due),
            })
        })
        .collect();

    reminders.sort_by_key(|r| r.next_due_date);
    reminders
}

/// Urgency tier for a signed day delta.
pub fn classify_urgency(days_until_due: i64) -> Urgency {
    if days_until_due < 0 {
        Urgency::Overdue
    } else if days_until_due <= URGENT_WITHIN_DAYS {
        Urgency::Urgent
    } else {
        Urgency::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
    }

    fn due_in(days: i64) -> VaccinationRecord {
        VaccinationRecord::new("a1".into(), format!("V{}", days)).due_on(today() + Duration::days(days))
    }

    #[test]
    fn test_horizon_and_urgency_tiers() {
        // Deliberately unsorted input
        let vaccinations = vec![due_in(10), due_in(40), due_in(-5), due_in(3), due_in(0)];

        let reminders = compute_reminders(&vaccinations, today(), DEFAULT_HORIZON_DAYS);

        assert_eq!(reminders.len(), 4);
        let days: Vec<i64> = reminders.iter().map(|r| r.days_until_due).collect();
        assert_eq!(days, vec![-5, 0, 3, 10]);
        let urgencies: Vec<Urgency> = reminders.iter().map(|r| r.urgency).collect();
        assert_eq!(
            urgencies,
            vec![Urgency::Overdue, Urgency::Urgent, Urgency::Urgent, Urgency::Upcoming]
        );
    }

    #[test]
    fn test_horizon_boundary_is_inclusive() {
        let reminders = compute_reminders(&[due_in(30), due_in(31)], today(), 30);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].days_until_due, 30);
    }

    #[test]
    fn test_horizon_beyond_calendar_includes_everything() {
        let vaccinations = [due_in(-3), due_in(400), due_in(100_000)];
        for horizon in [i64::from(u32::MAX), i64::MAX] {
            let reminders = compute_reminders(&vaccinations, today(), horizon);
            assert_eq!(reminders.len(), 3);
            assert_eq!(reminders[2].days_until_due, 100_000);
        }
        assert!(compute_reminders(&vaccinations, today(), i64::MIN).is_empty());
    }

    #[test]
    fn test_null_due_date_excluded() {
        let v = VaccinationRecord::new("a1".into(), "FMD".into());
        assert!(compute_reminders(&[v], today(), 30).is_empty());
    }

    #[test]
    fn test_urgency_edges() {
        assert_eq!(classify_urgency(-1), Urgency::Overdue);
        assert_eq!(classify_urgency(0), Urgency::Urgent);
        assert_eq!(classify_urgency(7), Urgency::Urgent);
        assert_eq!(classify_urgency(8), Urgency::Upcoming);
    }

    #[test]
    fn test_due_phrase() {
        let reminders = compute_reminders(&[due_in(-3), due_in(1)], today(), 30);
        assert_eq!(reminders[0].due_phrase(), "3 days overdue");
        assert_eq!(reminders[1].due_phrase(), "Due tomorrow");
    }
}
