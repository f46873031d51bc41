//! Where dashboard records come from.

use std::collections::HashSet;

use crate::analytics::Snapshot;
use crate::db::{Database, DbResult};
use crate::models::{AnimalRecord, HealthRecord, VaccinationRecord};

/// Record fetches backing a dashboard refresh.
///
/// `owner_id` restricts results to one farmer's herd; `None` means all.
pub trait RecordSource {
    fn fetch_animals(&self, owner_id: Option<&str>) -> DbResult<Vec<AnimalRecord>>;
    fn fetch_vaccinations(&self, owner_id: Option<&str>) -> DbResult<Vec<VaccinationRecord>>;
    fn fetch_health_records(&self, owner_id: Option<&str>) -> DbResult<Vec<HealthRecord>>;
}

impl RecordSource for Database {
    fn fetch_animals(&self, owner_id: Option<&str>) -> DbResult<Vec<AnimalRecord>> {
        self.list_animals(owner_id)
    }

    fn fetch_vaccinations(&self, owner_id: Option<&str>) -> DbResult<Vec<VaccinationRecord>> {
        self.list_vaccinations(owner_id)
    }

    fn fetch_health_records(&self, owner_id: Option<&str>) -> DbResult<Vec<HealthRecord>> {
        self.list_health_records(owner_id)
    }
}

/// An in-memory snapshot can stand in for the store.
impl RecordSource for Snapshot {
    fn fetch_animals(&self, owner_id: Option<&str>) -> DbResult<Vec<AnimalRecord>> {
        Ok(self
            .animals
            .iter()
            .filter(|a| owner_id.map_or(true, |o| a.owner_id == o))
            .cloned()
            .collect())
    }

    fn fetch_vaccinations(&self, owner_id: Option<&str>) -> DbResult<Vec<VaccinationRecord>> {
        let owned = self.owned_ids(owner_id);
        Ok(self
            .vaccinations
            .iter()
            .filter(|v| owned.as_ref().map_or(true, |ids| ids.contains(v.animal_id.as_str())))
            .cloned()
            .collect())
    }

    fn fetch_health_records(&self, owner_id: Option<&str>) -> DbResult<Vec<HealthRecord>> {
        let owned = self.owned_ids(owner_id);
        Ok(self
            .health_records
            .iter()
            .filter(|h| owned.as_ref().map_or(true, |ids| ids.contains(h.animal_id.as_str())))
            .cloned()
            .collect())
    }
}

impl Snapshot {
    /// Fetch all three record sets from `source`.
    pub fn fetch(source: &dyn RecordSource, owner_id: Option<&str>) -> DbResult<Self> {
        Ok(Self {
            animals: source.fetch_animals(owner_id)?,
            vaccinations: source.fetch_vaccinations(owner_id)?,
            health_records: source.fetch_health_records(owner_id)?,
        })
    }

    fn owned_ids(&self, owner_id: Option<&str>) -> Option<HashSet<&str>> {
        owner_id.map(|owner| {
            self.animals
                .iter()
                .filter(|a| a.owner_id == owner)
                .map(|a| a.id.as_str())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_snapshot_filters_by_owner() {
        let mine = AnimalRecord::new("f1".into(), "Mine".into(), "goat".into());
        let theirs = AnimalRecord::new("f2".into(), "Theirs".into(), "goat".into());
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let snapshot = Snapshot {
            vaccinations: vec![
                VaccinationRecord::new(mine.id.clone(), "PPR".into()),
                VaccinationRecord::new(theirs.id.clone(), "PPR".into()),
            ],
            health_records: vec![HealthRecord::new(theirs.id.clone(), date)],
            animals: vec![mine.clone(), theirs],
        };

        let scoped = Snapshot::fetch(&snapshot, Some("f1")).unwrap();
        assert_eq!(scoped.animals, vec![mine.clone()]);
        assert_eq!(scoped.vaccinations.len(), 1);
        assert_eq!(scoped.vaccinations[0].animal_id, mine.id);
        assert!(scoped.health_records.is_empty());

        assert_eq!(Snapshot::fetch(&snapshot, None).unwrap(), snapshot);
    }

    #[test]
    fn test_database_source() {
        let db = Database::open_in_memory().unwrap();
        let animal = AnimalRecord::new("f1".into(), "Gauri".into(), "cattle".into());
        db.insert_animal(&animal).unwrap();
        db.insert_vaccination(&VaccinationRecord::new(animal.id.clone(), "FMD".into()))
            .unwrap();

        let snapshot = Snapshot::fetch(&db, Some("f1")).unwrap();
        assert_eq!(snapshot.animals.len(), 1);
        assert_eq!(snapshot.vaccinations[0].animal, Some(animal.summary()));
    }
}
