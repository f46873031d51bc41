//! Animal, vaccination and health record operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{tables, Database, DbResult};
use crate::feed::ChangeKind;
use crate::models::{AnimalRecord, AnimalSummary, HealthRecord, HealthStatus, VaccinationRecord};
use crate::validation::Validate;

const ANIMAL_COLUMNS: &str = "id, owner_id, name, species, breed, health_status, created_at";

impl Database {
    // =========================================================================
    // Animals
    // =========================================================================

    /// Insert a new animal.
    pub fn insert_animal(&self, animal: &AnimalRecord) -> DbResult<()> {
        animal.validate()?;
        self.conn.execute(
            r#"
            INSERT INTO animals (id, owner_id, name, species, breed, health_status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                animal.id,
                animal.owner_id,
                animal.name,
                animal.species,
                animal.breed,
                animal.health_status.as_str(),
                animal.created_at,
            ],
        )?;
        self.notify(tables::ANIMALS, ChangeKind::Insert, &animal.id);
        Ok(())
    }

    /// Update an existing animal.
    pub fn update_animal(&self, animal: &AnimalRecord) -> DbResult<bool> {
        animal.validate()?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE animals SET
                owner_id = ?2,
                name = ?3,
                species = ?4,
                breed = ?5,
                health_status = ?6
            WHERE id = ?1
            "#,
            params![
                animal.id,
                animal.owner_id,
                animal.name,
                animal.species,
                animal.breed,
                animal.health_status.as_str(),
            ],
        )?;
        if rows_affected > 0 {
            self.notify(tables::ANIMALS, ChangeKind::Update, &animal.id);
        }
        Ok(rows_affected > 0)
    }

    /// Change only the health status of an animal.
    pub fn set_health_status(&self, animal_id: &str, status: &HealthStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE animals SET health_status = ? WHERE id = ?",
            params![status.as_str(), animal_id],
        )?;
        if rows_affected > 0 {
            self.notify(tables::ANIMALS, ChangeKind::Update, animal_id);
        }
        Ok(rows_affected > 0)
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: &str) -> DbResult<Option<AnimalRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM animals WHERE id = ?", ANIMAL_COLUMNS),
                [id],
                animal_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List animals, optionally only those owned by one farmer.
    pub fn list_animals(&self, owner_id: Option<&str>) -> DbResult<Vec<AnimalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM animals WHERE (?1 IS NULL OR owner_id = ?1) ORDER BY name",
            ANIMAL_COLUMNS
        ))?;
        let rows = stmt.query_map([owner_id], animal_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete an animal (cascades to its vaccination and health records).
    pub fn delete_animal(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM animals WHERE id = ?", [id])?;
        if rows_affected > 0 {
            self.notify(tables::ANIMALS, ChangeKind::Delete, id);
        }
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Vaccinations
    // =========================================================================

    /// Insert a new vaccination record.
    pub fn insert_vaccination(&self, record: &VaccinationRecord) -> DbResult<()> {
        record.validate()?;
        self.conn.execute(
            r#"
            INSERT INTO vaccinations (id, animal_id, vaccine_name, date_administered, next_due_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.animal_id,
                record.vaccine_name,
                record.date_administered,
                record.next_due_date,
            ],
        )?;
        self.notify(tables::VACCINATIONS, ChangeKind::Insert, &record.id);
        Ok(())
    }

    /// Reschedule the next dose.
    pub fn reschedule_vaccination(
        &self,
        id: &str,
        next_due_date: Option<chrono::NaiveDate>,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE vaccinations SET next_due_date = ? WHERE id = ?",
            params![next_due_date, id],
        )?;
        if rows_affected > 0 {
            self.notify(tables::VACCINATIONS, ChangeKind::Update, id);
        }
        Ok(rows_affected > 0)
    }

    /// List vaccinations joined with their animal, ordered by due date.
    ///
    /// Records without a due date sort last.
    pub fn list_vaccinations(&self, owner_id: Option<&str>) -> DbResult<Vec<VaccinationRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT v.id, v.animal_id, v.vaccine_name, v.date_administered, v.next_due_date,
                   a.name, a.species
            FROM vaccinations v
            LEFT JOIN animals a ON a.id = v.animal_id
            WHERE (?1 IS NULL OR a.owner_id = ?1)
            ORDER BY v.next_due_date IS NULL, v.next_due_date
            "#,
        )?;

        let rows = stmt.query_map([owner_id], |row| {
            Ok(VaccinationRecord {
                id: row.get(0)?,
                animal_id: row.get(1)?,
                vaccine_name: row.get(2)?,
                date_administered: row.get(3)?,
                next_due_date: row.get(4)?,
                animal: joined_animal(row, 5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // =========================================================================
    // Health records
    // =========================================================================

    /// Insert a new health record.
    pub fn insert_health_record(&self, record: &HealthRecord) -> DbResult<()> {
        record.validate()?;
        self.conn.execute(
            r#"
            INSERT INTO health_records (
                id, animal_id, record_type, diagnosis, treatment, record_date, next_checkup_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id,
                record.animal_id,
                record.record_type,
                record.diagnosis,
                record.treatment,
                record.record_date,
                record.next_checkup_date,
            ],
        )?;
        self.notify(tables::HEALTH_RECORDS, ChangeKind::Insert, &record.id);
        Ok(())
    }

    /// List health records joined with their animal, newest first.
    pub fn list_health_records(&self, owner_id: Option<&str>) -> DbResult<Vec<HealthRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT h.id, h.animal_id, h.record_type, h.diagnosis, h.treatment,
                   h.record_date, h.next_checkup_date, a.name, a.species
            FROM health_records h
            LEFT JOIN animals a ON a.id = h.animal_id
            WHERE (?1 IS NULL OR a.owner_id = ?1)
            ORDER BY h.record_date DESC
            "#,
        )?;

        let rows = stmt.query_map([owner_id], |row| {
            Ok(HealthRecord {
                id: row.get(0)?,
                animal_id: row.get(1)?,
                record_type: row.get(2)?,
                diagnosis: row.get(3)?,
                treatment: row.get(4)?,
                record_date: row.get(5)?,
                next_checkup_date: row.get(6)?,
                animal: joined_animal(row, 7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn animal_from_row(row: &Row<'_>) -> rusqlite::Result<AnimalRecord> {
    let status: String = row.get(5)?;
    Ok(AnimalRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        species: row.get(3)?,
        breed: row.get(4)?,
        health_status: HealthStatus::from(status),
        created_at: row.get(6)?,
    })
}

/// Name and species from a LEFT JOIN starting at column `first`.
fn joined_animal(row: &Row<'_>, first: usize) -> rusqlite::Result<Option<AnimalSummary>> {
    let name: Option<String> = row.get(first)?;
    let species: Option<String> = row.get(first + 1)?;
    Ok(match (name, species) {
        (Some(name), Some(species)) => Some(AnimalSummary { name, species }),
        _ => None,
    })
}
