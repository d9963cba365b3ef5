//! Patient and intake-form database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{IntakeForm, Patient};

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        patient_id: row.get(0)?,
        name: row.get(1)?,
        date_of_birth: row.get(2)?,
        phone: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const PATIENT_COLUMNS: &str =
    "patient_id, name, date_of_birth, phone, notes, created_at, updated_at";

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, date_of_birth, phone, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.date_of_birth,
                patient.phone,
                patient.notes,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                date_of_birth = ?3,
                phone = ?4,
                notes = ?5,
                updated_at = datetime('now')
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.date_of_birth,
                patient.phone,
                patient.notes,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?"),
                [patient_id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search patients by name (prefix match).
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let pattern = format!("{}%", query);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE name LIKE ? ORDER BY name LIMIT ?"
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY name"))?;

        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Store a patient's intake form, replacing any previous submission.
    pub fn upsert_intake_form(&self, form: &IntakeForm) -> DbResult<()> {
        if self.get_patient(&form.patient_id)?.is_none() {
            return Err(DbError::NotFound(form.patient_id.clone()));
        }
        let payload = serde_json::to_string(form)?;
        self.conn.execute(
            r#"
            INSERT INTO intake_forms (form_id, patient_id, payload, submitted_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(patient_id) DO UPDATE SET
                form_id = excluded.form_id,
                payload = excluded.payload,
                submitted_at = excluded.submitted_at
            "#,
            params![form.form_id, form.patient_id, payload, form.submitted_at],
        )?;
        Ok(())
    }

    /// Get a patient's current intake form.
    pub fn get_intake_form(&self, patient_id: &str) -> DbResult<Option<IntakeForm>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM intake_forms WHERE patient_id = ?",
                [patient_id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut patient = Patient::new("Ada Okoye".into());
        patient.date_of_birth = Some("1985-06-02".into());
        patient.phone = Some("+1 555 0100".into());

        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(&patient.patient_id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Ada Okoye");
        assert_eq!(retrieved.date_of_birth, Some("1985-06-02".into()));
        assert_eq!(retrieved.phone, Some("+1 555 0100".into()));
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let mut patient = Patient::new("Ada Okoye".into());
        db.insert_patient(&patient).unwrap();

        patient.phone = Some("+1 555 0199".into());
        patient.notes = Some("prefers morning visits".into());
        assert!(db.update_patient(&patient).unwrap());

        let retrieved = db.get_patient(&patient.patient_id).unwrap().unwrap();
        assert_eq!(retrieved.phone, Some("+1 555 0199".into()));
        assert_eq!(retrieved.notes, Some("prefers morning visits".into()));
    }

    #[test]
    fn test_search_patients() {
        let db = setup_db();

        db.insert_patient(&Patient::new("Maya Lindqvist".into())).unwrap();
        db.insert_patient(&Patient::new("Mayank Rao".into())).unwrap();
        db.insert_patient(&Patient::new("Leo Grant".into())).unwrap();

        let results = db.search_patients("May", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|p| p.name == "Maya Lindqvist"));
        assert!(results.iter().any(|p| p.name == "Mayank Rao"));
    }

    #[test]
    fn test_intake_form_replaces_previous() {
        let db = setup_db();

        let patient = Patient::new("Ada Okoye".into());
        db.insert_patient(&patient).unwrap();

        let mut first = IntakeForm::new(patient.patient_id.clone());
        first.allergies.push("latex".into());
        db.upsert_intake_form(&first).unwrap();

        let mut second = IntakeForm::new(patient.patient_id.clone());
        second.allergies.push("penicillin".into());
        second.consent_signed = true;
        db.upsert_intake_form(&second).unwrap();

        let current = db.get_intake_form(&patient.patient_id).unwrap().unwrap();
        assert_eq!(current.form_id, second.form_id);
        assert_eq!(current.allergies, vec!["penicillin".to_string()]);
        assert!(current.consent_signed);
    }

    #[test]
    fn test_intake_for_unknown_patient_rejected() {
        let db = setup_db();
        let form = IntakeForm::new("no-such-patient".into());
        assert!(matches!(
            db.upsert_intake_form(&form),
            Err(DbError::NotFound(_))
        ));
    }
}
