//! Lab-case database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{LabCase, LabCaseStatus, LabCaseType};

fn labcase_from_row(row: &Row<'_>) -> rusqlite::Result<LabCase> {
    let case_type: String = row.get(2)?;
    let status: String = row.get(6)?;
    Ok(LabCase {
        case_id: row.get(0)?,
        patient_id: row.get(1)?,
        case_type: LabCaseType::parse(&case_type).unwrap_or(LabCaseType::Crown),
        lab_name: row.get(3)?,
        shade: row.get(4)?,
        due_date: row.get(5)?,
        status: LabCaseStatus::parse(&status).unwrap_or(LabCaseStatus::Open),
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

const LABCASE_COLUMNS: &str =
    "case_id, patient_id, case_type, lab_name, shade, due_date, status, notes, created_at, updated_at";

impl Database {
    /// Insert a new lab case.
    pub fn insert_lab_case(&self, case: &LabCase) -> DbResult<()> {
        if self.get_patient(&case.patient_id)?.is_none() {
            return Err(DbError::NotFound(case.patient_id.clone()));
        }
        self.conn.execute(
            r#"
            INSERT INTO lab_cases (
                case_id, patient_id, case_type, lab_name, shade, due_date,
                status, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                case.case_id,
                case.patient_id,
                case.case_type.as_str(),
                case.lab_name,
                case.shade,
                case.due_date,
                case.status.as_str(),
                case.notes,
                case.created_at,
                case.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a lab case by ID.
    pub fn get_lab_case(&self, case_id: &str) -> DbResult<Option<LabCase>> {
        self.conn
            .query_row(
                &format!("SELECT {LABCASE_COLUMNS} FROM lab_cases WHERE case_id = ?"),
                [case_id],
                labcase_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update a lab case's status.
    pub fn set_lab_case_status(&self, case_id: &str, status: LabCaseStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE lab_cases SET status = ?2, updated_at = datetime('now') WHERE case_id = ?1",
            params![case_id, status.as_str()],
        )?;
        Ok(rows_affected > 0)
    }

    /// List open cases (not seated, not cancelled), earliest due first.
    pub fn list_open_lab_cases(&self) -> DbResult<Vec<LabCase>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {LABCASE_COLUMNS} FROM lab_cases
            WHERE status NOT IN ('seated', 'cancelled')
            ORDER BY due_date IS NULL, due_date
            "#
        ))?;

        let rows = stmt.query_map([], labcase_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List open cases past due as of the given date (YYYY-MM-DD).
    pub fn list_overdue_lab_cases(&self, as_of: &str) -> DbResult<Vec<LabCase>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {LABCASE_COLUMNS} FROM lab_cases
            WHERE status NOT IN ('seated', 'cancelled')
              AND due_date IS NOT NULL
              AND due_date < ?
            ORDER BY due_date
            "#
        ))?;

        let rows = stmt.query_map([as_of], labcase_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all cases for a patient, newest first.
    pub fn list_lab_cases_for_patient(&self, patient_id: &str) -> DbResult<Vec<LabCase>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LABCASE_COLUMNS} FROM lab_cases WHERE patient_id = ? ORDER BY created_at DESC"
        ))?;

        let rows = stmt.query_map([patient_id], labcase_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
