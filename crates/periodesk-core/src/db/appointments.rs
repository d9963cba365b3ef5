//! Appointment database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{map_constraint, Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let status: String = row.get(5)?;
    Ok(Appointment {
        appointment_id: row.get(0)?,
        patient_id: row.get(1)?,
        date: row.get(2)?,
        hour: row.get(3)?,
        reason: row.get(4)?,
        status: AppointmentStatus::parse(&status).unwrap_or(AppointmentStatus::Scheduled),
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const APPOINTMENT_COLUMNS: &str =
    "appointment_id, patient_id, date, hour, reason, status, created_at, updated_at";

impl Database {
    /// Book an appointment. A scheduled slot can be held by one
    /// appointment at a time; conflicts fail with a constraint error and
    /// leave the existing booking in place.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        if self.get_patient(&appointment.patient_id)?.is_none() {
            return Err(DbError::NotFound(appointment.patient_id.clone()));
        }
        self.conn
            .execute(
                r#"
                INSERT INTO appointments (
                    appointment_id, patient_id, date, hour, reason, status, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    appointment.appointment_id,
                    appointment.patient_id,
                    appointment.date,
                    appointment.hour,
                    appointment.reason,
                    appointment.status.as_str(),
                    appointment.created_at,
                    appointment.updated_at,
                ],
            )
            .map_err(|e| {
                map_constraint(
                    e,
                    &format!("slot {} {}:00 already booked", appointment.date, appointment.hour),
                )
            })?;
        Ok(())
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, appointment_id: &str) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE appointment_id = ?"),
                [appointment_id],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update an appointment's status.
    pub fn set_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ?2, updated_at = datetime('now') WHERE appointment_id = ?1",
            params![appointment_id, status.as_str()],
        )?;
        Ok(rows_affected > 0)
    }

    /// List a day's appointments in slot order.
    pub fn list_appointments_on(&self, date: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE date = ? ORDER BY hour"
        ))?;

        let rows = stmt.query_map([date], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Hours on a day still held by scheduled appointments.
    pub fn booked_hours(&self, date: &str) -> DbResult<Vec<u8>> {
        let mut stmt = self.conn.prepare(
            "SELECT hour FROM appointments WHERE date = ? AND status = 'scheduled' ORDER BY hour",
        )?;

        let rows = stmt.query_map([date], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{open_slots, Patient};

    fn setup() -> (Database, Patient) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Ada Okoye".into());
        db.insert_patient(&patient).unwrap();
        (db, patient)
    }

    fn book(db: &Database, patient_id: &str, date: &str, hour: u8) -> DbResult<Appointment> {
        let appointment =
            Appointment::new(patient_id.to_string(), date.to_string(), hour, None).unwrap();
        db.insert_appointment(&appointment)?;
        Ok(appointment)
    }

    #[test]
    fn test_book_and_get() {
        let (db, patient) = setup();

        let appointment = book(&db, &patient.patient_id, "2026-03-14", 10).unwrap();
        let retrieved = db.get_appointment(&appointment.appointment_id).unwrap().unwrap();
        assert_eq!(retrieved, appointment);
    }

    #[test]
    fn test_double_booking_rejected() {
        let (db, patient) = setup();

        let first = book(&db, &patient.patient_id, "2026-03-14", 10).unwrap();
        let second = book(&db, &patient.patient_id, "2026-03-14", 10);
        assert!(matches!(second, Err(DbError::Constraint(_))));

        // First booking survives.
        let day = db.list_appointments_on("2026-03-14").unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].appointment_id, first.appointment_id);
    }

    #[test]
    fn test_cancelling_frees_slot() {
        let (db, patient) = setup();

        let appointment = book(&db, &patient.patient_id, "2026-03-14", 10).unwrap();
        assert!(db
            .set_appointment_status(&appointment.appointment_id, AppointmentStatus::Cancelled)
            .unwrap());

        assert!(book(&db, &patient.patient_id, "2026-03-14", 10).is_ok());
    }

    #[test]
    fn test_open_slots_shrink_as_day_fills() {
        let (db, patient) = setup();

        book(&db, &patient.patient_id, "2026-03-14", 9).unwrap();
        book(&db, &patient.patient_id, "2026-03-14", 13).unwrap();

        let booked = db.booked_hours("2026-03-14").unwrap();
        assert_eq!(booked, vec![9, 13]);
        assert_eq!(open_slots(&booked), vec![10, 11, 12, 14, 15, 16]);

        // A different day is unaffected.
        assert!(db.booked_hours("2026-03-15").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_patient_rejected() {
        let db = Database::open_in_memory().unwrap();
        let appointment =
            Appointment::new("no-such-patient".into(), "2026-03-14".into(), 10, None).unwrap();
        assert!(matches!(
            db.insert_appointment(&appointment),
            Err(DbError::NotFound(_))
        ));
    }
}
