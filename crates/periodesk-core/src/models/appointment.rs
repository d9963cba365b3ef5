//! Appointment book with fixed hourly slots.
//!
//! The practice day is a fixed list of hourly slots; there is no duration
//! or optimization logic, only slot booking and conflict rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bookable hours, one slot each (9:00 through 16:00).
pub const SLOT_HOURS: [u8; 8] = [9, 10, 11, 12, 13, 14, 15, 16];

/// Scheduling validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid appointment date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Hour {0} is not a bookable slot")]
    InvalidSlot(u8),
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// One booked slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique appointment ID.
    pub appointment_id: String,
    /// Patient the slot is booked for.
    pub patient_id: String,
    /// Appointment date (YYYY-MM-DD).
    pub date: String,
    /// Slot hour, one of [`SLOT_HOURS`].
    pub hour: u8,
    /// Visit reason.
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl Appointment {
    /// Create a scheduled appointment, validating the date format and slot
    /// hour. Conflicts with existing bookings are the store's concern.
    pub fn new(
        patient_id: String,
        date: String,
        hour: u8,
        reason: Option<String>,
    ) -> Result<Self, ScheduleError> {
        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return Err(ScheduleError::InvalidDate(date));
        }
        if !SLOT_HOURS.contains(&hour) {
            return Err(ScheduleError::InvalidSlot(hour));
        }
        let now = chrono::Utc::now().to_rfc3339();
        Ok(Self {
            appointment_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            hour,
            reason,
            status: AppointmentStatus::Scheduled,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Slot hours still free given the day's booked hours.
pub fn open_slots(booked_hours: &[u8]) -> Vec<u8> {
    SLOT_HOURS
        .iter()
        .copied()
        .filter(|hour| !booked_hours.contains(hour))
        .collect()
}
