//! Domain models for the periodesk system.

mod appointment;
mod chart;
mod intake;
mod labcase;
mod patient;
mod tooth;

pub use appointment::*;
pub use chart::*;
pub use intake::*;
pub use labcase::*;
pub use patient::*;
pub use tooth::*;

use thiserror::Error;

/// Charting errors: invalid tooth addresses, rejected measurements.
///
/// A rejected setter never modifies the grid; the prior value stays stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("No such tooth: universal {0} (valid range 1-32)")]
    UnknownTooth(u8),

    #[error("No such tooth: FDI {0}")]
    UnknownFdiTooth(u8),

    #[error("{field} of {value} mm outside valid range {min}..={max} mm")]
    OutOfRange {
        field: &'static str,
        value: i16,
        min: i16,
        max: i16,
    },

    #[error("{field} grade {grade} outside valid range 0..=3")]
    InvalidGrade { field: &'static str, grade: u8 },

    #[error("Unrecognized {field}: {value}")]
    UnknownKeyword { field: &'static str, value: String },
}
