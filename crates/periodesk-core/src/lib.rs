//! Periodesk Core Library
//!
//! Local-first dental charting and practice-management core.
//!
//! # Architecture
//!
//! ```text
//!                  UI host (charting screen, front desk)
//!                                  │
//!                        FFI surface (this crate)
//!                                  │
//!          ┌───────────────┬───────┴────────┬────────────────┐
//!          │               │                │                │
//!          ▼               ▼                ▼                ▼
//!     PerioChart      Assessment        Database          Export
//!   (measurement    (rule-based       (patients,       (summary JSON
//!      grid)         classifier)    charts, slots,        and CSV)
//!                                     lab cases)
//! ```
//!
//! # Core Principle
//!
//! **Derived values are never stored.** Attachment level and the aggregate
//! statistics are recomputed from the grid on every read; a saved chart
//! holds only the raw measurements, protected by a content hash.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ToothId, PerioChart, Patient, Appointment, LabCase)
//! - [`assessment`]: Synchronous rule-based severity classifier
//! - [`db`]: SQLite persistence collaborator with whole-unit chart saves
//! - [`export`]: Chart summary export for referrals and records requests

pub mod assessment;
pub mod db;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use assessment::{classify, Assessment, Severity};
pub use db::{ChartCommit, Database};
pub use export::{ChartExporter, ChartSummaryExport, PatientChartExport};
pub use models::{
    Appointment, AppointmentStatus, ChartError, ChartStatistics, IntakeForm, LabCase,
    LabCaseStatus, LabCaseType, MeasurementLimits, Patient, PerioChart, ScheduleError, SiteFlag,
    SitePosition, SiteRecord, Surface, ToothId, ToothRecord,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use models::TOOTH_COUNT;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PeriodeskError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for PeriodeskError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => PeriodeskError::NotFound(what),
            db::DbError::Constraint(what) => PeriodeskError::InvalidInput(what),
            other => PeriodeskError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ChartError> for PeriodeskError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::UnknownTooth(_) | ChartError::UnknownFdiTooth(_) => {
                PeriodeskError::NotFound(e.to_string())
            }
            other => PeriodeskError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ScheduleError> for PeriodeskError {
    fn from(e: ScheduleError) -> Self {
        PeriodeskError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for PeriodeskError {
    fn from(e: serde_json::Error) -> Self {
        PeriodeskError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PeriodeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PeriodeskError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a practice database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PeriodeskCore>, PeriodeskError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(PeriodeskCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PeriodeskCore>, PeriodeskError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(PeriodeskCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PeriodeskCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl PeriodeskCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient.
    pub fn create_patient(&self, name: String) -> Result<FfiPatient, PeriodeskError> {
        let db = self.db.lock()?;
        let patient = Patient::new(name);
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, patient_id: String) -> Result<Option<FfiPatient>, PeriodeskError> {
        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        Ok(patient.map(|p| p.into()))
    }

    /// Search patients by name prefix.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, PeriodeskError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Update a patient's editable fields.
    pub fn update_patient(&self, patient: FfiPatient) -> Result<FfiPatient, PeriodeskError> {
        let db = self.db.lock()?;
        let mut stored = db
            .get_patient(&patient.patient_id)?
            .ok_or_else(|| PeriodeskError::NotFound(patient.patient_id.clone()))?;
        stored.name = patient.name;
        stored.date_of_birth = patient.date_of_birth;
        stored.phone = patient.phone;
        stored.notes = patient.notes;
        stored.touch();
        db.update_patient(&stored)?;
        Ok(stored.into())
    }

    // =========================================================================
    // Intake Operations
    // =========================================================================

    /// Submit an intake form, replacing the patient's previous submission.
    pub fn submit_intake_form(
        &self,
        form: FfiIntakeForm,
    ) -> Result<FfiIntakeForm, PeriodeskError> {
        let db = self.db.lock()?;
        let form: IntakeForm = form.into();
        db.upsert_intake_form(&form)?;
        Ok(form.into())
    }

    /// Get a patient's current intake form.
    pub fn get_intake_form(
        &self,
        patient_id: String,
    ) -> Result<Option<FfiIntakeForm>, PeriodeskError> {
        let db = self.db.lock()?;
        let form = db.get_intake_form(&patient_id)?;
        Ok(form.map(|f| f.into()))
    }

    /// Chairside alert strings derived from the patient's intake form.
    pub fn medical_alerts(&self, patient_id: String) -> Result<Vec<String>, PeriodeskError> {
        let db = self.db.lock()?;
        let form = db.get_intake_form(&patient_id)?;
        Ok(form.map(|f| f.medical_alerts()).unwrap_or_default())
    }

    // =========================================================================
    // Chart Operations
    // =========================================================================

    /// Start a new examination: an empty chart for the patient. The chart
    /// is not stored until [`Self::save_chart`] is called.
    pub fn create_chart(
        &self,
        patient_id: String,
        examiner: String,
    ) -> Result<FfiPerioChart, PeriodeskError> {
        let db = self.db.lock()?;
        if db.get_patient(&patient_id)?.is_none() {
            return Err(PeriodeskError::NotFound(patient_id));
        }
        Ok(PerioChart::new(patient_id, examiner).into())
    }

    /// Persist a chart as a whole unit. Returns the save receipt with the
    /// payload content hash.
    pub fn save_chart(&self, chart: FfiPerioChart) -> Result<FfiChartCommit, PeriodeskError> {
        let db = self.db.lock()?;
        let chart: PerioChart = chart.try_into()?;
        let commit = db.save_chart(&chart)?;
        Ok(commit.into())
    }

    /// Load a saved chart, verifying its content hash.
    pub fn get_chart(&self, chart_id: String) -> Result<Option<FfiPerioChart>, PeriodeskError> {
        let db = self.db.lock()?;
        let chart = db.get_chart(&chart_id)?;
        Ok(chart.map(|c| c.into()))
    }

    /// List a patient's saved examinations, newest first.
    pub fn list_chart_commits(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiChartCommit>, PeriodeskError> {
        let db = self.db.lock()?;
        let commits = db.list_chart_commits(&patient_id)?;
        Ok(commits.into_iter().map(|c| c.into()).collect())
    }

    /// Classify a saved chart.
    pub fn classify_saved_chart(
        &self,
        chart_id: String,
    ) -> Result<FfiAssessment, PeriodeskError> {
        let db = self.db.lock()?;
        let chart = db
            .get_chart(&chart_id)?
            .ok_or_else(|| PeriodeskError::NotFound(chart_id))?;
        Ok(classify(&chart).into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a saved chart summary as JSON.
    pub fn export_chart_json(&self, chart_id: String) -> Result<String, PeriodeskError> {
        let db = self.db.lock()?;
        let exporter = ChartExporter::new(&db);
        let export = exporter.export_chart(&chart_id)?;
        Ok(export.to_json()?)
    }

    /// Export a saved chart summary as CSV.
    pub fn export_chart_csv(&self, chart_id: String) -> Result<String, PeriodeskError> {
        let db = self.db.lock()?;
        let exporter = ChartExporter::new(&db);
        let export = exporter.export_chart(&chart_id)?;
        Ok(export.to_csv())
    }

    /// Export a patient's full chart history as JSON.
    pub fn export_patient_json(&self, patient_id: String) -> Result<String, PeriodeskError> {
        let db = self.db.lock()?;
        let exporter = ChartExporter::new(&db);
        let export = exporter.export_patient(&patient_id)?;
        Ok(export.to_json()?)
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Book a fixed hourly slot.
    pub fn book_appointment(
        &self,
        patient_id: String,
        date: String,
        hour: u8,
        reason: Option<String>,
    ) -> Result<FfiAppointment, PeriodeskError> {
        let db = self.db.lock()?;
        let appointment = Appointment::new(patient_id, date, hour, reason)?;
        db.insert_appointment(&appointment)?;
        Ok(appointment.into())
    }

    /// Cancel an appointment, freeing its slot.
    pub fn cancel_appointment(&self, appointment_id: String) -> Result<bool, PeriodeskError> {
        let db = self.db.lock()?;
        Ok(db.set_appointment_status(&appointment_id, AppointmentStatus::Cancelled)?)
    }

    /// Mark an appointment completed.
    pub fn complete_appointment(&self, appointment_id: String) -> Result<bool, PeriodeskError> {
        let db = self.db.lock()?;
        Ok(db.set_appointment_status(&appointment_id, AppointmentStatus::Completed)?)
    }

    /// List a day's appointments in slot order.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, PeriodeskError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments_on(&date)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Slot hours still free on a day.
    pub fn open_slots(&self, date: String) -> Result<Vec<u8>, PeriodeskError> {
        let db = self.db.lock()?;
        let booked = db.booked_hours(&date)?;
        Ok(models::open_slots(&booked))
    }

    // =========================================================================
    // Lab Case Operations
    // =========================================================================

    /// Open a new lab case.
    pub fn create_lab_case(
        &self,
        patient_id: String,
        case_type: String,
        lab_name: String,
        shade: Option<String>,
        due_date: Option<String>,
    ) -> Result<FfiLabCase, PeriodeskError> {
        let db = self.db.lock()?;
        let case_type = LabCaseType::parse(&case_type)
            .ok_or_else(|| PeriodeskError::InvalidInput(format!("unknown case type: {case_type}")))?;
        let mut case = LabCase::new(patient_id, case_type, lab_name);
        case.shade = shade;
        case.due_date = due_date;
        db.insert_lab_case(&case)?;
        Ok(case.into())
    }

    /// Move a lab case to a new status.
    pub fn set_lab_case_status(
        &self,
        case_id: String,
        status: String,
    ) -> Result<bool, PeriodeskError> {
        let db = self.db.lock()?;
        let status = LabCaseStatus::parse(&status)
            .ok_or_else(|| PeriodeskError::InvalidInput(format!("unknown status: {status}")))?;
        Ok(db.set_lab_case_status(&case_id, status)?)
    }

    /// List open cases, earliest due first.
    pub fn open_lab_cases(&self) -> Result<Vec<FfiLabCase>, PeriodeskError> {
        let db = self.db.lock()?;
        let cases = db.list_open_lab_cases()?;
        Ok(cases.into_iter().map(|c| c.into()).collect())
    }

    /// List open cases past due as of a date (YYYY-MM-DD).
    pub fn overdue_lab_cases(&self, as_of: String) -> Result<Vec<FfiLabCase>, PeriodeskError> {
        let db = self.db.lock()?;
        let cases = db.list_overdue_lab_cases(&as_of)?;
        Ok(cases.into_iter().map(|c| c.into()).collect())
    }
}

// =========================================================================
// Chart Edit Functions (exported to FFI)
//
// Pure value-in/value-out edits: the host holds the chart between calls
// and receives the mutated chart back on every edit. Persistence happens
// only through save_chart.
// =========================================================================

/// Record a pocket depth reading.
#[uniffi::export]
pub fn chart_set_pocket_depth(
    chart: FfiPerioChart,
    tooth: u8,
    surface: String,
    position: String,
    mm: u8,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.set_pocket_depth(
        ToothId::from_universal(tooth)?,
        Surface::parse(&surface)?,
        SitePosition::parse(&position)?,
        mm,
    )?;
    Ok(chart.into())
}

/// Record a recession reading (negative = margin coronal to the CEJ).
#[uniffi::export]
pub fn chart_set_recession(
    chart: FfiPerioChart,
    tooth: u8,
    surface: String,
    position: String,
    mm: i8,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.set_recession(
        ToothId::from_universal(tooth)?,
        Surface::parse(&surface)?,
        SitePosition::parse(&position)?,
        mm,
    )?;
    Ok(chart.into())
}

/// Flip one boolean finding (bleeding, suppuration, plaque, calculus).
#[uniffi::export]
pub fn chart_toggle_flag(
    chart: FfiPerioChart,
    tooth: u8,
    surface: String,
    position: String,
    flag: String,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.toggle_flag(
        ToothId::from_universal(tooth)?,
        Surface::parse(&surface)?,
        SitePosition::parse(&position)?,
        SiteFlag::parse(&flag)?,
    );
    Ok(chart.into())
}

/// Set a tooth's mobility grade (0-3).
#[uniffi::export]
pub fn chart_set_mobility(
    chart: FfiPerioChart,
    tooth: u8,
    grade: u8,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.set_mobility(ToothId::from_universal(tooth)?, grade)?;
    Ok(chart.into())
}

/// Set a tooth surface's furcation involvement grade (0-3).
#[uniffi::export]
pub fn chart_set_furcation(
    chart: FfiPerioChart,
    tooth: u8,
    surface: String,
    grade: u8,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.set_furcation(ToothId::from_universal(tooth)?, Surface::parse(&surface)?, grade)?;
    Ok(chart.into())
}

/// Mark a tooth as an implant.
#[uniffi::export]
pub fn chart_set_implant(
    chart: FfiPerioChart,
    tooth: u8,
    implant: bool,
) -> Result<FfiPerioChart, PeriodeskError> {
    let mut chart: PerioChart = chart.try_into()?;
    chart.set_implant(ToothId::from_universal(tooth)?, implant);
    Ok(chart.into())
}

/// Derived clinical attachment level at one site (pocket depth + recession).
#[uniffi::export]
pub fn chart_attachment_level(
    chart: FfiPerioChart,
    tooth: u8,
    surface: String,
    position: String,
) -> Result<i16, PeriodeskError> {
    let chart: PerioChart = chart.try_into()?;
    Ok(chart.attachment_level(
        ToothId::from_universal(tooth)?,
        Surface::parse(&surface)?,
        SitePosition::parse(&position)?,
    ))
}

/// Aggregate statistics reduced from the full grid.
#[uniffi::export]
pub fn chart_statistics(chart: FfiPerioChart) -> Result<FfiChartStatistics, PeriodeskError> {
    let chart: PerioChart = chart.try_into()?;
    Ok(chart.statistics().into())
}

/// Classify an in-progress chart value.
#[uniffi::export]
pub fn classify_chart(chart: FfiPerioChart) -> Result<FfiAssessment, PeriodeskError> {
    let chart: PerioChart = chart.try_into()?;
    Ok(classify(&chart).into())
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            date_of_birth: patient.date_of_birth,
            phone: patient.phone,
            notes: patient.notes,
        }
    }
}

/// FFI-safe intake form. `form_id` and `submitted_at` are assigned on
/// submission; values supplied by the host are ignored.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIntakeForm {
    pub form_id: String,
    pub patient_id: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub smoker: bool,
    pub pregnant: bool,
    pub last_dental_visit: Option<String>,
    pub chief_complaint: Option<String>,
    pub consent_signed: bool,
    pub submitted_at: String,
}

impl From<IntakeForm> for FfiIntakeForm {
    fn from(form: IntakeForm) -> Self {
        Self {
            form_id: form.form_id,
            patient_id: form.patient_id,
            medications: form.medications,
            allergies: form.allergies,
            conditions: form.conditions,
            smoker: form.smoker,
            pregnant: form.pregnant,
            last_dental_visit: form.last_dental_visit,
            chief_complaint: form.chief_complaint,
            consent_signed: form.consent_signed,
            submitted_at: form.submitted_at,
        }
    }
}

impl From<FfiIntakeForm> for IntakeForm {
    fn from(form: FfiIntakeForm) -> Self {
        let mut intake = IntakeForm::new(form.patient_id);
        intake.medications = form.medications;
        intake.allergies = form.allergies;
        intake.conditions = form.conditions;
        intake.smoker = form.smoker;
        intake.pregnant = form.pregnant;
        intake.last_dental_visit = form.last_dental_visit;
        intake.chief_complaint = form.chief_complaint;
        intake.consent_signed = form.consent_signed;
        intake
    }
}

/// FFI-safe site record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSiteRecord {
    pub pocket_depth_mm: u8,
    pub recession_mm: i8,
    pub bleeding: bool,
    pub suppuration: bool,
    pub plaque: bool,
    pub calculus: bool,
}

impl From<SiteRecord> for FfiSiteRecord {
    fn from(site: SiteRecord) -> Self {
        Self {
            pocket_depth_mm: site.pocket_depth_mm,
            recession_mm: site.recession_mm,
            bleeding: site.bleeding,
            suppuration: site.suppuration,
            plaque: site.plaque,
            calculus: site.calculus,
        }
    }
}

impl From<FfiSiteRecord> for SiteRecord {
    fn from(site: FfiSiteRecord) -> Self {
        SiteRecord {
            pocket_depth_mm: site.pocket_depth_mm,
            recession_mm: site.recession_mm,
            bleeding: site.bleeding,
            suppuration: site.suppuration,
            plaque: site.plaque,
            calculus: site.calculus,
        }
    }
}

/// FFI-safe surface record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSurfaceRecord {
    pub mesial: FfiSiteRecord,
    pub mid: FfiSiteRecord,
    pub distal: FfiSiteRecord,
}

impl From<models::SurfaceRecord> for FfiSurfaceRecord {
    fn from(surface: models::SurfaceRecord) -> Self {
        Self {
            mesial: surface.mesial.into(),
            mid: surface.mid.into(),
            distal: surface.distal.into(),
        }
    }
}

impl From<FfiSurfaceRecord> for models::SurfaceRecord {
    fn from(surface: FfiSurfaceRecord) -> Self {
        models::SurfaceRecord {
            mesial: surface.mesial.into(),
            mid: surface.mid.into(),
            distal: surface.distal.into(),
        }
    }
}

/// FFI-safe tooth record, tagged with its Universal number.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiToothRecord {
    pub tooth: u8,
    pub facial: FfiSurfaceRecord,
    pub lingual: FfiSurfaceRecord,
    pub mobility: u8,
    pub facial_furcation: u8,
    pub lingual_furcation: u8,
    pub implant: bool,
}

/// FFI-safe measurement limits.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeasurementLimits {
    pub max_pocket_depth_mm: u8,
    pub min_recession_mm: i8,
    pub max_recession_mm: i8,
}

impl From<MeasurementLimits> for FfiMeasurementLimits {
    fn from(limits: MeasurementLimits) -> Self {
        Self {
            max_pocket_depth_mm: limits.max_pocket_depth_mm,
            min_recession_mm: limits.min_recession_mm,
            max_recession_mm: limits.max_recession_mm,
        }
    }
}

impl From<FfiMeasurementLimits> for MeasurementLimits {
    fn from(limits: FfiMeasurementLimits) -> Self {
        MeasurementLimits {
            max_pocket_depth_mm: limits.max_pocket_depth_mm,
            min_recession_mm: limits.min_recession_mm,
            max_recession_mm: limits.max_recession_mm,
        }
    }
}

/// FFI-safe chart. Teeth are in Universal order, 1 through 32.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPerioChart {
    pub chart_id: String,
    pub patient_id: String,
    pub examiner: String,
    pub examined_at: String,
    pub notes: Option<String>,
    pub limits: FfiMeasurementLimits,
    pub teeth: Vec<FfiToothRecord>,
}

impl From<PerioChart> for FfiPerioChart {
    fn from(chart: PerioChart) -> Self {
        let teeth = chart
            .teeth
            .iter()
            .enumerate()
            .map(|(i, record)| FfiToothRecord {
                tooth: (i + 1) as u8,
                facial: record.facial.into(),
                lingual: record.lingual.into(),
                mobility: record.mobility,
                facial_furcation: record.facial_furcation,
                lingual_furcation: record.lingual_furcation,
                implant: record.implant,
            })
            .collect();

        Self {
            chart_id: chart.chart_id,
            patient_id: chart.patient_id,
            examiner: chart.examiner,
            examined_at: chart.examined_at,
            notes: chart.notes,
            limits: chart.limits.into(),
            teeth,
        }
    }
}

impl TryFrom<FfiPerioChart> for PerioChart {
    type Error = PeriodeskError;

    fn try_from(chart: FfiPerioChart) -> Result<Self, Self::Error> {
        if chart.teeth.len() != TOOTH_COUNT {
            return Err(PeriodeskError::InvalidInput(format!(
                "chart must carry {} teeth, got {}",
                TOOTH_COUNT,
                chart.teeth.len()
            )));
        }

        let mut teeth = [ToothRecord::default(); TOOTH_COUNT];
        for (i, record) in chart.teeth.into_iter().enumerate() {
            if record.tooth as usize != i + 1 {
                return Err(PeriodeskError::InvalidInput(format!(
                    "teeth must be in Universal order; expected {} at index {}, got {}",
                    i + 1,
                    i,
                    record.tooth
                )));
            }
            teeth[i] = ToothRecord {
                facial: record.facial.into(),
                lingual: record.lingual.into(),
                mobility: record.mobility,
                facial_furcation: record.facial_furcation,
                lingual_furcation: record.lingual_furcation,
                implant: record.implant,
            };
        }

        Ok(PerioChart {
            chart_id: chart.chart_id,
            patient_id: chart.patient_id,
            examiner: chart.examiner,
            examined_at: chart.examined_at,
            notes: chart.notes,
            limits: chart.limits.into(),
            teeth,
        })
    }
}

/// FFI-safe chart save receipt.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChartCommit {
    pub chart_id: String,
    pub patient_id: String,
    pub examined_at: String,
    pub content_hash: String,
}

impl From<ChartCommit> for FfiChartCommit {
    fn from(commit: ChartCommit) -> Self {
        Self {
            chart_id: commit.chart_id,
            patient_id: commit.patient_id,
            examined_at: commit.examined_at,
            content_hash: commit.content_hash,
        }
    }
}

/// FFI-safe aggregate statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChartStatistics {
    pub total_sites: u32,
    pub bleeding_sites: u32,
    pub plaque_sites: u32,
    pub suppuration_sites: u32,
    pub calculus_sites: u32,
    pub bleeding_percent: u8,
    pub plaque_percent: u8,
    pub deep_pocket_sites: u32,
    pub severe_pocket_sites: u32,
    pub max_pocket_depth_mm: u8,
    pub max_attachment_level_mm: i16,
    pub mobile_teeth: u32,
    pub furcation_teeth: u32,
}

impl From<ChartStatistics> for FfiChartStatistics {
    fn from(stats: ChartStatistics) -> Self {
        Self {
            total_sites: stats.total_sites,
            bleeding_sites: stats.bleeding_sites,
            plaque_sites: stats.plaque_sites,
            suppuration_sites: stats.suppuration_sites,
            calculus_sites: stats.calculus_sites,
            bleeding_percent: stats.bleeding_percent,
            plaque_percent: stats.plaque_percent,
            deep_pocket_sites: stats.deep_pocket_sites,
            severe_pocket_sites: stats.severe_pocket_sites,
            max_pocket_depth_mm: stats.max_pocket_depth_mm,
            max_attachment_level_mm: stats.max_attachment_level_mm,
            mobile_teeth: stats.mobile_teeth,
            furcation_teeth: stats.furcation_teeth,
        }
    }
}

/// FFI-safe assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub severity: String,
    pub factors: Vec<String>,
    pub statistics: FfiChartStatistics,
}

impl From<Assessment> for FfiAssessment {
    fn from(assessment: Assessment) -> Self {
        Self {
            severity: assessment.severity.as_str().to_string(),
            factors: assessment.factors,
            statistics: assessment.statistics.into(),
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub date: String,
    pub hour: u8,
    pub reason: Option<String>,
    pub status: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            appointment_id: appointment.appointment_id,
            patient_id: appointment.patient_id,
            date: appointment.date,
            hour: appointment.hour,
            reason: appointment.reason,
            status: appointment.status.as_str().to_string(),
        }
    }
}

/// FFI-safe lab case.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabCase {
    pub case_id: String,
    pub patient_id: String,
    pub case_type: String,
    pub lab_name: String,
    pub shade: Option<String>,
    pub due_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl From<LabCase> for FfiLabCase {
    fn from(case: LabCase) -> Self {
        Self {
            case_id: case.case_id,
            patient_id: case.patient_id,
            case_type: case.case_type.as_str().to_string(),
            lab_name: case.lab_name,
            shade: case.shade,
            due_date: case.due_date,
            status: case.status.as_str().to_string(),
            notes: case.notes,
        }
    }
}
