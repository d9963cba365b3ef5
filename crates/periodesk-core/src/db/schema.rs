//! SQLite schema definition.

/// Complete database schema for periodesk.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    date_of_birth TEXT,
    phone TEXT,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Intake Forms (one current form per patient, replaced on re-submission)
-- ============================================================================

CREATE TABLE IF NOT EXISTS intake_forms (
    form_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL UNIQUE REFERENCES patients(patient_id),
    payload TEXT NOT NULL,                       -- JSON IntakeForm
    submitted_at TEXT NOT NULL
);

-- ============================================================================
-- Periodontal Charts (whole-unit saves; history preserved per examination)
-- ============================================================================

CREATE TABLE IF NOT EXISTS perio_charts (
    chart_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    examiner TEXT NOT NULL,
    examined_at TEXT NOT NULL,
    payload TEXT NOT NULL,                       -- canonical JSON PerioChart
    content_hash TEXT NOT NULL,                  -- SHA-256 of payload
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_charts_patient ON perio_charts(patient_id);
CREATE INDEX IF NOT EXISTS idx_charts_examined ON perio_charts(examined_at);

-- ============================================================================
-- Appointments (fixed hourly slots)
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    appointment_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    date TEXT NOT NULL,                          -- YYYY-MM-DD
    hour INTEGER NOT NULL,
    reason TEXT,
    status TEXT NOT NULL DEFAULT 'scheduled',    -- scheduled, completed, cancelled
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- A slot can be booked once while it remains scheduled
CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_slot
    ON appointments(date, hour) WHERE status = 'scheduled';
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date);
CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);

-- ============================================================================
-- Lab Cases
-- ============================================================================

CREATE TABLE IF NOT EXISTS lab_cases (
    case_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    case_type TEXT NOT NULL,                     -- crown, bridge, denture, ...
    lab_name TEXT NOT NULL,
    shade TEXT,
    due_date TEXT,                               -- YYYY-MM-DD
    status TEXT NOT NULL DEFAULT 'open',         -- open, sent, received, seated, cancelled
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_lab_cases_status ON lab_cases(status);
CREATE INDEX IF NOT EXISTS idx_lab_cases_due ON lab_cases(due_date);
"#;
