//! Patient intake questionnaire.

use serde::{Deserialize, Serialize};

/// Medication name fragments that flag bleeding risk during treatment.
const ANTICOAGULANT_KEYWORDS: [&str; 5] =
    ["warfarin", "coumadin", "clopidogrel", "apixaban", "rivaroxaban"];

/// Medication name fragments that flag MRONJ risk for extractions.
const BISPHOSPHONATE_KEYWORDS: [&str; 3] = ["alendronate", "risedronate", "zoledron"];

/// Reported conditions that warrant a chairside alert.
const FLAGGED_CONDITIONS: [&str; 6] = [
    "diabetes",
    "heart",
    "endocarditis",
    "epilepsy",
    "hepatitis",
    "bleeding",
];

/// One submitted intake form. Re-submission replaces the patient's
/// current form; the record itself is immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeForm {
    /// Unique form ID.
    pub form_id: String,
    /// Patient this form belongs to.
    pub patient_id: String,
    /// Current medications as reported.
    pub medications: Vec<String>,
    /// Reported allergies.
    pub allergies: Vec<String>,
    /// Reported medical conditions.
    pub conditions: Vec<String>,
    pub smoker: bool,
    pub pregnant: bool,
    /// Date of last dental visit (YYYY-MM-DD) if known.
    pub last_dental_visit: Option<String>,
    /// Reason for the visit in the patient's words.
    pub chief_complaint: Option<String>,
    pub consent_signed: bool,
    /// Submission timestamp.
    pub submitted_at: String,
}

impl IntakeForm {
    /// Create an empty form for a patient.
    pub fn new(patient_id: String) -> Self {
        Self {
            form_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            medications: Vec::new(),
            allergies: Vec::new(),
            conditions: Vec::new(),
            smoker: false,
            pregnant: false,
            last_dental_visit: None,
            chief_complaint: None,
            consent_signed: false,
            submitted_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Derive the chairside alert strings for the clinician.
    pub fn medical_alerts(&self) -> Vec<String> {
        let mut alerts = Vec::new();

        for allergy in &self.allergies {
            alerts.push(format!("Allergy: {}", allergy));
        }

        for medication in &self.medications {
            let lower = medication.to_lowercase();
            if ANTICOAGULANT_KEYWORDS.iter().any(|k| lower.contains(k)) {
                alerts.push(format!("Anticoagulant therapy: {}", medication));
            }
            if BISPHOSPHONATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
                alerts.push(format!("Bisphosphonate therapy: {}", medication));
            }
        }

        for condition in &self.conditions {
            let lower = condition.to_lowercase();
            if FLAGGED_CONDITIONS.iter().any(|k| lower.contains(k)) {
                alerts.push(format!("Condition: {}", condition));
            }
        }

        if self.smoker {
            alerts.push("Tobacco use".to_string());
        }
        if self.pregnant {
            alerts.push("Pregnancy".to_string());
        }

        alerts
    }
}
