//! Lab-case tracking for restorative work sent to external labs.

use serde::{Deserialize, Serialize};

/// Restoration type the lab is fabricating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabCaseType {
    Crown,
    Bridge,
    Denture,
    ImplantRestoration,
    NightGuard,
}

impl LabCaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            LabCaseType::Crown => "crown",
            LabCaseType::Bridge => "bridge",
            LabCaseType::Denture => "denture",
            LabCaseType::ImplantRestoration => "implant_restoration",
            LabCaseType::NightGuard => "night_guard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "crown" => Some(LabCaseType::Crown),
            "bridge" => Some(LabCaseType::Bridge),
            "denture" => Some(LabCaseType::Denture),
            "implant_restoration" => Some(LabCaseType::ImplantRestoration),
            "night_guard" => Some(LabCaseType::NightGuard),
            _ => None,
        }
    }
}

/// Lab case lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabCaseStatus {
    /// Impressions taken, not yet shipped.
    Open,
    /// Shipped to the lab.
    Sent,
    /// Back from the lab, awaiting seating.
    Received,
    /// Seated in the patient's mouth.
    Seated,
    Cancelled,
}

impl LabCaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LabCaseStatus::Open => "open",
            LabCaseStatus::Sent => "sent",
            LabCaseStatus::Received => "received",
            LabCaseStatus::Seated => "seated",
            LabCaseStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(LabCaseStatus::Open),
            "sent" => Some(LabCaseStatus::Sent),
            "received" => Some(LabCaseStatus::Received),
            "seated" => Some(LabCaseStatus::Seated),
            "cancelled" => Some(LabCaseStatus::Cancelled),
            _ => None,
        }
    }

    /// Closed cases no longer appear on the work list.
    pub fn is_closed(self) -> bool {
        matches!(self, LabCaseStatus::Seated | LabCaseStatus::Cancelled)
    }
}

/// One restoration case tracked against an external lab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabCase {
    /// Unique case ID.
    pub case_id: String,
    /// Patient the restoration is for.
    pub patient_id: String,
    pub case_type: LabCaseType,
    /// Fabricating lab.
    pub lab_name: String,
    /// Shade specification, if any.
    pub shade: Option<String>,
    /// Expected return date (YYYY-MM-DD).
    pub due_date: Option<String>,
    pub status: LabCaseStatus,
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl LabCase {
    /// Create a new open case.
    pub fn new(patient_id: String, case_type: LabCaseType, lab_name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            case_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            case_type,
            lab_name,
            shade: None,
            due_date: None,
            status: LabCaseStatus::Open,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_closed()
    }

    /// Whether the case is past due as of the given date (YYYY-MM-DD).
    /// ISO dates compare lexicographically.
    pub fn is_overdue(&self, as_of: &str) -> bool {
        match &self.due_date {
            Some(due) => self.is_open() && due.as_str() < as_of,
            None => false,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
