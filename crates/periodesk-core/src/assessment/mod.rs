//! Rule-based periodontal severity assessment.
//!
//! The classifier is a synchronous pure function over the chart: fixed
//! thresholds on pocket depth, attachment level and bleeding rate. It is
//! deliberately not a model and performs no inference.

mod classifier;

pub use classifier::*;

use serde::{Deserialize, Serialize};

use crate::models::ChartStatistics;

/// Overall periodontal severity grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result: the grade, the findings that drove it, and the
/// statistics snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub severity: Severity,
    /// Human-readable contributing findings.
    pub factors: Vec<String>,
    pub statistics: ChartStatistics,
}
