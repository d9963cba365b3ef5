//! Chart summary export.
//!
//! Builds an interchange record from a saved chart and its content hash:
//! metadata, aggregate statistics, the severity assessment and the full
//! per-site measurement table. JSON for records transfer, CSV for
//! spreadsheet import. Rendering (PDF, print) is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::assessment::{classify, Assessment};
use crate::db::{Database, DbError, DbResult};
use crate::models::{ChartStatistics, PerioChart};

/// Export of a single chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSummaryExport {
    /// Export metadata
    pub metadata: SummaryMetadata,
    /// Aggregate statistics
    pub statistics: ChartStatistics,
    /// Severity grade
    pub severity: String,
    /// Findings that drove the grade
    pub contributing_factors: Vec<String>,
    /// Per-site measurement table
    pub sites: Vec<SiteSummary>,
}

/// Chart export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub chart_id: String,
    pub patient_id: String,
    pub examiner: String,
    /// Examination timestamp
    pub examined_at: String,
    /// Export timestamp
    pub exported_at: String,
    /// Content hash of the saved chart payload
    pub content_hash: String,
}

/// One probing site in the export table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    /// Universal tooth number
    pub tooth: u8,
    /// FDI tooth code
    pub fdi: u8,
    pub surface: String,
    pub position: String,
    pub pocket_depth_mm: u8,
    pub recession_mm: i8,
    /// Derived: pocket depth + recession
    pub attachment_level_mm: i16,
    pub bleeding: bool,
    pub suppuration: bool,
    pub plaque: bool,
    pub calculus: bool,
}

impl ChartSummaryExport {
    /// Build an export from a chart and its stored content hash.
    pub fn from_chart(chart: &PerioChart, content_hash: &str) -> Self {
        let Assessment {
            severity,
            factors,
            statistics,
        } = classify(chart);

        let sites = chart
            .sites()
            .map(|(tooth, surface, position, site)| SiteSummary {
                tooth: tooth.universal(),
                fdi: tooth.fdi(),
                surface: surface.as_str().to_string(),
                position: position.as_str().to_string(),
                pocket_depth_mm: site.pocket_depth_mm,
                recession_mm: site.recession_mm,
                attachment_level_mm: site.attachment_level_mm(),
                bleeding: site.bleeding,
                suppuration: site.suppuration,
                plaque: site.plaque,
                calculus: site.calculus,
            })
            .collect();

        Self {
            metadata: SummaryMetadata {
                chart_id: chart.chart_id.clone(),
                patient_id: chart.patient_id.clone(),
                examiner: chart.examiner.clone(),
                examined_at: chart.examined_at.clone(),
                exported_at: chrono::Utc::now().to_rfc3339(),
                content_hash: content_hash.to_string(),
            },
            statistics,
            severity: severity.as_str().to_string(),
            contributing_factors: factors,
            sites,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one row per probing site.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("chart_id,patient_id,examiner,tooth,fdi,surface,position,pocket_depth_mm,recession_mm,attachment_level_mm,bleeding,suppuration,plaque,calculus\n");

        // Lines
        for site in &self.sites {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&self.metadata.chart_id),
                escape_csv(&self.metadata.patient_id),
                escape_csv(&self.metadata.examiner),
                site.tooth,
                site.fdi,
                site.surface,
                site.position,
                site.pocket_depth_mm,
                site.recession_mm,
                site.attachment_level_mm,
                site.bleeding,
                site.suppuration,
                site.plaque,
                site.calculus,
            ));
        }

        csv
    }
}

/// Batch export of a patient's chart history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientChartExport {
    pub patient_id: String,
    /// Export timestamp
    pub exported_at: String,
    /// Individual chart exports, newest examination first
    pub charts: Vec<ChartSummaryExport>,
}

impl PatientChartExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Chart exporter reading saved charts from the store.
pub struct ChartExporter<'a> {
    db: &'a Database,
}

impl<'a> ChartExporter<'a> {
    /// Create a new chart exporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Export a single saved chart.
    pub fn export_chart(&self, chart_id: &str) -> DbResult<ChartSummaryExport> {
        let chart = self
            .db
            .get_chart(chart_id)?
            .ok_or_else(|| DbError::NotFound(chart_id.to_string()))?;
        let hash = self
            .db
            .get_chart_hash(chart_id)?
            .ok_or_else(|| DbError::NotFound(chart_id.to_string()))?;

        Ok(ChartSummaryExport::from_chart(&chart, &hash))
    }

    /// Export a patient's full chart history.
    pub fn export_patient(&self, patient_id: &str) -> DbResult<PatientChartExport> {
        let commits = self.db.list_chart_commits(patient_id)?;
        let mut charts = Vec::with_capacity(commits.len());

        for commit in commits {
            charts.push(self.export_chart(&commit.chart_id)?);
        }

        Ok(PatientChartExport {
            patient_id: patient_id.to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            charts,
        })
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
