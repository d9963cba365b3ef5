//! Chart persistence: whole-unit saves with content hashing.
//!
//! A chart row stores the canonical JSON payload plus its SHA-256 hash.
//! Loads re-hash the payload and fail on mismatch. There is no partial
//! update path; each save writes the full chart, and each examination gets
//! its own row.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Database, DbError, DbResult};
use crate::models::PerioChart;

/// Receipt for a saved chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartCommit {
    pub chart_id: String,
    pub patient_id: String,
    pub examined_at: String,
    /// SHA-256 hex of the canonical chart payload.
    pub content_hash: String,
}

/// Hash a chart payload.
pub fn hash_payload(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

impl Database {
    /// Save a chart as a whole unit. Re-saving the same chart ID replaces
    /// the stored payload (same examination, saved again); a new
    /// examination uses a new chart and never touches prior rows.
    pub fn save_chart(&self, chart: &PerioChart) -> DbResult<ChartCommit> {
        if self.get_patient(&chart.patient_id)?.is_none() {
            return Err(DbError::NotFound(chart.patient_id.clone()));
        }

        let payload = chart.to_canonical_json()?;
        let content_hash = hash_payload(payload.as_bytes());

        self.conn.execute(
            r#"
            INSERT INTO perio_charts (
                chart_id, patient_id, examiner, examined_at, payload, content_hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(chart_id) DO UPDATE SET
                examiner = excluded.examiner,
                examined_at = excluded.examined_at,
                payload = excluded.payload,
                content_hash = excluded.content_hash,
                updated_at = datetime('now')
            "#,
            params![
                chart.chart_id,
                chart.patient_id,
                chart.examiner,
                chart.examined_at,
                payload,
                content_hash,
            ],
        )?;

        tracing::info!(chart_id = %chart.chart_id, hash = %content_hash, "saved chart");

        Ok(ChartCommit {
            chart_id: chart.chart_id.clone(),
            patient_id: chart.patient_id.clone(),
            examined_at: chart.examined_at.clone(),
            content_hash,
        })
    }

    /// Load a chart, verifying the stored content hash.
    pub fn get_chart(&self, chart_id: &str) -> DbResult<Option<PerioChart>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT payload, content_hash FROM perio_charts WHERE chart_id = ?",
                [chart_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((payload, stored_hash)) = row else {
            return Ok(None);
        };

        let actual = hash_payload(payload.as_bytes());
        if actual != stored_hash {
            return Err(DbError::Integrity(format!(
                "chart {} payload hash {} does not match stored {}",
                chart_id, actual, stored_hash
            )));
        }

        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Get the stored content hash for a chart.
    pub fn get_chart_hash(&self, chart_id: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT content_hash FROM perio_charts WHERE chart_id = ?",
                [chart_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a patient's chart commits, newest examination first.
    pub fn list_chart_commits(&self, patient_id: &str) -> DbResult<Vec<ChartCommit>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT chart_id, patient_id, examined_at, content_hash
            FROM perio_charts
            WHERE patient_id = ?
            ORDER BY examined_at DESC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], |row| {
            Ok(ChartCommit {
                chart_id: row.get(0)?,
                patient_id: row.get(1)?,
                examined_at: row.get(2)?,
                content_hash: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
