//! Severity classification rules.
//!
//! Canonical thresholds (mm unless noted):
//! - Severe: any site probing deeper than 6, or attachment level above 6
//! - Moderate: any site at 5 or deeper, attachment level of 5 or more,
//!   or bleeding on probing at 30% of sites or more
//! - Mild: any site at 4 or deeper, or bleeding at 10% or more
//! - Healthy: none of the above

use crate::models::{ChartStatistics, PerioChart};

use super::{Assessment, Severity};

/// Pocket depth at or above this counts as a deep site.
const DEEP_POCKET_MM: u8 = 5;

/// Pocket depth or attachment level strictly above this is severe.
const SEVERE_MM: i16 = 6;

/// Pocket depth at or above this counts as early pocketing.
const MILD_POCKET_MM: u8 = 4;

/// Bleeding rate at or above this escalates to moderate.
const BLEEDING_MODERATE_PCT: u8 = 30;

/// Bleeding rate at or above this counts as gingival inflammation.
const BLEEDING_MILD_PCT: u8 = 10;

/// Plaque rate at or above this is reported as a contributing factor.
const PLAQUE_FACTOR_PCT: u8 = 40;

/// Classify a chart. Pure and synchronous: thresholds over the aggregate
/// statistics, nothing else.
pub fn classify(chart: &PerioChart) -> Assessment {
    let statistics = chart.statistics();
    let severity = grade(&statistics);
    let factors = contributing_factors(&statistics);

    tracing::debug!(
        chart_id = %chart.chart_id,
        severity = %severity,
        factor_count = factors.len(),
        "classified chart"
    );

    Assessment {
        severity,
        factors,
        statistics,
    }
}

fn grade(stats: &ChartStatistics) -> Severity {
    if stats.severe_pocket_sites > 0 || stats.max_attachment_level_mm > SEVERE_MM {
        return Severity::Severe;
    }
    if stats.deep_pocket_sites > 0
        || stats.max_attachment_level_mm >= DEEP_POCKET_MM as i16
        || stats.bleeding_percent >= BLEEDING_MODERATE_PCT
    {
        return Severity::Moderate;
    }
    if stats.max_pocket_depth_mm >= MILD_POCKET_MM || stats.bleeding_percent >= BLEEDING_MILD_PCT {
        return Severity::Mild;
    }
    Severity::Healthy
}

fn contributing_factors(stats: &ChartStatistics) -> Vec<String> {
    let mut factors = Vec::new();

    if stats.severe_pocket_sites > 0 {
        factors.push(format!(
            "{} site(s) probing deeper than {} mm",
            stats.severe_pocket_sites, SEVERE_MM
        ));
    }
    if stats.max_attachment_level_mm > SEVERE_MM {
        factors.push(format!(
            "attachment loss of {} mm at the worst site",
            stats.max_attachment_level_mm
        ));
    }
    if stats.deep_pocket_sites > 0 {
        factors.push(format!(
            "{} site(s) probing at {} mm or deeper",
            stats.deep_pocket_sites, DEEP_POCKET_MM
        ));
    } else if stats.max_pocket_depth_mm >= MILD_POCKET_MM {
        factors.push(format!(
            "early pocketing at {} mm",
            stats.max_pocket_depth_mm
        ));
    }
    if stats.bleeding_percent >= BLEEDING_MILD_PCT {
        factors.push(format!(
            "bleeding on probing at {}% of sites",
            stats.bleeding_percent
        ));
    }
    if stats.plaque_percent >= PLAQUE_FACTOR_PCT {
        factors.push(format!("plaque present at {}% of sites", stats.plaque_percent));
    }
    if stats.suppuration_sites > 0 {
        factors.push(format!("suppuration at {} site(s)", stats.suppuration_sites));
    }
    if stats.mobile_teeth > 0 {
        factors.push(format!(
            "{} teeth with mobility grade 2 or higher",
            stats.mobile_teeth
        ));
    }
    if stats.furcation_teeth > 0 {
        factors.push(format!(
            "{} teeth with furcation involvement",
            stats.furcation_teeth
        ));
    }

    factors
}
