//! Periodontal chart: the per-examination measurement grid.
//!
//! One chart holds six probing sites per tooth (facial and lingual surfaces,
//! three positions each) plus per-tooth mobility, furcation and implant
//! fields. Setters validate against the chart's configured limits and reject
//! out-of-range input without touching the grid; derived values (attachment
//! level, aggregate statistics) are computed on read and never stored.

use serde::{Deserialize, Serialize};

use super::{ChartError, SiteFlag, SitePosition, Surface, ToothId, TOOTH_COUNT};

/// Highest mobility/furcation grade.
pub const MAX_GRADE: u8 = 3;

/// Probing sites per chart: 32 teeth x 2 surfaces x 3 positions.
pub const SITE_COUNT: u32 = (TOOTH_COUNT * 6) as u32;

/// Configured valid ranges for numeric measurements.
///
/// Out-of-range input is rejected at the setter, never clamped, so
/// data-entry mistakes surface instead of being masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementLimits {
    /// Maximum accepted pocket depth in mm.
    pub max_pocket_depth_mm: u8,
    /// Minimum accepted recession in mm (negative = margin coronal to the CEJ).
    pub min_recession_mm: i8,
    /// Maximum accepted recession in mm.
    pub max_recession_mm: i8,
}

impl Default for MeasurementLimits {
    fn default() -> Self {
        Self {
            max_pocket_depth_mm: 15,
            min_recession_mm: -10,
            max_recession_mm: 15,
        }
    }
}

/// Clinical readings at one probing site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Gingival margin to base of sulcus, mm.
    pub pocket_depth_mm: u8,
    /// Margin migration from the CEJ, mm; negative when coronal.
    pub recession_mm: i8,
    pub bleeding: bool,
    pub suppuration: bool,
    pub plaque: bool,
    pub calculus: bool,
}

impl SiteRecord {
    /// Clinical attachment level: pocket depth + recession.
    ///
    /// Derived on read; a persisted chart stores only the two source values.
    pub fn attachment_level_mm(&self) -> i16 {
        self.pocket_depth_mm as i16 + self.recession_mm as i16
    }

    /// Read one boolean finding.
    pub fn flag(&self, flag: SiteFlag) -> bool {
        match flag {
            SiteFlag::Bleeding => self.bleeding,
            SiteFlag::Suppuration => self.suppuration,
            SiteFlag::Plaque => self.plaque,
            SiteFlag::Calculus => self.calculus,
        }
    }

    fn flag_mut(&mut self, flag: SiteFlag) -> &mut bool {
        match flag {
            SiteFlag::Bleeding => &mut self.bleeding,
            SiteFlag::Suppuration => &mut self.suppuration,
            SiteFlag::Plaque => &mut self.plaque,
            SiteFlag::Calculus => &mut self.calculus,
        }
    }
}

/// The three probing sites along one surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRecord {
    pub mesial: SiteRecord,
    pub mid: SiteRecord,
    pub distal: SiteRecord,
}

impl SurfaceRecord {
    pub fn site(&self, position: SitePosition) -> &SiteRecord {
        match position {
            SitePosition::Mesial => &self.mesial,
            SitePosition::Mid => &self.mid,
            SitePosition::Distal => &self.distal,
        }
    }

    fn site_mut(&mut self, position: SitePosition) -> &mut SiteRecord {
        match position {
            SitePosition::Mesial => &mut self.mesial,
            SitePosition::Mid => &mut self.mid,
            SitePosition::Distal => &mut self.distal,
        }
    }
}

/// All measurements for one tooth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothRecord {
    pub facial: SurfaceRecord,
    pub lingual: SurfaceRecord,
    /// Mobility grade 0-3.
    pub mobility: u8,
    /// Furcation involvement grade 0-3, facial aspect.
    pub facial_furcation: u8,
    /// Furcation involvement grade 0-3, lingual aspect.
    pub lingual_furcation: u8,
    pub implant: bool,
}

impl ToothRecord {
    pub fn surface(&self, surface: Surface) -> &SurfaceRecord {
        match surface {
            Surface::Facial => &self.facial,
            Surface::Lingual => &self.lingual,
        }
    }

    fn surface_mut(&mut self, surface: Surface) -> &mut SurfaceRecord {
        match surface {
            Surface::Facial => &mut self.facial,
            Surface::Lingual => &mut self.lingual,
        }
    }

    pub fn furcation(&self, surface: Surface) -> u8 {
        match surface {
            Surface::Facial => self.facial_furcation,
            Surface::Lingual => self.lingual_furcation,
        }
    }
}

/// One periodontal examination: metadata plus the full measurement grid.
///
/// Created empty when an examination begins, mutated cell-by-cell during
/// charting, persisted as a whole unit on save. A new examination creates a
/// new chart; history is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerioChart {
    /// Unique chart ID.
    pub chart_id: String,
    /// Patient this examination belongs to.
    pub patient_id: String,
    /// Examiner identifier.
    pub examiner: String,
    /// Examination timestamp (RFC 3339).
    pub examined_at: String,
    /// Free-text clinical notes.
    pub notes: Option<String>,
    /// Configured measurement ranges.
    #[serde(default)]
    pub limits: MeasurementLimits,
    /// Tooth records in Universal order (index 0 = tooth 1).
    pub teeth: [ToothRecord; TOOTH_COUNT],
}

impl PerioChart {
    /// Create an empty chart for a new examination: all numeric fields zero,
    /// all booleans false.
    pub fn new(patient_id: String, examiner: String) -> Self {
        Self {
            chart_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            examiner,
            examined_at: chrono::Utc::now().to_rfc3339(),
            notes: None,
            limits: MeasurementLimits::default(),
            teeth: [ToothRecord::default(); TOOTH_COUNT],
        }
    }

    pub fn tooth(&self, tooth: ToothId) -> &ToothRecord {
        &self.teeth[tooth.index()]
    }

    pub fn site(&self, tooth: ToothId, surface: Surface, position: SitePosition) -> &SiteRecord {
        self.tooth(tooth).surface(surface).site(position)
    }

    fn site_mut(
        &mut self,
        tooth: ToothId,
        surface: Surface,
        position: SitePosition,
    ) -> &mut SiteRecord {
        self.teeth[tooth.index()]
            .surface_mut(surface)
            .site_mut(position)
    }

    /// Record a pocket depth reading. Rejects values above the configured
    /// maximum without modifying the stored value.
    pub fn set_pocket_depth(
        &mut self,
        tooth: ToothId,
        surface: Surface,
        position: SitePosition,
        mm: u8,
    ) -> Result<(), ChartError> {
        if mm > self.limits.max_pocket_depth_mm {
            return Err(ChartError::OutOfRange {
                field: "pocket depth",
                value: mm as i16,
                min: 0,
                max: self.limits.max_pocket_depth_mm as i16,
            });
        }
        self.site_mut(tooth, surface, position).pocket_depth_mm = mm;
        Ok(())
    }

    /// Record a recession reading. Negative values (margin coronal to the
    /// CEJ) are valid down to the configured minimum.
    pub fn set_recession(
        &mut self,
        tooth: ToothId,
        surface: Surface,
        position: SitePosition,
        mm: i8,
    ) -> Result<(), ChartError> {
        if mm < self.limits.min_recession_mm || mm > self.limits.max_recession_mm {
            return Err(ChartError::OutOfRange {
                field: "recession",
                value: mm as i16,
                min: self.limits.min_recession_mm as i16,
                max: self.limits.max_recession_mm as i16,
            });
        }
        self.site_mut(tooth, surface, position).recession_mm = mm;
        Ok(())
    }

    /// Flip one boolean finding at one site; no other cell changes.
    /// Returns the new value.
    pub fn toggle_flag(
        &mut self,
        tooth: ToothId,
        surface: Surface,
        position: SitePosition,
        flag: SiteFlag,
    ) -> bool {
        let value = self.site_mut(tooth, surface, position).flag_mut(flag);
        *value = !*value;
        *value
    }

    /// Set the mobility grade (0-3) for one tooth.
    pub fn set_mobility(&mut self, tooth: ToothId, grade: u8) -> Result<(), ChartError> {
        if grade > MAX_GRADE {
            return Err(ChartError::InvalidGrade {
                field: "mobility",
                grade,
            });
        }
        self.teeth[tooth.index()].mobility = grade;
        Ok(())
    }

    /// Set the furcation involvement grade (0-3) for one tooth surface.
    pub fn set_furcation(
        &mut self,
        tooth: ToothId,
        surface: Surface,
        grade: u8,
    ) -> Result<(), ChartError> {
        if grade > MAX_GRADE {
            return Err(ChartError::InvalidGrade {
                field: "furcation",
                grade,
            });
        }
        let record = &mut self.teeth[tooth.index()];
        match surface {
            Surface::Facial => record.facial_furcation = grade,
            Surface::Lingual => record.lingual_furcation = grade,
        }
        Ok(())
    }

    pub fn set_implant(&mut self, tooth: ToothId, implant: bool) {
        self.teeth[tooth.index()].implant = implant;
    }

    /// Clinical attachment level at one site: pocket depth + recession,
    /// recomputed on every read.
    pub fn attachment_level(
        &self,
        tooth: ToothId,
        surface: Surface,
        position: SitePosition,
    ) -> i16 {
        self.site(tooth, surface, position).attachment_level_mm()
    }

    /// Iterate every probing site with its address, in Universal order.
    pub fn sites(&self) -> impl Iterator<Item = (ToothId, Surface, SitePosition, &SiteRecord)> + '_ {
        ToothId::all().flat_map(move |tooth| {
            let record = self.tooth(tooth);
            Surface::ALL.into_iter().flat_map(move |surface| {
                SitePosition::ALL
                    .into_iter()
                    .map(move |position| (tooth, surface, position, record.surface(surface).site(position)))
            })
        })
    }

    /// Reduce the full grid into aggregate statistics.
    pub fn statistics(&self) -> ChartStatistics {
        let mut stats = ChartStatistics {
            total_sites: SITE_COUNT,
            ..ChartStatistics::default()
        };

        for (_, _, _, site) in self.sites() {
            if site.bleeding {
                stats.bleeding_sites += 1;
            }
            if site.plaque {
                stats.plaque_sites += 1;
            }
            if site.suppuration {
                stats.suppuration_sites += 1;
            }
            if site.calculus {
                stats.calculus_sites += 1;
            }
            if site.pocket_depth_mm >= 5 {
                stats.deep_pocket_sites += 1;
            }
            if site.pocket_depth_mm > 6 {
                stats.severe_pocket_sites += 1;
            }
            stats.max_pocket_depth_mm = stats.max_pocket_depth_mm.max(site.pocket_depth_mm);
            stats.max_attachment_level_mm =
                stats.max_attachment_level_mm.max(site.attachment_level_mm());
        }

        stats.bleeding_percent = percent(stats.bleeding_sites, stats.total_sites);
        stats.plaque_percent = percent(stats.plaque_sites, stats.total_sites);
        stats.mobile_teeth = self
            .teeth
            .iter()
            .filter(|t| t.mobility >= 2)
            .count() as u32;
        stats.furcation_teeth = self
            .teeth
            .iter()
            .filter(|t| t.facial_furcation > 0 || t.lingual_furcation > 0)
            .count() as u32;

        stats
    }

    /// Serialize to canonical JSON for content hashing and persistence.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Aggregate statistics reduced from every probing site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartStatistics {
    /// Total probing sites in the grid (fixed at 192).
    pub total_sites: u32,
    pub bleeding_sites: u32,
    pub plaque_sites: u32,
    pub suppuration_sites: u32,
    pub calculus_sites: u32,
    /// Bleeding-on-probing rate, rounded to the nearest integer percent.
    pub bleeding_percent: u8,
    /// Plaque rate, rounded to the nearest integer percent.
    pub plaque_percent: u8,
    /// Sites probing at 5 mm or deeper.
    pub deep_pocket_sites: u32,
    /// Sites probing deeper than 6 mm.
    pub severe_pocket_sites: u32,
    pub max_pocket_depth_mm: u8,
    pub max_attachment_level_mm: i16,
    /// Teeth with mobility grade 2 or higher.
    pub mobile_teeth: u32,
    /// Teeth with any furcation involvement.
    pub furcation_teeth: u32,
}

fn percent(count: u32, total: u32) -> u8 {
    ((count as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooth(n: u8) -> ToothId {
        ToothId::from_universal(n).unwrap()
    }

    fn make_chart() -> PerioChart {
        PerioChart::new("patient-123".into(), "Dr. Okafor".into())
    }

    #[test]
    fn test_new_chart_is_empty() {
        let chart = make_chart();
        assert_eq!(chart.chart_id.len(), 36);
        for (_, _, _, site) in chart.sites() {
            assert_eq!(*site, SiteRecord::default());
        }
        let stats = chart.statistics();
        assert_eq!(stats.bleeding_percent, 0);
        assert_eq!(stats.plaque_percent, 0);
        assert_eq!(stats.total_sites, 192);
    }

    #[test]
    fn test_attachment_level_is_sum() {
        let mut chart = make_chart();
        let t = tooth(19);
        chart
            .set_pocket_depth(t, Surface::Facial, SitePosition::Distal, 6)
            .unwrap();
        chart
            .set_recession(t, Surface::Facial, SitePosition::Distal, 2)
            .unwrap();
        assert_eq!(
            chart.attachment_level(t, Surface::Facial, SitePosition::Distal),
            8
        );
    }

    #[test]
    fn test_attachment_level_negative_recession() {
        let mut chart = make_chart();
        let t = tooth(8);
        chart
            .set_pocket_depth(t, Surface::Lingual, SitePosition::Mid, 4)
            .unwrap();
        chart
            .set_recession(t, Surface::Lingual, SitePosition::Mid, -3)
            .unwrap();
        assert_eq!(
            chart.attachment_level(t, Surface::Lingual, SitePosition::Mid),
            1
        );
    }

    #[test]
    fn test_out_of_range_pocket_depth_rejected() {
        let mut chart = make_chart();
        let t = tooth(3);
        chart
            .set_pocket_depth(t, Surface::Facial, SitePosition::Mesial, 7)
            .unwrap();

        let err = chart
            .set_pocket_depth(t, Surface::Facial, SitePosition::Mesial, 16)
            .unwrap_err();
        assert!(matches!(err, ChartError::OutOfRange { field: "pocket depth", .. }));

        // Prior value untouched.
        assert_eq!(
            chart.site(t, Surface::Facial, SitePosition::Mesial).pocket_depth_mm,
            7
        );
    }

    #[test]
    fn test_out_of_range_recession_rejected() {
        let mut chart = make_chart();
        let t = tooth(3);
        assert!(chart
            .set_recession(t, Surface::Facial, SitePosition::Mid, -11)
            .is_err());
        assert!(chart
            .set_recession(t, Surface::Facial, SitePosition::Mid, 16)
            .is_err());
        assert_eq!(chart.site(t, Surface::Facial, SitePosition::Mid).recession_mm, 0);
    }

    #[test]
    fn test_toggle_involution() {
        let mut chart = make_chart();
        let t = tooth(14);
        for flag in SiteFlag::ALL {
            let before = *chart.site(t, Surface::Facial, SitePosition::Mid);
            assert!(chart.toggle_flag(t, Surface::Facial, SitePosition::Mid, flag));
            assert!(!chart.toggle_flag(t, Surface::Facial, SitePosition::Mid, flag));
            assert_eq!(*chart.site(t, Surface::Facial, SitePosition::Mid), before);
        }
    }

    #[test]
    fn test_toggle_touches_single_cell() {
        let mut chart = make_chart();
        chart.toggle_flag(tooth(5), Surface::Facial, SitePosition::Mesial, SiteFlag::Bleeding);

        let flagged: Vec<_> = chart
            .sites()
            .filter(|(_, _, _, site)| site.bleeding)
            .collect();
        assert_eq!(flagged.len(), 1);
        let (t, surface, position, _) = flagged[0];
        assert_eq!(t.universal(), 5);
        assert_eq!(surface, Surface::Facial);
        assert_eq!(position, SitePosition::Mesial);
    }

    #[test]
    fn test_mobility_grade_validation() {
        let mut chart = make_chart();
        let t = tooth(14);
        chart.set_mobility(t, 3).unwrap();
        assert_eq!(
            chart.set_mobility(t, 4),
            Err(ChartError::InvalidGrade {
                field: "mobility",
                grade: 4
            })
        );
        assert_eq!(chart.tooth(t).mobility, 3);
    }

    #[test]
    fn test_mobility_isolated_to_one_tooth() {
        let mut chart = make_chart();
        let before = chart.clone();
        chart.set_mobility(tooth(14), 2).unwrap();

        for t in ToothId::all() {
            if t.universal() == 14 {
                assert_eq!(chart.tooth(t).mobility, 2);
            } else {
                assert_eq!(chart.tooth(t), before.tooth(t));
            }
        }
    }

    #[test]
    fn test_furcation_per_surface() {
        let mut chart = make_chart();
        let t = tooth(19);
        chart.set_furcation(t, Surface::Facial, 2).unwrap();
        assert_eq!(chart.tooth(t).furcation(Surface::Facial), 2);
        assert_eq!(chart.tooth(t).furcation(Surface::Lingual), 0);
        assert!(chart.set_furcation(t, Surface::Lingual, 4).is_err());
    }

    #[test]
    fn test_bleeding_percent_all_true() {
        let mut chart = make_chart();
        for t in ToothId::all() {
            for surface in Surface::ALL {
                for position in SitePosition::ALL {
                    chart.toggle_flag(t, surface, position, SiteFlag::Bleeding);
                }
            }
        }
        assert_eq!(chart.statistics().bleeding_percent, 100);
    }

    #[test]
    fn test_bleeding_percent_rounding() {
        let mut chart = make_chart();
        // 10 of 192 sites = 5.2%, rounds to 5.
        let mut toggled = 0;
        'outer: for t in ToothId::all() {
            for position in SitePosition::ALL {
                if toggled == 10 {
                    break 'outer;
                }
                chart.toggle_flag(t, Surface::Facial, position, SiteFlag::Bleeding);
                toggled += 1;
            }
        }
        let stats = chart.statistics();
        assert_eq!(stats.bleeding_sites, 10);
        assert_eq!(stats.bleeding_percent, 5);
    }

    #[test]
    fn test_custom_limits() {
        let mut chart = make_chart();
        chart.limits = MeasurementLimits {
            max_pocket_depth_mm: 12,
            min_recession_mm: 0,
            max_recession_mm: 8,
        };
        let t = tooth(1);
        assert!(chart
            .set_pocket_depth(t, Surface::Facial, SitePosition::Mid, 13)
            .is_err());
        assert!(chart
            .set_recession(t, Surface::Facial, SitePosition::Mid, -1)
            .is_err());
        assert!(chart
            .set_pocket_depth(t, Surface::Facial, SitePosition::Mid, 12)
            .is_ok());
    }

    #[test]
    fn test_canonical_json_round_trip() {
        let mut chart = make_chart();
        chart
            .set_pocket_depth(tooth(19), Surface::Facial, SitePosition::Distal, 6)
            .unwrap();
        chart.set_implant(tooth(30), true);
        chart.notes = Some("generalized inflammation".into());

        let json = chart.to_canonical_json().unwrap();
        let restored: PerioChart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, chart);
    }
}
