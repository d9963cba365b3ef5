//! Dentition: the closed set of 32 adult teeth and the probing-site vocabulary.
//!
//! Universal numbering (1-32) is canonical throughout the crate; FDI two-digit
//! codes are converted at the boundary only.

use serde::{Deserialize, Serialize};

use super::ChartError;

/// One of the 32 adult teeth, identified by Universal number.
///
/// The set is closed: construction outside 1-32 fails, and lookups never
/// create new teeth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothId(u8);

/// Number of teeth in the adult dentition.
pub const TOOTH_COUNT: usize = 32;

impl ToothId {
    /// Create from a Universal number (1-32).
    pub fn from_universal(n: u8) -> Result<Self, ChartError> {
        if (1..=32).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ChartError::UnknownTooth(n))
        }
    }

    /// Create from an FDI two-digit code (11-18, 21-28, 31-38, 41-48).
    pub fn from_fdi(code: u8) -> Result<Self, ChartError> {
        let quadrant = code / 10;
        let position = code % 10;
        if !(1..=4).contains(&quadrant) || !(1..=8).contains(&position) {
            return Err(ChartError::UnknownFdiTooth(code));
        }
        let universal = match quadrant {
            1 => 9 - position,
            2 => 8 + position,
            3 => 25 - position,
            _ => 24 + position,
        };
        Ok(Self(universal))
    }

    /// Universal number (1-32).
    pub fn universal(self) -> u8 {
        self.0
    }

    /// FDI two-digit code.
    pub fn fdi(self) -> u8 {
        let n = self.0;
        match n {
            1..=8 => 10 + (9 - n),
            9..=16 => 20 + (n - 8),
            17..=24 => 30 + (25 - n),
            _ => 40 + (n - 24),
        }
    }

    /// Upper or lower arch.
    pub fn arch(self) -> Arch {
        if self.0 <= 16 {
            Arch::Upper
        } else {
            Arch::Lower
        }
    }

    /// Quadrant, in FDI order.
    pub fn quadrant(self) -> Quadrant {
        match self.0 {
            1..=8 => Quadrant::UpperRight,
            9..=16 => Quadrant::UpperLeft,
            17..=24 => Quadrant::LowerLeft,
            _ => Quadrant::LowerRight,
        }
    }

    /// Iterate the full dentition in Universal order.
    pub fn all() -> impl Iterator<Item = ToothId> {
        (1..=32).map(ToothId)
    }

    /// Zero-based grid index.
    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for ToothId {
    type Error = ChartError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_universal(n)
    }
}

impl From<ToothId> for u8 {
    fn from(tooth: ToothId) -> u8 {
        tooth.0
    }
}

impl std::fmt::Display for ToothId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dental arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Upper,
    Lower,
}

/// Quadrant of the dentition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// Measured tooth surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Facial/buccal surface.
    Facial,
    /// Lingual/palatal surface.
    Lingual,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Facial, Surface::Lingual];

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Facial => "facial",
            Surface::Lingual => "lingual",
        }
    }

    /// Parse a boundary keyword ("facial"/"buccal", "lingual"/"palatal").
    pub fn parse(s: &str) -> Result<Self, ChartError> {
        match s.to_lowercase().as_str() {
            "facial" | "buccal" => Ok(Surface::Facial),
            "lingual" | "palatal" => Ok(Surface::Lingual),
            _ => Err(ChartError::UnknownKeyword {
                field: "surface",
                value: s.to_string(),
            }),
        }
    }
}

/// Probing site within a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitePosition {
    Mesial,
    Mid,
    Distal,
}

impl SitePosition {
    pub const ALL: [SitePosition; 3] = [SitePosition::Mesial, SitePosition::Mid, SitePosition::Distal];

    pub fn as_str(self) -> &'static str {
        match self {
            SitePosition::Mesial => "mesial",
            SitePosition::Mid => "mid",
            SitePosition::Distal => "distal",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ChartError> {
        match s.to_lowercase().as_str() {
            "mesial" => Ok(SitePosition::Mesial),
            "mid" | "middle" => Ok(SitePosition::Mid),
            "distal" => Ok(SitePosition::Distal),
            _ => Err(ChartError::UnknownKeyword {
                field: "position",
                value: s.to_string(),
            }),
        }
    }
}

/// Toggleable per-site boolean finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteFlag {
    Bleeding,
    Suppuration,
    Plaque,
    Calculus,
}

impl SiteFlag {
    pub const ALL: [SiteFlag; 4] = [
        SiteFlag::Bleeding,
        SiteFlag::Suppuration,
        SiteFlag::Plaque,
        SiteFlag::Calculus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SiteFlag::Bleeding => "bleeding",
            SiteFlag::Suppuration => "suppuration",
            SiteFlag::Plaque => "plaque",
            SiteFlag::Calculus => "calculus",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ChartError> {
        match s.to_lowercase().as_str() {
            "bleeding" | "bop" => Ok(SiteFlag::Bleeding),
            "suppuration" => Ok(SiteFlag::Suppuration),
            "plaque" => Ok(SiteFlag::Plaque),
            "calculus" => Ok(SiteFlag::Calculus),
            _ => Err(ChartError::UnknownKeyword {
                field: "flag",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_bounds() {
        assert!(ToothId::from_universal(1).is_ok());
        assert!(ToothId::from_universal(32).is_ok());
        assert_eq!(
            ToothId::from_universal(0),
            Err(ChartError::UnknownTooth(0))
        );
        assert_eq!(
            ToothId::from_universal(33),
            Err(ChartError::UnknownTooth(33))
        );
    }

    #[test]
    fn test_fdi_conversion() {
        // Universal 19 is the lower left first molar, FDI 36.
        let tooth = ToothId::from_universal(19).unwrap();
        assert_eq!(tooth.fdi(), 36);
        assert_eq!(ToothId::from_fdi(36).unwrap(), tooth);

        // Universal 30 is the lower right first molar, FDI 46.
        assert_eq!(ToothId::from_universal(30).unwrap().fdi(), 46);

        // Upper right third molar.
        assert_eq!(ToothId::from_universal(1).unwrap().fdi(), 18);
        // Upper left central incisor.
        assert_eq!(ToothId::from_universal(9).unwrap().fdi(), 21);
    }

    #[test]
    fn test_fdi_round_trip() {
        for tooth in ToothId::all() {
            assert_eq!(ToothId::from_fdi(tooth.fdi()).unwrap(), tooth);
        }
    }

    #[test]
    fn test_invalid_fdi() {
        for code in [0, 10, 19, 29, 30, 50, 99] {
            assert_eq!(
                ToothId::from_fdi(code),
                Err(ChartError::UnknownFdiTooth(code))
            );
        }
    }

    #[test]
    fn test_arch_and_quadrant() {
        assert_eq!(ToothId::from_universal(3).unwrap().arch(), Arch::Upper);
        assert_eq!(ToothId::from_universal(19).unwrap().arch(), Arch::Lower);
        assert_eq!(
            ToothId::from_universal(3).unwrap().quadrant(),
            Quadrant::UpperRight
        );
        assert_eq!(
            ToothId::from_universal(12).unwrap().quadrant(),
            Quadrant::UpperLeft
        );
        assert_eq!(
            ToothId::from_universal(19).unwrap().quadrant(),
            Quadrant::LowerLeft
        );
        assert_eq!(
            ToothId::from_universal(30).unwrap().quadrant(),
            Quadrant::LowerRight
        );
    }

    #[test]
    fn test_all_covers_dentition() {
        let all: Vec<ToothId> = ToothId::all().collect();
        assert_eq!(all.len(), TOOTH_COUNT);
        assert_eq!(all[0].universal(), 1);
        assert_eq!(all[31].universal(), 32);
    }

    #[test]
    fn test_surface_parse() {
        assert_eq!(Surface::parse("facial").unwrap(), Surface::Facial);
        assert_eq!(Surface::parse("Buccal").unwrap(), Surface::Facial);
        assert_eq!(Surface::parse("palatal").unwrap(), Surface::Lingual);
        assert!(Surface::parse("occlusal").is_err());
    }

    #[test]
    fn test_flag_parse() {
        assert_eq!(SiteFlag::parse("BOP").unwrap(), SiteFlag::Bleeding);
        assert!(SiteFlag::parse("stain").is_err());
    }
}
