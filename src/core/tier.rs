use serde::{Deserialize, Serialize};

use crate::core::calendar::DAYS_PER_REFERENCE_YEAR;
use crate::error::{TimelineError, TimelineResult};

/// One discrete zoom level: ruler magnification plus the calendar
/// granularities the renderer draws at that level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomTier {
    pub id: u32,
    /// Translation key for the tier name shown by the zoom indicator.
    pub label_key: String,
    pub pixels_per_year: f64,
    #[serde(default)]
    pub show_months: bool,
    #[serde(default)]
    pub show_days: bool,
    #[serde(default)]
    pub show_hours: bool,
}

impl ZoomTier {
    #[must_use]
    pub fn pixels_per_day(&self) -> f64 {
        self.pixels_per_year / DAYS_PER_REFERENCE_YEAR
    }
}

/// Ordered zoom-tier table; the index is the zoom level.
///
/// Invariant: `pixels_per_year` is strictly increasing with the index, so
/// stepping the level up always magnifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoomTier>", into = "Vec<ZoomTier>")]
pub struct ZoomTierTable {
    tiers: Vec<ZoomTier>,
}

impl ZoomTierTable {
    pub fn new(tiers: Vec<ZoomTier>) -> TimelineResult<Self> {
        if tiers.is_empty() {
            return Err(TimelineError::InvalidConfig(
                "zoom tier table must not be empty".to_owned(),
            ));
        }

        let mut previous = 0.0_f64;
        for tier in &tiers {
            if !tier.pixels_per_year.is_finite() || tier.pixels_per_year <= 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "tier `{}` pixels_per_year must be finite and > 0",
                    tier.id
                )));
            }
            if tier.pixels_per_year <= previous {
                return Err(TimelineError::InvalidConfig(format!(
                    "tier `{}` breaks monotonic magnification: {} <= {previous}",
                    tier.id, tier.pixels_per_year
                )));
            }
            previous = tier.pixels_per_year;
        }

        Ok(Self { tiers })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    #[must_use]
    pub fn last_level(&self) -> usize {
        self.tiers.len() - 1
    }

    #[must_use]
    pub fn clamp_level(&self, level: usize) -> usize {
        level.min(self.last_level())
    }

    /// Tier at `level`, clamped into the valid range.
    #[must_use]
    pub fn tier(&self, level: usize) -> &ZoomTier {
        &self.tiers[self.clamp_level(level)]
    }

    #[must_use]
    pub fn tiers(&self) -> &[ZoomTier] {
        &self.tiers
    }
}

impl Default for ZoomTierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                ZoomTier {
                    id: 1,
                    label_key: "zoom.years".to_owned(),
                    pixels_per_year: 150.0,
                    show_months: false,
                    show_days: false,
                    show_hours: false,
                },
                ZoomTier {
                    id: 2,
                    label_key: "zoom.months".to_owned(),
                    pixels_per_year: 1_800.0,
                    show_months: true,
                    show_days: false,
                    show_hours: false,
                },
                ZoomTier {
                    id: 3,
                    label_key: "zoom.days".to_owned(),
                    pixels_per_year: 10_950.0,
                    show_months: true,
                    show_days: true,
                    show_hours: false,
                },
                ZoomTier {
                    id: 4,
                    label_key: "zoom.hours".to_owned(),
                    pixels_per_year: 131_400.0,
                    show_months: true,
                    show_days: true,
                    show_hours: true,
                },
            ],
        }
    }
}

impl TryFrom<Vec<ZoomTier>> for ZoomTierTable {
    type Error = TimelineError;

    fn try_from(tiers: Vec<ZoomTier>) -> TimelineResult<Self> {
        Self::new(tiers)
    }
}

impl From<ZoomTierTable> for Vec<ZoomTier> {
    fn from(table: ZoomTierTable) -> Self {
        table.tiers
    }
}
