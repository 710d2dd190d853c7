use crate::core::{Viewport, ZoomTier};

/// Pure mapping between day offsets from the reference instant and screen x.
///
/// The horizontal origin is the viewport center; `offset_px` is the current
/// pan offset. Every reference year is exactly 365 pixel-days wide at every
/// tier, leap years included; calendar gridlines are placed with real
/// calendar arithmetic, so their spacing near leap years is approximate by
/// design rather than a defect.
///
/// Both conversions are total over finite inputs and exact inverses of each
/// other within floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    center_x: f64,
}

impl TimeScale {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            center_x: f64::from(viewport.width) / 2.0,
        }
    }

    #[must_use]
    pub const fn center_x(self) -> f64 {
        self.center_x
    }

    /// Screen x of a signed day offset under `tier` at pan `offset_px`.
    #[must_use]
    pub fn days_to_x(self, days: f64, tier: &ZoomTier, offset_px: f64) -> f64 {
        self.center_x + days * tier.pixels_per_day() + offset_px
    }

    /// Signed day offset shown at screen `x` under `tier` at pan `offset_px`.
    #[must_use]
    pub fn x_to_days(self, x: f64, tier: &ZoomTier, offset_px: f64) -> f64 {
        (x - self.center_x - offset_px) / tier.pixels_per_day()
    }
}
