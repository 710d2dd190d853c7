use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{TimeScale, ZoomTierTable};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::ZoomDirection;

/// Residual below which a pointer-up still counts as a click.
///
/// A drag-release with more animation residual than this is a pan, not a tap.
pub const CLICK_RESIDUAL_THRESHOLD_PX: f64 = 2.0;

/// Easing controls for the inertial pan animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EasingTuning {
    /// Fraction of the residual consumed per tick; lower feels heavier.
    pub easing_factor: f64,
    /// Residual below which the offset snaps onto its target.
    pub settle_epsilon_px: f64,
}

impl Default for EasingTuning {
    fn default() -> Self {
        Self {
            easing_factor: 0.06,
            settle_epsilon_px: 0.1,
        }
    }
}

impl EasingTuning {
    pub fn validate(self) -> TimelineResult<()> {
        if !self.easing_factor.is_finite()
            || self.easing_factor <= 0.0
            || self.easing_factor > 1.0
        {
            return Err(TimelineError::InvalidConfig(
                "easing factor must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.settle_epsilon_px.is_finite() || self.settle_epsilon_px <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "settle epsilon must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Owns the zoom level and the eased pan offset.
///
/// Drags and navigation mutate only `target_offset_px`; the actual
/// `offset_px` chases it one [`tick`](Self::tick) at a time via first-order
/// exponential approach, so the residual shrinks monotonically and never
/// overshoots. Zoom is the one exception: it hard-sets both values so the
/// focal point cannot jump during a tier transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    zoom_level: usize,
    offset_px: f64,
    target_offset_px: f64,
    tuning: EasingTuning,
}

impl ViewportController {
    #[must_use]
    pub fn new(tuning: EasingTuning) -> Self {
        Self {
            zoom_level: 0,
            offset_px: 0.0,
            target_offset_px: 0.0,
            tuning,
        }
    }

    #[must_use]
    pub fn zoom_level(&self) -> usize {
        self.zoom_level
    }

    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    #[must_use]
    pub fn target_offset_px(&self) -> f64 {
        self.target_offset_px
    }

    #[must_use]
    pub fn residual_px(&self) -> f64 {
        self.target_offset_px - self.offset_px
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.offset_px == self.target_offset_px
    }

    /// Snaps the animation target onto the current offset.
    ///
    /// Called at drag start so a stale target from an earlier navigation
    /// cannot jump the view under the pointer.
    pub fn sync_target(&mut self) {
        self.target_offset_px = self.offset_px;
    }

    pub fn pan_target_by(&mut self, delta_px: f64) {
        self.target_offset_px += delta_px;
    }

    /// One animation tick; returns `true` when the offset moved.
    pub fn tick(&mut self) -> bool {
        let residual = self.target_offset_px - self.offset_px;
        if residual == 0.0 {
            return false;
        }
        if residual.abs() <= self.tuning.settle_epsilon_px {
            self.offset_px = self.target_offset_px;
            return true;
        }

        self.offset_px += residual * self.tuning.easing_factor;
        true
    }

    /// Whether a pointer-up at this moment still qualifies as a click.
    #[must_use]
    pub fn click_allowed(&self) -> bool {
        self.residual_px().abs() < CLICK_RESIDUAL_THRESHOLD_PX
    }

    /// Focal-point zoom by one tier step.
    ///
    /// The day offset under `focal_x` is computed against the *current* tier
    /// and the *settled* offset, then mapped back to the same screen x under
    /// the new tier. Refuses (returns `false`) at the ends of the tier table.
    pub fn zoom_step(
        &mut self,
        direction: ZoomDirection,
        focal_x: f64,
        tiers: &ZoomTierTable,
        scale: TimeScale,
    ) -> bool {
        let next_level = match direction {
            ZoomDirection::In => {
                if self.zoom_level >= tiers.last_level() {
                    return false;
                }
                self.zoom_level + 1
            }
            ZoomDirection::Out => match self.zoom_level.checked_sub(1) {
                Some(level) => level,
                None => return false,
            },
        };

        let current = tiers.tier(self.zoom_level);
        let day_offset = scale.x_to_days(focal_x, current, self.offset_px);
        let next = tiers.tier(next_level);
        let new_offset = focal_x - scale.center_x() - day_offset * next.pixels_per_day();

        // Hard cut, not eased: both values move together so the point under
        // the cursor stays put through the transition.
        self.zoom_level = next_level;
        self.offset_px = new_offset;
        self.target_offset_px = new_offset;
        debug!(
            level = self.zoom_level,
            offset_px = self.offset_px,
            "zoom step"
        );
        true
    }

    /// Clamped direct zoom-level set; offsets are left untouched.
    pub fn set_zoom_level(&mut self, level: usize, tiers: &ZoomTierTable) {
        self.zoom_level = tiers.clamp_level(level);
    }

    /// Eases back to the reference instant under the viewport center.
    pub fn go_to_today(&mut self) {
        self.target_offset_px = 0.0;
    }

    /// Eases toward the date `day_offset` days from the reference.
    ///
    /// Moving content *to* the fixed center means shifting the origin the
    /// opposite way, hence the sign flip.
    pub fn go_to_day_offset(&mut self, day_offset: f64, tiers: &ZoomTierTable) {
        let tier = tiers.tier(self.zoom_level);
        self.target_offset_px = -(day_offset * tier.pixels_per_day());
    }
}
