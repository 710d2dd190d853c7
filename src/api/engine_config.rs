use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Viewport, ZoomTierTable};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::HitMargins;
use crate::render::{LayoutMetrics, TimelineStyle};

use super::viewport_controller::EasingTuning;

/// Pointer/touch tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputTuning {
    /// Inter-finger distance change required per discrete pinch zoom step.
    pub min_pinch_distance_px: f64,
    pub hit_margins: HitMargins,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            min_pinch_distance_px: 50.0,
            hit_margins: HitMargins::default(),
        }
    }
}

impl InputTuning {
    pub fn validate(self) -> TimelineResult<()> {
        for (value, name) in [
            (self.min_pinch_distance_px, "min_pinch_distance_px"),
            (self.hit_margins.horizontal_px, "hit_margins.horizontal_px"),
            (self.hit_margins.vertical_px, "hit_margins.vertical_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "input tuning `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    /// Anchor for all day-offset math; captured from `Utc::now()` when absent
    /// and never recomputed afterwards.
    #[serde(default)]
    pub reference_instant: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tiers: ZoomTierTable,
    #[serde(default)]
    pub layout: LayoutMetrics,
    #[serde(default)]
    pub input: InputTuning,
    #[serde(default)]
    pub easing: EasingTuning,
    #[serde(default)]
    pub style: TimelineStyle,
}

impl TimelineEngineConfig {
    /// Creates a config with default tiers, metrics and tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            reference_instant: None,
            tiers: ZoomTierTable::default(),
            layout: LayoutMetrics::default(),
            input: InputTuning::default(),
            easing: EasingTuning::default(),
            style: TimelineStyle::default(),
        }
    }

    /// Pins the reference instant instead of capturing `Utc::now()`.
    #[must_use]
    pub fn with_reference_instant(mut self, reference: DateTime<Utc>) -> Self {
        self.reference_instant = Some(reference);
        self
    }

    #[must_use]
    pub fn with_tiers(mut self, tiers: ZoomTierTable) -> Self {
        self.tiers = tiers;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMetrics) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: InputTuning) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: EasingTuning) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        // The tier table enforces its own invariants on construction and
        // deserialization.
        self.layout.validate()?;
        self.input.validate()?;
        self.easing.validate()?;
        self.style.validate()?;
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}
