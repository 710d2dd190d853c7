use serde::{Deserialize, Serialize};

use crate::render::MarkerGeometry;

/// Margins padding a marker's drawn box for pointer tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitMargins {
    pub horizontal_px: f64,
    pub vertical_px: f64,
}

impl Default for HitMargins {
    fn default() -> Self {
        Self {
            horizontal_px: 10.0,
            vertical_px: 10.0,
        }
    }
}

/// First marker in render order whose padded box contains the point.
///
/// Visually overlapping stacked markers are therefore hit in data order, not
/// visual order. Returns `None` (not an error) when nothing qualifies.
#[must_use]
pub fn hit_test(markers: &[MarkerGeometry], x: f64, y: f64, margins: HitMargins) -> Option<usize> {
    markers
        .iter()
        .find(|marker| {
            x >= marker.x - margins.horizontal_px
                && x <= marker.x + margins.horizontal_px
                && y >= marker.top - margins.vertical_px
                && y <= marker.top + marker.height + margins.vertical_px
        })
        .map(|marker| marker.event_index)
}
