//! Builds the per-frame draw list for the timeline.
//!
//! One scene pass produces a [`RenderFrame`] plus the marker geometry side
//! table used for hit-testing. The table is rebuilt from scratch every frame,
//! so culled events never leave stale geometry behind.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{EventCollection, LabelPlacer, TimeScale, Viewport, ZoomTier, calendar};
use crate::error::{TimelineError, TimelineResult};
use crate::locale::{Translator, month_label_key};
use crate::render::{
    LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, TimelineStyle,
};

const RULER_STROKE_PX: f64 = 2.0;
const GRID_STROKE_PX: f64 = 1.0;
const THICK_GRID_STROKE_PX: f64 = 2.0;

const YEAR_TICK_HALF_PX: f64 = 15.0;
const YEAR_TICK_THICK_HALF_PX: f64 = 20.0;
const MONTH_TICK_HALF_PX: f64 = 12.0;
const MONTH_TICK_THICK_HALF_PX: f64 = 18.0;
const DAY_TICK_HALF_PX: f64 = 8.0;
const HOUR_TICK_HALF_PX: f64 = 5.0;

const YEAR_LABEL_FONT_PX: f64 = 14.0;
const MONTH_LABEL_FONT_PX: f64 = 11.0;
const MONTH_LABEL_FONT_DAYS_PX: f64 = 12.0;
const DAY_LABEL_FONT_PX: f64 = 11.0;
const HOUR_LABEL_FONT_PX: f64 = 10.0;
const NOW_LABEL_FONT_PX: f64 = 11.0;

const YEAR_LABEL_OFFSET_PX: f64 = 40.0;
const MONTH_LABEL_OFFSET_PX: f64 = 18.0;
const MONTH_LABEL_OFFSET_DAYS_PX: f64 = 25.0;
const MONTH_LABEL_PAD_PX: f64 = 3.0;
const DAY_LABEL_OFFSET_PX: f64 = 15.0;
const HOUR_LABEL_OFFSET_PX: f64 = 18.0;
const HOUR_LABEL_EVERY: u32 = 6;

// Bail out when a misconfigured tier/viewport combination would ask for an
// absurd number of ticks in one granularity.
const MAX_GRID_STEPS: i64 = 4096;

/// Pixel metrics for event bars, markers and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Signed vertical offset of the ruler baseline from the viewport center.
    pub ruler_baseline_offset_px: f64,
    pub event_bar_height_px: f64,
    pub event_bar_spacing_px: f64,
    pub event_bar_width_px: f64,
    pub event_max_stack: usize,
    /// Distance from the ruler baseline up to the lowest event bar.
    pub event_baseline_offset_px: f64,
    pub now_marker_half_height_px: f64,
    pub now_label_offset_px: f64,
    pub hover_marker_half_height_px: f64,
    /// Width estimate per label character, used for overlap boxes.
    pub label_char_width_px: f64,
    /// Horizontal margin past the viewport edges before markers are culled.
    pub cull_margin_px: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            ruler_baseline_offset_px: 0.0,
            event_bar_height_px: 15.0,
            event_bar_spacing_px: 4.0,
            event_bar_width_px: 4.0,
            event_max_stack: 5,
            event_baseline_offset_px: 50.0,
            now_marker_half_height_px: 100.0,
            now_label_offset_px: 110.0,
            hover_marker_half_height_px: 60.0,
            label_char_width_px: 7.0,
            cull_margin_px: 50.0,
        }
    }
}

impl LayoutMetrics {
    pub fn validate(self) -> TimelineResult<()> {
        for (value, name) in [
            (self.event_bar_height_px, "event_bar_height_px"),
            (self.event_bar_spacing_px, "event_bar_spacing_px"),
            (self.event_bar_width_px, "event_bar_width_px"),
            (self.event_baseline_offset_px, "event_baseline_offset_px"),
            (self.now_marker_half_height_px, "now_marker_half_height_px"),
            (self.now_label_offset_px, "now_label_offset_px"),
            (
                self.hover_marker_half_height_px,
                "hover_marker_half_height_px",
            ),
            (self.label_char_width_px, "label_char_width_px"),
            (self.cull_margin_px, "cull_margin_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "layout metric `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.ruler_baseline_offset_px.is_finite() {
            return Err(TimelineError::InvalidConfig(
                "ruler_baseline_offset_px must be finite".to_owned(),
            ));
        }
        if self.event_max_stack == 0 {
            return Err(TimelineError::InvalidConfig(
                "event_max_stack must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Per-frame placement of one drawn event marker.
///
/// `event_index` points into the event collection the scene was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub event_index: usize,
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Output of one scene pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScene {
    pub frame: RenderFrame,
    pub markers: Vec<MarkerGeometry>,
}

/// Inputs consumed by one scene pass; all read-only.
pub struct SceneParams<'a> {
    pub viewport: Viewport,
    pub tier: &'a ZoomTier,
    pub offset_px: f64,
    pub reference: DateTime<Utc>,
    pub events: &'a EventCollection,
    pub hovered_event: Option<usize>,
    pub hover_x: Option<f64>,
    pub dragging: bool,
    pub metrics: &'a LayoutMetrics,
    pub style: &'a TimelineStyle,
    pub translator: &'a dyn Translator,
}

/// Builds the draw list and marker geometry for one frame.
#[must_use]
pub fn build_scene(params: &SceneParams<'_>) -> TimelineScene {
    let scale = TimeScale::new(params.viewport);
    let width = f64::from(params.viewport.width);
    let center_y = params.viewport.center_y() + params.metrics.ruler_baseline_offset_px;
    let mut frame = RenderFrame::new(params.viewport);

    frame.lines.push(LinePrimitive::new(
        0.0,
        center_y,
        width,
        center_y,
        RULER_STROKE_PX,
        params.style.ruler,
    ));

    if let Some(range) = visible_date_range(params, scale) {
        push_year_grid(&mut frame, params, scale, center_y, range);
        if params.tier.show_months {
            push_month_grid(&mut frame, params, scale, center_y, range);
        }
        if params.tier.show_days {
            push_day_grid(&mut frame, params, scale, center_y, range);
        }
        if params.tier.show_hours {
            push_hour_grid(&mut frame, params, scale, center_y, range);
        }
    }

    push_now_marker(&mut frame, params, scale, center_y);
    push_hover_marker(&mut frame, params, center_y);
    let markers = push_event_markers(&mut frame, params, scale, center_y);

    TimelineScene { frame, markers }
}

fn visible_date_range(params: &SceneParams<'_>, scale: TimeScale) -> Option<(NaiveDate, NaiveDate)> {
    let width = f64::from(params.viewport.width);
    let margin_days = params.metrics.cull_margin_px / params.tier.pixels_per_day();
    let start_days = scale.x_to_days(0.0, params.tier, params.offset_px) - margin_days;
    let end_days = scale.x_to_days(width, params.tier, params.offset_px) + margin_days;

    let start = date_at(params.reference, start_days)?;
    let end = date_at(params.reference, end_days)?;
    Some((start, end))
}

fn date_at(reference: DateTime<Utc>, day_offset: f64) -> Option<NaiveDate> {
    let days = Duration::try_days(day_offset.floor() as i64)?;
    reference.date_naive().checked_add_signed(days)
}

fn on_screen(x: f64, width: f64, margin: f64) -> bool {
    x >= -margin && x <= width + margin
}

fn grid_span_too_large(steps: i64, granularity: &str) -> bool {
    if steps > MAX_GRID_STEPS {
        warn!(steps, granularity, "gridline step cap exceeded, skipping");
        return true;
    }
    false
}

fn push_year_grid(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
    (start, end): (NaiveDate, NaiveDate),
) {
    let width = f64::from(params.viewport.width);
    let margin = params.metrics.cull_margin_px;
    let year_span = i64::from(end.year()) - i64::from(start.year()) + 1;
    if grid_span_too_large(year_span, "years") {
        return;
    }

    // Year ticks read stronger once finer granularities appear beside them.
    let (half, stroke, color) = if params.tier.show_months {
        (
            YEAR_TICK_THICK_HALF_PX,
            THICK_GRID_STROKE_PX,
            params.style.year_line_thick,
        )
    } else {
        (YEAR_TICK_HALF_PX, GRID_STROKE_PX, params.style.year_line)
    };

    for year in start.year()..=end.year() {
        let Some(instant) = calendar::year_start(year) else {
            continue;
        };
        let days = calendar::day_offset_between(instant, params.reference);
        let x = scale.days_to_x(days, params.tier, params.offset_px);
        if !on_screen(x, width, margin) {
            continue;
        }

        frame.lines.push(LinePrimitive::new(
            x,
            center_y - half,
            x,
            center_y + half,
            stroke,
            color,
        ));
        frame.texts.push(TextPrimitive::new(
            year.to_string(),
            x,
            center_y + YEAR_LABEL_OFFSET_PX,
            YEAR_LABEL_FONT_PX,
            params.style.text,
            TextHAlign::Center,
        ));
    }
}

fn push_month_grid(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
    (start, end): (NaiveDate, NaiveDate),
) {
    let width = f64::from(params.viewport.width);
    let margin = params.metrics.cull_margin_px;
    let year_span = i64::from(end.year()) - i64::from(start.year()) + 1;
    if grid_span_too_large(year_span * 12, "months") {
        return;
    }

    let (half, stroke, line_color, label_font, label_offset, label_color) = if params.tier.show_days
    {
        (
            MONTH_TICK_THICK_HALF_PX,
            THICK_GRID_STROKE_PX,
            params.style.year_line_thick,
            MONTH_LABEL_FONT_DAYS_PX,
            MONTH_LABEL_OFFSET_DAYS_PX,
            params.style.text,
        )
    } else {
        (
            MONTH_TICK_HALF_PX,
            GRID_STROKE_PX,
            params.style.month_line,
            MONTH_LABEL_FONT_PX,
            MONTH_LABEL_OFFSET_PX,
            params.style.text_light,
        )
    };

    let mut placer = LabelPlacer::new();
    for year in start.year()..=end.year() {
        for month in 1..=12 {
            let Some(date) = calendar::month_start(year, month) else {
                continue;
            };
            let days = calendar::date_day_offset(date, params.reference);
            let x = scale.days_to_x(days, params.tier, params.offset_px);
            if !on_screen(x, width, margin) {
                continue;
            }

            frame.lines.push(LinePrimitive::new(
                x,
                center_y - half,
                x,
                center_y + half,
                stroke,
                line_color,
            ));

            let label = params.translator.translate(&month_label_key(month));
            let label_left = x + MONTH_LABEL_PAD_PX;
            let label_width = label.chars().count() as f64 * params.metrics.label_char_width_px;
            // Geometry is computed either way; only the draw is skipped.
            if placer.try_place(label_left, label_left + label_width) {
                frame.texts.push(TextPrimitive::new(
                    label,
                    label_left,
                    center_y - label_offset,
                    label_font,
                    label_color,
                    TextHAlign::Left,
                ));
            }
        }
    }
}

fn push_day_grid(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
    (start, end): (NaiveDate, NaiveDate),
) {
    let width = f64::from(params.viewport.width);
    let margin = params.metrics.cull_margin_px;
    let day_span = (end - start).num_days() + 1;
    if grid_span_too_large(day_span, "days") {
        return;
    }

    let mut date = start;
    while date <= end {
        let days = calendar::date_day_offset(date, params.reference);
        let x = scale.days_to_x(days, params.tier, params.offset_px);
        if on_screen(x, width, margin) {
            frame.lines.push(LinePrimitive::new(
                x,
                center_y - DAY_TICK_HALF_PX,
                x,
                center_y + DAY_TICK_HALF_PX,
                GRID_STROKE_PX,
                params.style.day_line,
            ));
            frame.texts.push(TextPrimitive::new(
                date.day().to_string(),
                x,
                center_y - DAY_LABEL_OFFSET_PX,
                DAY_LABEL_FONT_PX,
                params.style.text_very_light,
                TextHAlign::Center,
            ));
        }

        let Some(next) = date.checked_add_signed(Duration::days(1)) else {
            break;
        };
        date = next;
    }
}

fn push_hour_grid(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
    (start, end): (NaiveDate, NaiveDate),
) {
    let width = f64::from(params.viewport.width);
    let margin = params.metrics.cull_margin_px;
    let day_span = (end - start).num_days() + 1;
    if grid_span_too_large(day_span * 24, "hours") {
        return;
    }

    let mut date = start;
    while date <= end {
        let day_days = calendar::date_day_offset(date, params.reference);
        // Hour 0 coincides with the day tick.
        for hour in 1..24 {
            let days = day_days + f64::from(hour) / 24.0;
            let x = scale.days_to_x(days, params.tier, params.offset_px);
            if !on_screen(x, width, margin) {
                continue;
            }

            frame.lines.push(LinePrimitive::new(
                x,
                center_y - HOUR_TICK_HALF_PX,
                x,
                center_y + HOUR_TICK_HALF_PX,
                GRID_STROKE_PX,
                params.style.hour_line,
            ));
            if hour % HOUR_LABEL_EVERY == 0 {
                frame.texts.push(TextPrimitive::new(
                    format!("{hour:02}"),
                    x,
                    center_y + HOUR_LABEL_OFFSET_PX,
                    HOUR_LABEL_FONT_PX,
                    params.style.text_very_light,
                    TextHAlign::Center,
                ));
            }
        }

        let Some(next) = date.checked_add_signed(Duration::days(1)) else {
            break;
        };
        date = next;
    }
}

fn push_now_marker(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
) {
    // Day-offset 0 is the reference instant itself, so the marker moves only
    // with pan and zoom, never on its own.
    let x = scale.days_to_x(0.0, params.tier, params.offset_px);
    let half = params.metrics.now_marker_half_height_px;

    frame.lines.push(LinePrimitive::new(
        x,
        center_y - half,
        x,
        center_y + half,
        RULER_STROKE_PX,
        params.style.today_marker,
    ));
    frame.texts.push(TextPrimitive::new(
        params.translator.translate("now").to_uppercase(),
        x,
        center_y - params.metrics.now_label_offset_px,
        NOW_LABEL_FONT_PX,
        params.style.today_marker,
        TextHAlign::Center,
    ));
}

fn push_hover_marker(frame: &mut RenderFrame, params: &SceneParams<'_>, center_y: f64) {
    if params.dragging {
        return;
    }
    let Some(x) = params.hover_x else {
        return;
    };

    let half = params.metrics.hover_marker_half_height_px;
    frame.lines.push(LinePrimitive::new(
        x,
        center_y - half,
        x,
        center_y + half,
        GRID_STROKE_PX,
        params.style.hover_marker,
    ));
}

fn push_event_markers(
    frame: &mut RenderFrame,
    params: &SceneParams<'_>,
    scale: TimeScale,
    center_y: f64,
) -> Vec<MarkerGeometry> {
    let width = f64::from(params.viewport.width);
    let margin = params.metrics.cull_margin_px;
    let bar_width = params.metrics.event_bar_width_px;
    let bar_height = params.metrics.event_bar_height_px;
    let stack_step = bar_height + params.metrics.event_bar_spacing_px;

    let mut markers = Vec::new();
    for (index, event) in params.events.events().iter().enumerate() {
        let days = calendar::day_offset_between(event.instant, params.reference);
        let x = scale.days_to_x(days, params.tier, params.offset_px);
        if !on_screen(x, width, margin) {
            continue;
        }

        let top = center_y
            - params.metrics.event_baseline_offset_px
            - event.stack_level as f64 * stack_step
            - bar_height;
        let color = if params.hovered_event == Some(index) {
            params.style.event_bar_hover
        } else {
            params.style.event_bar
        };

        frame.rects.push(RectPrimitive::new(
            x - bar_width / 2.0,
            top,
            bar_width,
            bar_height,
            color,
        ));
        markers.push(MarkerGeometry {
            event_index: index,
            x,
            top,
            width: bar_width,
            height: bar_height,
        });
    }

    markers
}
