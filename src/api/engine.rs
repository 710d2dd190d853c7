use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, trace};

use crate::core::{
    EventCollection, EventStats, TimeScale, TimelineEvent, Viewport, ZoomTier, ZoomTierTable,
    calendar,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{InteractionMode, InteractionState, TouchPoint, ZoomDirection, hit_test};
use crate::locale::{KeyEchoTranslator, Translator, format_event_date};
use crate::render::{
    LayoutMetrics, MarkerGeometry, Renderer, SceneParams, TimelineScene, TimelineStyle,
    build_scene,
};

use super::engine_config::{InputTuning, TimelineEngineConfig};
use super::presentation::{NullPresentationSink, PresentationSink};
use super::scheduler::{FrameScheduler, ManualFrameScheduler};
use super::viewport_controller::ViewportController;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` coordinates the zoom-tier table, the eased viewport,
/// interaction state, the event collection and renderer calls. Collaborators
/// (translator, presentation sink, frame scheduler) are injected rather than
/// reached through ambient globals; every callback runs to completion before
/// the next frame is drawn.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) scale: TimeScale,
    pub(super) reference: DateTime<Utc>,
    pub(super) tiers: ZoomTierTable,
    pub(super) layout: LayoutMetrics,
    pub(super) input: InputTuning,
    pub(super) style: TimelineStyle,
    pub(super) viewport_ctl: ViewportController,
    pub(super) interaction: InteractionState,
    pub(super) events: EventCollection,
    pub(super) translator: Box<dyn Translator>,
    pub(super) presentation: Box<dyn PresentationSink>,
    pub(super) scheduler: Box<dyn FrameScheduler>,
    pub(super) last_markers: Vec<MarkerGeometry>,
    pub(super) needs_render: bool,
    pub(super) load_error_reported: bool,
}

impl<R: Renderer> std::fmt::Debug for TimelineEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEngine")
            .field("viewport", &self.viewport)
            .field("reference", &self.reference)
            .field("needs_render", &self.needs_render)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Builds an engine and arms its frame scheduler.
    ///
    /// The reference instant is captured here (or taken from the config) and
    /// stays fixed for the engine's lifetime; the "now" marker is exact at
    /// startup and the ruler does not drift mid-session.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        config.validate()?;

        let reference = config.reference_instant.unwrap_or_else(Utc::now);
        let mut scheduler: Box<dyn FrameScheduler> = Box::new(ManualFrameScheduler::new());
        scheduler.start();

        debug!(%reference, tiers = config.tiers.len(), "timeline engine init");
        Ok(Self {
            renderer,
            viewport: config.viewport,
            scale: TimeScale::new(config.viewport),
            reference,
            tiers: config.tiers,
            layout: config.layout,
            input: config.input,
            style: config.style,
            viewport_ctl: ViewportController::new(config.easing),
            interaction: InteractionState::default(),
            events: EventCollection::default(),
            translator: Box::new(KeyEchoTranslator),
            presentation: Box::new(NullPresentationSink),
            scheduler,
            last_markers: Vec::new(),
            needs_render: true,
            load_error_reported: false,
        })
    }

    // --- collaborators ---

    pub fn set_translator(&mut self, translator: Box<dyn Translator>) {
        self.translator = translator;
        self.needs_render = true;
    }

    pub fn set_presentation_sink(&mut self, sink: Box<dyn PresentationSink>) {
        self.presentation = sink;
    }

    /// Swaps the frame scheduler, cancelling the old one first.
    pub fn set_frame_scheduler(&mut self, mut scheduler: Box<dyn FrameScheduler>) {
        self.scheduler.cancel();
        scheduler.start();
        self.scheduler = scheduler;
    }

    #[must_use]
    pub fn frame_scheduler(&self) -> &dyn FrameScheduler {
        self.scheduler.as_ref()
    }

    /// Stops the animation loop; the engine keeps answering queries but no
    /// further frames are scheduled.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
    }

    // --- accessors ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn reference_instant(&self) -> DateTime<Utc> {
        self.reference
    }

    #[must_use]
    pub fn zoom_level(&self) -> usize {
        self.viewport_ctl.zoom_level()
    }

    #[must_use]
    pub fn tier(&self) -> &ZoomTier {
        self.tiers.tier(self.viewport_ctl.zoom_level())
    }

    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.viewport_ctl.offset_px()
    }

    #[must_use]
    pub fn target_offset_px(&self) -> f64 {
        self.viewport_ctl.target_offset_px()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.viewport_ctl.is_settled()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn events(&self) -> &[TimelineEvent] {
        self.events.events()
    }

    #[must_use]
    pub fn event_stats(&self) -> EventStats {
        self.events.stats(self.reference)
    }

    #[must_use]
    pub fn hovered_event(&self) -> Option<&TimelineEvent> {
        self.interaction
            .hovered_event()
            .and_then(|index| self.events.events().get(index))
    }

    #[must_use]
    pub fn selected_event(&self) -> Option<&TimelineEvent> {
        self.interaction
            .selected_event()
            .and_then(|index| self.events.events().get(index))
    }

    /// Marker geometry written back by the last rendered frame.
    #[must_use]
    pub fn marker_geometry(&self) -> &[MarkerGeometry] {
        &self.last_markers
    }

    /// Replaces the viewport, re-deriving the scale origin.
    pub fn resize(&mut self, viewport: Viewport) -> TimelineResult<()> {
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.scale = TimeScale::new(viewport);
        self.needs_render = true;
        Ok(())
    }

    // --- pointer input ---

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.interaction.begin_drag(x, y);
        // A stale animation target must not jump the view once the drag adds
        // its first delta.
        self.viewport_ctl.sync_target();
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.interaction.is_dragging() {
            let delta_x = self.interaction.drag_to(x, y);
            self.viewport_ctl.pan_target_by(delta_x);
        } else {
            self.interaction.set_hover_point(x, y);
            self.refresh_hover(x, y);
            self.needs_render = true;
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.interaction.end_drag();
    }

    pub fn on_pointer_leave(&mut self) {
        self.interaction.end_gesture();
        self.interaction.clear_hover_point();
        if self.interaction.hovered_event().is_some() {
            self.interaction.set_hovered_event(None);
            self.presentation.hide_tooltip();
        }
        self.needs_render = true;
    }

    /// Click-to-select; suppressed while the pan animation still carries
    /// residual, so a drag release is not misread as a tap.
    pub fn on_click(&mut self, x: f64, y: f64) -> Option<usize> {
        if !self.viewport_ctl.click_allowed() {
            trace!(
                residual_px = self.viewport_ctl.residual_px(),
                "click suppressed during pan"
            );
            return None;
        }

        let hit = hit_test(&self.last_markers, x, y, self.input.hit_margins)?;
        let event = self.events.events().get(hit)?.clone();
        self.interaction.set_selected_event(Some(hit));

        let date_text = format_event_date(self.translator.as_ref(), event.instant);
        self.presentation.show_event_details(&event, &date_text);
        Some(hit)
    }

    /// Double click zooms in toward the pointer; with the modifier held it
    /// zooms out from the viewport center instead.
    pub fn on_double_click(&mut self, x: f64, _y: f64, zoom_out_modifier: bool) {
        if zoom_out_modifier {
            self.zoom_out(None);
        } else {
            self.zoom_in(Some(x));
        }
    }

    /// Vertical wheel: with the modifier held it pans, otherwise it zooms one
    /// discrete step with the cursor as the focal point.
    pub fn on_wheel(&mut self, delta_y: f64, cursor_x: f64, pan_modifier: bool) {
        if pan_modifier {
            self.viewport_ctl.pan_target_by(-delta_y);
        } else if delta_y < 0.0 {
            self.zoom_in(Some(cursor_x));
        } else if delta_y > 0.0 {
            self.zoom_out(Some(cursor_x));
        }
    }

    // --- touch input ---

    pub fn on_touch_start(&mut self, contacts: &[TouchPoint]) {
        match contacts {
            [single] => {
                self.interaction.begin_drag(single.x, single.y);
                self.viewport_ctl.sync_target();
            }
            [first, second, ..] => {
                self.interaction.begin_pinch(first.distance_to(*second));
            }
            [] => {}
        }
    }

    pub fn on_touch_move(&mut self, contacts: &[TouchPoint]) {
        match contacts {
            [single] if self.interaction.is_dragging() => {
                let delta_x = self.interaction.drag_to(single.x, single.y);
                self.viewport_ctl.pan_target_by(delta_x);
            }
            [first, second, ..] => {
                let distance = first.distance_to(*second);
                if let Some(direction) = self
                    .interaction
                    .pinch_update(distance, self.input.min_pinch_distance_px)
                {
                    let midpoint_x = (first.x + second.x) / 2.0;
                    self.apply_zoom(direction, Some(midpoint_x));
                }
            }
            _ => {}
        }
    }

    pub fn on_touch_end(&mut self) {
        self.interaction.end_gesture();
    }

    // --- zoom and navigation ---

    /// One zoom-in step; `focal_x` defaults to the viewport center.
    pub fn zoom_in(&mut self, focal_x: Option<f64>) -> bool {
        self.apply_zoom(ZoomDirection::In, focal_x)
    }

    /// One zoom-out step; `focal_x` defaults to the viewport center.
    pub fn zoom_out(&mut self, focal_x: Option<f64>) -> bool {
        self.apply_zoom(ZoomDirection::Out, focal_x)
    }

    fn apply_zoom(&mut self, direction: ZoomDirection, focal_x: Option<f64>) -> bool {
        let focal_x = focal_x.unwrap_or_else(|| self.scale.center_x());
        let changed = self
            .viewport_ctl
            .zoom_step(direction, focal_x, &self.tiers, self.scale);
        if changed {
            let tier = self.tiers.tier(self.viewport_ctl.zoom_level());
            let label = format!(
                "×{} - {}",
                tier.id,
                self.translator.translate(&tier.label_key)
            );
            self.presentation.show_zoom_indicator(&label);
            self.needs_render = true;
        }
        changed
    }

    /// Direct zoom-level set, clamped into the tier table; offsets untouched.
    pub fn set_zoom_level(&mut self, level: usize) {
        self.viewport_ctl.set_zoom_level(level, &self.tiers);
        self.needs_render = true;
    }

    /// Eases back to the reference instant under the viewport center.
    pub fn go_to_today(&mut self) {
        self.viewport_ctl.go_to_today();
    }

    /// Eases the given date under the viewport center at the current tier.
    pub fn go_to_date(&mut self, date: NaiveDate) {
        let day_offset = calendar::date_day_offset(date, self.reference);
        self.viewport_ctl.go_to_day_offset(day_offset, &self.tiers);
    }

    // --- frame pump ---

    /// One animation tick from the host's display-refresh callback.
    ///
    /// Advances the eased offset, re-renders when anything is dirty and
    /// returns whether a frame was drawn.
    pub fn on_frame(&mut self) -> TimelineResult<bool> {
        if self.viewport_ctl.tick() {
            self.needs_render = true;
        }
        if !self.needs_render {
            return Ok(false);
        }

        self.render()?;
        self.needs_render = false;
        Ok(true)
    }

    /// Builds the current frame without rendering it.
    #[must_use]
    pub fn scene(&self) -> TimelineScene {
        build_scene(&SceneParams {
            viewport: self.viewport,
            tier: self.tiers.tier(self.viewport_ctl.zoom_level()),
            offset_px: self.viewport_ctl.offset_px(),
            reference: self.reference,
            events: &self.events,
            hovered_event: self.interaction.hovered_event(),
            hover_x: self.interaction.hover_x(),
            dragging: self.interaction.is_dragging(),
            metrics: &self.layout,
            style: &self.style,
            translator: self.translator.as_ref(),
        })
    }

    /// Renders one frame and writes back the marker geometry side table.
    pub fn render(&mut self) -> TimelineResult<()> {
        let scene = self.scene();
        self.renderer.render(&scene.frame)?;
        self.last_markers = scene.markers;
        Ok(())
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    // --- internals ---

    fn refresh_hover(&mut self, x: f64, y: f64) {
        let hit = hit_test(&self.last_markers, x, y, self.input.hit_margins);
        if hit == self.interaction.hovered_event() {
            return;
        }

        self.interaction.set_hovered_event(hit);
        match hit.and_then(|index| self.events.events().get(index)).cloned() {
            Some(event) => self.presentation.show_tooltip(&event, x, y),
            None => self.presentation.hide_tooltip(),
        }
    }

    pub(super) fn replace_events(&mut self, events: EventCollection) {
        self.events = events;
        // Weak references into the old collection die with it.
        self.interaction.invalidate_event_refs();
        self.last_markers.clear();
        self.needs_render = true;
        self.load_error_reported = false;
    }

    pub(super) fn report_load_error(&mut self, message: &str) {
        if self.load_error_reported {
            return;
        }
        self.load_error_reported = true;
        self.presentation.show_load_error(message);
    }
}
