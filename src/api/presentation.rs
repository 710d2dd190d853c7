use crate::core::TimelineEvent;

/// Fire-and-forget presentation collaborators (tooltip, modal, indicator).
///
/// The engine calls into the sink and never awaits or depends on completion.
/// Default implementations are no-ops so hosts override only the surfaces
/// they actually present.
pub trait PresentationSink {
    fn show_tooltip(&mut self, _event: &TimelineEvent, _x: f64, _y: f64) {}

    fn hide_tooltip(&mut self) {}

    fn show_event_details(&mut self, _event: &TimelineEvent, _formatted_date: &str) {}

    fn show_zoom_indicator(&mut self, _label: &str) {}

    fn show_load_error(&mut self, _message: &str) {}
}

/// Sink that presents nothing.
#[derive(Debug, Default)]
pub struct NullPresentationSink;

impl PresentationSink for NullPresentationSink {}
