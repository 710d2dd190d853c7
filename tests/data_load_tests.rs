use std::cell::RefCell;
use std::rc::Rc;

use timeline_rs::TimelineEngine;
use timeline_rs::api::{EventSource, PresentationSink, StaticEventSource, TimelineEngineConfig};
use timeline_rs::core::{SourceRecord, Viewport, calendar};
use timeline_rs::error::{TimelineError, TimelineResult};
use timeline_rs::render::NullRenderer;

const EVENTS_JSON: &str = r#"{
  "events": [
    {"date": "2024-06-15", "title": "anchor", "description": "at the reference", "category": "history"},
    {"year": 1969, "title": "moon landing"},
    {"date": "2024-06-15T12:00:00", "title": "same day later"}
  ]
}"#;

struct FailingSource;

impl EventSource for FailingSource {
    fn fetch_events(&mut self) -> TimelineResult<Vec<SourceRecord>> {
        Err(TimelineError::SourceFailure("network unreachable".to_owned()))
    }
}

#[derive(Clone, Default)]
struct ErrorSink(Rc<RefCell<Vec<String>>>);

impl PresentationSink for ErrorSink {
    fn show_load_error(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}

fn engine() -> TimelineEngine<NullRenderer> {
    let reference = calendar::parse_instant("2024-06-15").expect("reference");
    let config =
        TimelineEngineConfig::new(Viewport::new(1000, 600)).with_reference_instant(reference);
    TimelineEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn loads_an_event_document_sorted_and_categorized() {
    let mut engine = engine();
    let mut source = StaticEventSource::from_json_str(EVENTS_JSON).expect("document");

    let count = engine.load_events(&mut source).expect("load");
    assert_eq!(count, 3);

    let titles: Vec<&str> = engine
        .events()
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, vec!["moon landing", "anchor", "same day later"]);

    // Missing category defaults; missing date anchors to January 1.
    assert_eq!(engine.events()[0].category, "other");
    let jan1 = calendar::parse_instant("1969-01-01").expect("instant");
    assert_eq!(engine.events()[0].instant, jan1);

    // The anchor sits exactly on the reference instant and counts as future.
    let stats = engine.event_stats();
    assert_eq!((stats.total, stats.past, stats.future), (3, 1, 2));
}

#[test]
fn malformed_document_is_a_source_failure() {
    let err = StaticEventSource::from_json_str("{not json").expect_err("must fail");
    assert!(matches!(err, TimelineError::SourceFailure(_)));
}

#[test]
fn record_without_date_or_year_surfaces_an_invalid_event_error() {
    let mut engine = engine();
    let record = SourceRecord {
        date: None,
        year: None,
        title: "undated".to_owned(),
        description: String::new(),
        category: "other".to_owned(),
    };

    let err = engine.set_event_records(vec![record]).expect_err("must fail");
    assert!(matches!(err, TimelineError::InvalidEvent { .. }));
}

#[test]
fn reload_replaces_wholesale_and_clears_hover_and_selection() {
    let mut engine = engine();
    let mut source = StaticEventSource::from_json_str(EVENTS_JSON).expect("document");
    engine.load_events(&mut source).expect("load");
    engine.render().expect("render");

    let marker = engine.marker_geometry()[0];
    engine.on_pointer_move(marker.x, marker.top + 5.0);
    assert!(engine.on_click(marker.x, marker.top + 5.0).is_some());
    assert!(engine.hovered_event().is_some());
    assert!(engine.selected_event().is_some());

    engine
        .set_event_records(vec![SourceRecord {
            date: Some("2024-06-16".to_owned()),
            year: None,
            title: "replacement".to_owned(),
            description: String::new(),
            category: "other".to_owned(),
        }])
        .expect("reload");

    assert!(engine.hovered_event().is_none());
    assert!(engine.selected_event().is_none());
    assert!(engine.marker_geometry().is_empty());
    assert_eq!(engine.events().len(), 1);
}

#[test]
fn fetch_failure_reports_once_and_keeps_the_viewport_alive() {
    let sink = ErrorSink::default();
    let mut engine = engine();
    engine.set_presentation_sink(Box::new(sink.clone()));

    let err = engine.load_events(&mut FailingSource).expect_err("failure");
    assert!(matches!(err, TimelineError::SourceFailure(_)));
    assert!(engine.events().is_empty());

    // A second failing load is not re-reported.
    let _ = engine.load_events(&mut FailingSource).expect_err("failure");
    assert_eq!(sink.0.borrow().len(), 1);

    // The engine keeps rendering with an empty collection.
    assert!(engine.on_frame().expect("frame"));
    assert!(engine.marker_geometry().is_empty());
}

#[test]
fn a_successful_reload_rearms_the_failure_report() {
    let sink = ErrorSink::default();
    let mut engine = engine();
    engine.set_presentation_sink(Box::new(sink.clone()));

    let _ = engine.load_events(&mut FailingSource);
    engine
        .load_events(&mut StaticEventSource::from_json_str(EVENTS_JSON).expect("document"))
        .expect("load");
    let _ = engine.load_events(&mut FailingSource);

    assert_eq!(sink.0.borrow().len(), 2);
}
