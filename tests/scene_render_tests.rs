use timeline_rs::TimelineEngine;
use timeline_rs::api::TimelineEngineConfig;
use timeline_rs::core::{SourceRecord, Viewport, calendar};
use timeline_rs::render::{NullRenderer, TimelineStyle};

fn record(date: &str, title: &str) -> SourceRecord {
    SourceRecord {
        date: Some(date.to_owned()),
        year: None,
        title: title.to_owned(),
        description: String::new(),
        category: "other".to_owned(),
    }
}

fn engine() -> TimelineEngine<NullRenderer> {
    let reference = calendar::parse_instant("2024-06-15").expect("reference");
    let config =
        TimelineEngineConfig::new(Viewport::new(1000, 600)).with_reference_instant(reference);
    TimelineEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn ruler_baseline_spans_the_viewport() {
    let engine = engine();
    let scene = engine.scene();

    let ruler = &scene.frame.lines[0];
    assert_eq!((ruler.x1, ruler.y1), (0.0, 300.0));
    assert_eq!((ruler.x2, ruler.y2), (1000.0, 300.0));
    assert_eq!(ruler.color, TimelineStyle::default().ruler);
}

#[test]
fn years_tier_draws_year_labels_but_no_month_labels() {
    let engine = engine();
    let scene = engine.scene();

    assert!(
        scene
            .frame
            .texts
            .iter()
            .any(|text| text.text == "2024")
    );
    assert!(
        !scene
            .frame
            .texts
            .iter()
            .any(|text| text.text.starts_with("month."))
    );
}

#[test]
fn finer_tiers_cascade_coarser_gridlines_beneath_finer_ones() {
    let style = TimelineStyle::default();
    let mut engine = engine();
    engine.set_zoom_level(2);
    let scene = engine.scene();

    let first_day_line = scene
        .frame
        .lines
        .iter()
        .position(|line| line.color == style.day_line)
        .expect("day lines on the days tier");
    let first_year_line = scene
        .frame
        .lines
        .iter()
        .position(|line| line.color == style.year_line_thick)
        .expect("year/month lines on the days tier");
    assert!(
        first_year_line < first_day_line,
        "coarser lines must be drawn beneath finer ones"
    );
}

#[test]
fn hours_tier_adds_hour_gridlines() {
    let style = TimelineStyle::default();
    let mut engine = engine();
    engine.set_zoom_level(3);
    let scene = engine.scene();

    assert!(
        scene
            .frame
            .lines
            .iter()
            .any(|line| line.color == style.hour_line)
    );
}

#[test]
fn now_marker_sits_at_day_offset_zero_after_pan_and_zoom() {
    let style = TimelineStyle::default();
    let mut engine = engine();
    engine.zoom_in(Some(500.0));
    engine.on_wheel(-80.0, 500.0, true);
    while engine.on_frame().expect("frame") {}

    let expected_x = 500.0 + engine.offset_px();
    let scene = engine.scene();
    let now_line = scene
        .frame
        .lines
        .iter()
        .find(|line| line.color == style.today_marker)
        .expect("now marker line");
    assert!((now_line.x1 - expected_x).abs() <= 1e-9);
    assert!(
        scene
            .frame
            .texts
            .iter()
            .any(|text| text.text == "NOW" && text.color == style.today_marker)
    );
}

#[test]
fn hover_marker_is_suppressed_while_dragging() {
    let style = TimelineStyle::default();
    let mut engine = engine();

    engine.on_pointer_move(400.0, 200.0);
    let hover_lines = |engine: &TimelineEngine<NullRenderer>| {
        engine
            .scene()
            .frame
            .lines
            .iter()
            .filter(|line| line.color == style.hover_marker)
            .count()
    };
    assert_eq!(hover_lines(&engine), 1);

    engine.on_pointer_down(400.0, 200.0);
    engine.on_pointer_move(420.0, 200.0);
    assert_eq!(hover_lines(&engine), 0);

    engine.on_pointer_up();
    engine.on_pointer_move(420.0, 200.0);
    assert_eq!(hover_lines(&engine), 1);
}

#[test]
fn offscreen_events_are_culled_and_leave_no_geometry() {
    let mut engine = engine();
    engine
        .set_event_records(vec![
            record("2024-06-15", "near"),
            record("2100-01-01", "far future"),
        ])
        .expect("events");
    engine.render().expect("render");

    let markers = engine.marker_geometry();
    assert_eq!(markers.len(), 1, "offscreen marker must be culled");
    assert_eq!(markers[0].event_index, 0);
}

#[test]
fn geometry_side_table_is_rebuilt_after_panning_everything_offscreen() {
    let mut engine = engine();
    engine
        .set_event_records(vec![record("2024-06-15", "near")])
        .expect("events");
    engine.render().expect("render");
    assert_eq!(engine.marker_geometry().len(), 1);

    engine.on_wheel(50_000.0, 500.0, true);
    let mut frames = 0_u32;
    while engine.on_frame().expect("frame") {
        frames += 1;
        assert!(frames < 10_000, "pan failed to settle");
    }

    assert!(
        engine.marker_geometry().is_empty(),
        "culled events must not retain stale hit geometry"
    );
}

#[test]
fn hovered_event_is_drawn_with_the_hover_color() {
    let style = TimelineStyle::default();
    let mut engine = engine();
    engine
        .set_event_records(vec![record("2024-06-15", "near")])
        .expect("events");
    engine.render().expect("render");

    let marker = engine.marker_geometry()[0];
    engine.on_pointer_move(marker.x, marker.top + marker.height / 2.0);
    assert!(engine.hovered_event().is_some());

    let scene = engine.scene();
    assert!(
        scene
            .frame
            .rects
            .iter()
            .any(|rect| rect.color == style.event_bar_hover)
    );
}

#[test]
fn stacked_bars_are_offset_upwards_per_level() {
    let mut engine = engine();
    engine
        .set_event_records(vec![
            record("2024-06-15", "first"),
            record("2024-06-15", "second"),
        ])
        .expect("events");
    engine.render().expect("render");

    let markers = engine.marker_geometry();
    assert_eq!(markers.len(), 2);
    // Default metrics: 15 px bars with 4 px spacing.
    assert!((markers[0].top - markers[1].top - 19.0).abs() <= 1e-9);
}

#[test]
fn frames_validate_under_the_null_renderer_on_every_tier() {
    let mut engine = engine();
    engine
        .set_event_records(vec![record("2024-06-15", "near")])
        .expect("events");

    for level in 0..4 {
        engine.set_zoom_level(level);
        engine.render().expect("frame must validate");
    }
}
