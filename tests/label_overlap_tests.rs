use timeline_rs::TimelineEngine;
use timeline_rs::api::TimelineEngineConfig;
use timeline_rs::core::{Viewport, ZoomTier, ZoomTierTable, calendar};
use timeline_rs::render::{NullRenderer, TimelineStyle};

fn crowded_month_tier() -> ZoomTierTable {
    // 24 px per year puts month gridlines 2 px apart, so nearly every month
    // label overlaps its neighbor.
    ZoomTierTable::new(vec![ZoomTier {
        id: 1,
        label_key: "zoom.months".to_owned(),
        pixels_per_year: 24.0,
        show_months: true,
        show_days: false,
        show_hours: false,
    }])
    .expect("tier table")
}

#[test]
fn overlapping_month_labels_are_skipped_not_their_gridlines() {
    let style = TimelineStyle::default();
    let reference = calendar::parse_instant("2024-06-15").expect("reference");
    let config = TimelineEngineConfig::new(Viewport::new(200, 200))
        .with_reference_instant(reference)
        .with_tiers(crowded_month_tier());
    let engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");

    let scene = engine.scene();
    let month_lines = scene
        .frame
        .lines
        .iter()
        .filter(|line| line.color == style.month_line)
        .count();
    let month_labels = scene
        .frame
        .texts
        .iter()
        .filter(|text| text.text.starts_with("month."))
        .count();

    assert!(month_lines > 10, "expected a crowded month grid");
    assert!(month_labels >= 1, "the first label always places");
    assert!(
        month_labels < month_lines,
        "overlapping labels must be skipped: {month_labels} labels for {month_lines} lines"
    );
}

#[test]
fn widely_spaced_month_labels_all_place() {
    let reference = calendar::parse_instant("2024-06-15").expect("reference");
    let config =
        TimelineEngineConfig::new(Viewport::new(1000, 400)).with_reference_instant(reference);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_zoom_level(1);

    let style = TimelineStyle::default();
    let scene = engine.scene();
    let month_lines = scene
        .frame
        .lines
        .iter()
        .filter(|line| line.color == style.month_line)
        .count();
    let month_labels = scene
        .frame
        .texts
        .iter()
        .filter(|text| text.text.starts_with("month."))
        .count();

    // Default months tier spaces months 150 px apart; no label collides.
    assert_eq!(month_labels, month_lines);
}
