use timeline_rs::TimelineEngine;
use timeline_rs::api::{ManualFrameScheduler, TimelineEngineConfig};
use timeline_rs::core::{Viewport, calendar};
use timeline_rs::error::TimelineError;
use timeline_rs::render::NullRenderer;

fn engine() -> TimelineEngine<NullRenderer> {
    let reference = calendar::parse_instant("2024-06-15").expect("reference");
    let config =
        TimelineEngineConfig::new(Viewport::new(1000, 600)).with_reference_instant(reference);
    TimelineEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn the_frame_loop_is_armed_at_construction_and_stopped_by_shutdown() {
    let mut engine = engine();
    assert!(engine.frame_scheduler().is_running());

    engine.shutdown();
    assert!(!engine.frame_scheduler().is_running());

    // Shutdown is idempotent and queries keep working.
    engine.shutdown();
    assert_eq!(engine.zoom_level(), 0);
}

#[test]
fn swapping_the_scheduler_cancels_the_old_one() {
    let mut engine = engine();
    engine.set_frame_scheduler(Box::new(ManualFrameScheduler::new()));
    assert!(engine.frame_scheduler().is_running());
}

#[test]
fn on_frame_draws_once_then_idles_until_dirty() {
    let mut engine = engine();

    // The first frame paints the initial scene.
    assert!(engine.on_frame().expect("frame"));
    assert!(!engine.on_frame().expect("frame"));

    // A hover change dirties the frame exactly once.
    engine.on_pointer_move(321.0, 200.0);
    assert!(engine.on_frame().expect("frame"));
    assert!(!engine.on_frame().expect("frame"));
}

#[test]
fn on_frame_keeps_drawing_while_the_pan_eases() {
    let mut engine = engine();
    assert!(engine.on_frame().expect("frame"));

    engine.on_wheel(200.0, 500.0, true);
    assert!(engine.is_animating());

    let mut frames = 0_u32;
    while engine.on_frame().expect("frame") {
        frames += 1;
        assert!(frames < 10_000);
    }
    assert!(!engine.is_animating());
    assert!(frames > 1, "easing must span multiple frames");
}

#[test]
fn resize_recenters_the_scale() {
    let mut engine = engine();
    engine.resize(Viewport::new(2000, 800)).expect("resize");

    let scene = engine.scene();
    let ruler = &scene.frame.lines[0];
    assert_eq!(ruler.x2, 2000.0);
    assert_eq!(ruler.y1, 400.0);

    let err = engine.resize(Viewport::new(0, 0)).expect_err("must fail");
    assert!(matches!(err, TimelineError::InvalidViewport { .. }));
}

#[test]
fn renderer_observes_the_frames_it_was_handed() {
    let mut engine = engine();
    engine.render().expect("render");

    let renderer = engine.into_renderer();
    assert!(renderer.last_line_count > 0, "ruler and gridlines drawn");
    assert!(renderer.last_text_count > 0, "labels drawn");
}
