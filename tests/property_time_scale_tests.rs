use proptest::prelude::*;
use timeline_rs::core::{TimeScale, Viewport, ZoomTier};

fn tier(pixels_per_year: f64) -> ZoomTier {
    ZoomTier {
        id: 1,
        label_key: "zoom.test".to_owned(),
        pixels_per_year,
        show_months: false,
        show_days: false,
        show_hours: false,
    }
}

proptest! {
    #[test]
    fn day_offset_round_trip_property(
        pixels_per_year in 100.0f64..100_000.0,
        days in -100_000.0f64..100_000.0,
        offset_px in -100_000.0f64..100_000.0
    ) {
        let scale = TimeScale::new(Viewport::new(2048, 1024));
        let tier = tier(pixels_per_year);

        let x = scale.days_to_x(days, &tier, offset_px);
        let recovered = scale.x_to_days(x, &tier, offset_px);

        prop_assert!((recovered - days).abs() <= 1e-6);
    }

    #[test]
    fn focal_point_zoom_keeps_the_focal_x_fixed_property(
        current_ppy in 100.0f64..10_000.0,
        magnification in 1.1f64..50.0,
        focal_x in 0.0f64..2048.0,
        offset_px in -50_000.0f64..50_000.0
    ) {
        let scale = TimeScale::new(Viewport::new(2048, 1024));
        let current = tier(current_ppy);
        let next = tier(current_ppy * magnification);

        // The transition recipe: read the day offset under the focal x with
        // the current tier, then recompute the offset that maps it back to
        // the same x under the next tier.
        let day_offset = scale.x_to_days(focal_x, &current, offset_px);
        let new_offset = focal_x - scale.center_x() - day_offset * next.pixels_per_day();
        let remapped = scale.days_to_x(day_offset, &next, new_offset);

        prop_assert!((remapped - focal_x).abs() <= 1e-6);
    }
}
