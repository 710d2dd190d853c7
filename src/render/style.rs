use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Frame color palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineStyle {
    pub ruler: Color,
    pub today_marker: Color,
    pub hover_marker: Color,
    pub year_line: Color,
    pub year_line_thick: Color,
    pub month_line: Color,
    pub day_line: Color,
    pub hour_line: Color,
    pub event_bar: Color,
    pub event_bar_hover: Color,
    pub text: Color,
    pub text_light: Color,
    pub text_very_light: Color,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            ruler: Color::rgb(0.867, 0.867, 0.867),
            today_marker: Color::rgb(1.0, 0.267, 0.267),
            hover_marker: Color::rgb(0.733, 0.733, 0.733),
            year_line: Color::rgb(0.6, 0.6, 0.6),
            year_line_thick: Color::rgb(0.2, 0.2, 0.2),
            month_line: Color::rgb(0.8, 0.8, 0.8),
            day_line: Color::rgb(0.933, 0.933, 0.933),
            hour_line: Color::rgb(0.96, 0.96, 0.96),
            event_bar: Color::rgb(0.6, 0.6, 0.6),
            event_bar_hover: Color::rgb(0.4, 0.4, 0.4),
            text: Color::rgb(0.2, 0.2, 0.2),
            text_light: Color::rgb(0.4, 0.4, 0.4),
            text_very_light: Color::rgb(0.6, 0.6, 0.6),
        }
    }
}

impl TimelineStyle {
    pub fn validate(self) -> crate::error::TimelineResult<()> {
        for color in [
            self.ruler,
            self.today_marker,
            self.hover_marker,
            self.year_line,
            self.year_line_thick,
            self.month_line,
            self.day_line,
            self.hour_line,
            self.event_bar,
            self.event_bar_hover,
            self.text,
            self.text_light,
            self.text_very_light,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
