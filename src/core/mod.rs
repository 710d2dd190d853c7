pub mod calendar;
pub mod event;
pub mod layout;
pub mod tier;
pub mod time_scale;
pub mod types;

pub use event::{EventCollection, EventDocument, EventStats, SourceRecord, TimelineEvent};
pub use layout::LabelPlacer;
pub use tier::{ZoomTier, ZoomTierTable};
pub use time_scale::TimeScale;
pub use types::Viewport;
