mod data_controller;
mod engine;
mod engine_config;
mod presentation;
mod scheduler;
mod viewport_controller;

pub use data_controller::{EventSource, StaticEventSource};
pub use engine::TimelineEngine;
pub use engine_config::{InputTuning, TimelineEngineConfig};
pub use presentation::{NullPresentationSink, PresentationSink};
pub use scheduler::{FrameScheduler, ManualFrameScheduler};
pub use viewport_controller::{CLICK_RESIDUAL_THRESHOLD_PX, EasingTuning, ViewportController};
