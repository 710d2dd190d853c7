//! timeline-rs: pannable multi-resolution timeline engine.
//!
//! This crate provides a Rust-idiomatic, backend-agnostic engine for a
//! horizontally pannable time ruler with discrete zoom tiers (years, months,
//! days, hours), focal-point zoom, eased inertial panning, per-day event
//! stacking and pointer/touch hit-testing.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod locale;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
