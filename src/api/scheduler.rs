//! Frame scheduling seam.
//!
//! The animation loop is a perpetual repeating task synchronized to the host
//! display refresh. Hosts implement [`FrameScheduler`] over their refresh
//! callback (vsync timer, `tick` signal, ...) and call
//! [`TimelineEngine::on_frame`](super::TimelineEngine::on_frame) from it.
//! The engine arms the scheduler at construction and cancels it on
//! [`TimelineEngine::shutdown`](super::TimelineEngine::shutdown), giving the
//! loop an explicit stop.

/// Repeating per-frame task bound to the display refresh.
pub trait FrameScheduler {
    /// Arms the repeating frame callback.
    fn start(&mut self);

    /// Stops the repeating frame callback; idempotent.
    fn cancel(&mut self);

    fn is_running(&self) -> bool;
}

/// In-process scheduler for tests and hosts that drive frames manually.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    running: bool,
    start_count: u32,
    cancel_count: u32,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    #[must_use]
    pub fn cancel_count(&self) -> u32 {
        self.cancel_count
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn start(&mut self) {
        self.running = true;
        self.start_count += 1;
    }

    fn cancel(&mut self) {
        if self.running {
            self.cancel_count += 1;
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
