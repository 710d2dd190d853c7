use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::TimelineEvent;
use crate::core::calendar::day_key;

/// Assigns per-day vertical stack slots in arrival order.
///
/// Events past `max_stack` collapse onto the last slot (visually overlapping)
/// instead of growing the stack unboundedly.
pub fn assign_stack_levels(events: &mut [TimelineEvent], max_stack: usize) {
    let max_stack = max_stack.max(1);
    let mut next_slot: IndexMap<(i32, u32, u32), usize> = IndexMap::new();

    for event in events.iter_mut() {
        let slot = next_slot.entry(day_key(event.instant)).or_insert(0);
        event.stack_level = (*slot).min(max_stack - 1);
        *slot += 1;
    }
}

/// Per-frame horizontal label collision tracker.
///
/// The first computed (leftmost by iteration order) label wins; a later label
/// that overlaps any already-placed box on the horizontal axis is skipped at
/// draw time. There is no priority ordering.
#[derive(Debug, Default)]
pub struct LabelPlacer {
    placed: SmallVec<[(f64, f64); 16]>,
}

impl LabelPlacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `[left, right]` if it overlaps no previously placed box.
    pub fn try_place(&mut self, left: f64, right: f64) -> bool {
        if self
            .placed
            .iter()
            .any(|&(placed_left, placed_right)| left < placed_right && right > placed_left)
        {
            return false;
        }
        self.placed.push((left, right));
        true
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}
