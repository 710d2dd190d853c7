use tracing::{debug, error};

use crate::core::{EventCollection, EventDocument, SourceRecord};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::TimelineEngine;

/// Event data source collaborator.
///
/// Consumed once at startup and again on demand for reloads; the engine holds
/// no write path back into the source. There is no cancellation of in-flight
/// loads: a late result still replaces state, last write wins.
pub trait EventSource {
    fn fetch_events(&mut self) -> TimelineResult<Vec<SourceRecord>>;
}

/// In-memory source for tests and hosts that already hold the document.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    records: Vec<SourceRecord>,
}

impl StaticEventSource {
    #[must_use]
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self { records }
    }

    /// Parses an event document (`{"events": [...]}`).
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let document: EventDocument = serde_json::from_str(input)
            .map_err(|e| TimelineError::SourceFailure(format!("malformed event document: {e}")))?;
        Ok(Self::new(document.events))
    }
}

impl EventSource for StaticEventSource {
    fn fetch_events(&mut self) -> TimelineResult<Vec<SourceRecord>> {
        Ok(self.records.clone())
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces the event collection from a source fetch.
    ///
    /// A failed fetch is reported once through the presentation sink and the
    /// engine keeps rendering with its current (possibly empty) collection;
    /// a load failure is never fatal to the viewport.
    pub fn load_events(&mut self, source: &mut dyn EventSource) -> TimelineResult<usize> {
        let records = match source.fetch_events() {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "event source fetch failed");
                self.report_load_error(&err.to_string());
                return Err(err);
            }
        };
        self.set_event_records(records)
    }

    /// Resolves raw records and swaps the collection in wholesale.
    ///
    /// Hover and selection references into the old collection are cleared;
    /// the replacement becomes visible to the next frame as a single
    /// assignment.
    pub fn set_event_records(&mut self, records: Vec<SourceRecord>) -> TimelineResult<usize> {
        let collection = EventCollection::from_records(records, self.layout.event_max_stack)?;
        let count = collection.len();
        debug!(count, "event collection replaced");
        self.replace_events(collection);
        Ok(count)
    }
}
