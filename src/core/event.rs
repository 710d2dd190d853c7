use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::core::{calendar, layout};
use crate::error::{TimelineError, TimelineResult};

/// Raw record shape produced by the event data source.
///
/// `date` is an ISO date or datetime; a record may instead carry only a bare
/// `year`, which anchors it to January 1 of that year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "other".to_owned()
}

/// Top-level wire shape of the event document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventDocument {
    #[serde(default)]
    pub events: Vec<SourceRecord>,
}

/// One plotted event after date resolution and stack assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub instant: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub stack_level: usize,
}

/// Event counts relative to the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventStats {
    pub total: usize,
    pub past: usize,
    pub future: usize,
}

/// Date-ordered event collection with per-day stack levels assigned.
///
/// Collections are replaced wholesale on reload and individual events are
/// never mutated afterwards; render geometry lives in a per-frame side table,
/// not on the events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCollection {
    events: Vec<TimelineEvent>,
}

impl EventCollection {
    /// Resolves raw records into a sorted, stacked collection.
    ///
    /// A record whose `date` fails to parse falls back to January 1 of its
    /// `year`; a record with neither is a data error surfaced to the caller.
    pub fn from_records(records: Vec<SourceRecord>, max_stack: usize) -> TimelineResult<Self> {
        let mut events = Vec::with_capacity(records.len());
        for record in records {
            events.push(resolve_record(record)?);
        }

        // Stable sort: same-day events keep source arrival order for stacking.
        events.sort_by_key(|event| event.instant);
        layout::assign_stack_levels(&mut events, max_stack);
        Ok(Self { events })
    }

    /// Parses an event document (`{"events": [...]}`) and resolves it.
    pub fn from_json_str(input: &str, max_stack: usize) -> TimelineResult<Self> {
        let document: EventDocument = serde_json::from_str(input)
            .map_err(|e| TimelineError::SourceFailure(format!("malformed event document: {e}")))?;
        Self::from_records(document.events, max_stack)
    }

    #[must_use]
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn stats(&self, reference: DateTime<Utc>) -> EventStats {
        let past = self
            .events
            .iter()
            .filter(|event| event.instant < reference)
            .count();
        EventStats {
            total: self.events.len(),
            past,
            future: self.events.len() - past,
        }
    }
}

fn resolve_record(record: SourceRecord) -> TimelineResult<TimelineEvent> {
    let parsed = match record.date.as_deref() {
        Some(raw) => {
            let parsed = calendar::parse_instant(raw);
            if parsed.is_none() {
                warn!(
                    title = %record.title,
                    raw,
                    "unparseable event date, falling back to year start"
                );
            }
            parsed
        }
        None => None,
    };

    let instant = match (parsed, record.year) {
        (Some(instant), _) => instant,
        (None, Some(year)) => calendar::year_start(year).ok_or_else(|| {
            TimelineError::InvalidEvent {
                title: record.title.clone(),
                reason: format!("year {year} is outside the supported calendar range"),
            }
        })?,
        (None, None) => {
            return Err(TimelineError::InvalidEvent {
                title: record.title,
                reason: "record has neither a parseable date nor a year".to_owned(),
            });
        }
    };

    Ok(TimelineEvent {
        instant,
        title: record.title,
        description: record.description,
        category: record.category,
        stack_level: 0,
    })
}
