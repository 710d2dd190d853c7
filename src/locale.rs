//! Localization seam.
//!
//! The engine never owns translation tables; hosts inject a [`Translator`]
//! and the engine looks up calendar month names, tier labels and the "now"
//! label through it.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

/// Pure key-to-string lookup supplied by the host.
pub trait Translator {
    /// Resolves a translation key.
    ///
    /// A missing key must resolve to the key itself, never fail.
    fn translate(&self, key: &str) -> String;
}

/// Fallback translator echoing every key.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyEchoTranslator;

impl Translator for KeyEchoTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_owned()
    }
}

/// Table-backed translator for hosts with static translation maps.
#[derive(Debug, Default, Clone)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}

/// Translation key for a 1-based calendar month name.
#[must_use]
pub fn month_label_key(month: u32) -> String {
    format!("month.{}", month.saturating_sub(1))
}

/// Formats an event date as `{day} {month name} {year}`.
#[must_use]
pub fn format_event_date(translator: &dyn Translator, instant: DateTime<Utc>) -> String {
    let date = instant.date_naive();
    format!(
        "{} {} {}",
        date.day(),
        translator.translate(&month_label_key(date.month())),
        date.year()
    )
}
