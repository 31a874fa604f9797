//! Ship catalog: normalization of raw records, ordering and search.

use std::cmp::Ordering;

use icu_collator::{options::CollatorOptions, Collator, CollatorBorrowed};
use icu_locale_core::locale;
use log::warn;
use serde_json::Value;

use super::entities::VehicleCatalogEntry;

const NAME_KEYS: [&str; 2] = ["name", "title"];
const CAPACITY_KEYS: [&str; 4] = ["scu", "capacity", "cargo", "max_scu"];

/// Immutable, name-ordered list of ships loaded once per session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipCatalog {
    entries: Vec<VehicleCatalogEntry>,
}

impl ShipCatalog {
    pub fn new(mut entries: Vec<VehicleCatalogEntry>) -> Self {
        entries.retain(|entry| !entry.name.trim().is_empty());
        let collator = french_collator();
        entries.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));
        Self { entries }
    }

    /// Builds the catalog from a source payload: either a bare array of
    /// records or an object wrapping the array under `ships`.
    pub fn from_json(payload: &Value) -> Self {
        let records = match payload {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => map
                .get("ships")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        let entries = records
            .iter()
            .map(|record| VehicleCatalogEntry {
                name: record_name(record),
                capacity: record_capacity(record),
            })
            .collect();

        Self::new(entries)
    }

    pub fn get(&self, index: usize) -> Option<&VehicleCatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleCatalogEntry> {
        self.entries.iter()
    }

    /// Entries whose name contains `query` (case-insensitive), with their
    /// catalog index. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<(usize, &VehicleCatalogEntry)> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn record_name(record: &Value) -> String {
    NAME_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(|value| match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        })
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

fn record_capacity(record: &Value) -> f64 {
    let raw = CAPACITY_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .find(|value| is_truthy(value));

    let capacity = match raw {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_lenient(text),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if capacity.is_finite() && capacity > 0.0 {
        capacity
    } else {
        0.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_lenient(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Collation for ship names, French locale rules. Punctuation sorts ahead
/// of letters and accented letters sort with their base letter. Byte order
/// breaks ties so the order stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    compare_names(french_collator().as_ref(), a, b)
}

fn french_collator() -> Option<CollatorBorrowed<'static>> {
    Collator::try_new(locale!("fr").into(), CollatorOptions::default())
        .map_err(|err| warn!("[catalog] French collation unavailable, sorting by code point: {err}"))
        .ok()
}

fn compare_names(collator: Option<&CollatorBorrowed<'static>>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    };
    primary.then_with(|| a.cmp(b))
}
