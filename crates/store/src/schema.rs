//! Persisted shape of the slot collection.
//!
//! The canonical blob is a JSON object keyed by batch id, each value a list of
//! slot records. Older installs wrote a flat JSON list of records instead;
//! that shape is converted on read and written back canonically on the next
//! save.

use eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use slotwise_core::{BatchId, GenerationBatch, Slot, SlotError, group_by_calendar_date};
use tracing::{debug, warn};
use uuid::Uuid;

/// Key the slot collection lives under.
pub const SLOTS_KEY: &str = "@SLOTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedShape {
    /// Nothing stored yet.
    Empty,
    /// Object keyed by batch id.
    Batches,
    /// Flat list of slot records.
    LegacyList,
}

/// A decoded blob plus what had to be dropped along the way.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub slots: GenerationBatch,
    pub shape: PersistedShape,
    pub skipped: Vec<SlotError>,
    /// Batch keys that were not UUIDs and got a fresh id.
    pub rekeyed: usize,
}

impl Decoded {
    fn empty() -> Self {
        Self {
            slots: GenerationBatch::new(),
            shape: PersistedShape::Empty,
            skipped: Vec::new(),
            rekeyed: 0,
        }
    }

    /// True when saving would change the stored text.
    pub fn needs_rewrite(&self) -> bool {
        self.shape == PersistedShape::LegacyList || !self.skipped.is_empty() || self.rekeyed > 0
    }
}

/// Decode a stored blob into a generation batch.
///
/// Each record is parsed on its own; a record that fails is logged, reported
/// in [`Decoded::skipped`] and left out, while the rest load normally.
///
/// # Errors
///
/// Fails only when the blob is not JSON at all or is neither an object nor a
/// list.
pub fn decode(raw: Option<&str>) -> Result<Decoded> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Decoded::empty()),
        Some(raw) => raw,
    };

    let value: Value = serde_json::from_str(raw).wrap_err("Persisted slots are not valid JSON")?;

    match value {
        Value::Null => Ok(Decoded::empty()),
        Value::Array(records) => Ok(decode_legacy(records)),
        Value::Object(batches) => Ok(decode_batches(batches)),
        other => Err(eyre!(
            "Unexpected persisted slots shape: expected an object or a list, found {}",
            kind_of(&other)
        )),
    }
}

/// Serialize `slots` in the canonical shape.
pub fn encode(slots: &GenerationBatch) -> Result<String> {
    serde_json::to_string(slots).wrap_err("Failed to serialize slots")
}

fn decode_batches(batches: serde_json::Map<String, Value>) -> Decoded {
    let mut decoded = Decoded {
        shape: PersistedShape::Batches,
        ..Decoded::empty()
    };

    for (key, records) in batches {
        let batch_id = match Uuid::parse_str(&key) {
            Ok(id) => BatchId::from(id),
            Err(_) => {
                let replacement = BatchId::new();
                warn!("Batch key '{}' is not a UUID, re-keying as {}", key, replacement);
                decoded.rekeyed += 1;
                replacement
            }
        };

        let Value::Array(records) = records else {
            let error = SlotError::MalformedSlot(format!(
                "batch '{}' holds {} instead of a list",
                key,
                kind_of(&records)
            ));
            warn!("{}", error);
            decoded.skipped.push(error);
            continue;
        };

        let slots = decode_records(records, &mut decoded.skipped);
        decoded.slots.insert(batch_id, slots);
    }

    debug!(
        "Decoded {} batches with {} slots",
        decoded.slots.len(),
        decoded.slots.slot_count()
    );
    decoded
}

fn decode_legacy(records: Vec<Value>) -> Decoded {
    let mut skipped = Vec::new();
    let slots = decode_records(records, &mut skipped);

    // Each calendar date of the old list becomes its own batch.
    let batches: GenerationBatch = group_by_calendar_date(slots)
        .into_iter()
        .map(|(_, slots)| (BatchId::new(), slots))
        .collect();

    debug!(
        "Converted legacy slot list into {} batches with {} slots",
        batches.len(),
        batches.slot_count()
    );

    Decoded {
        slots: batches,
        shape: PersistedShape::LegacyList,
        skipped,
        rekeyed: 0,
    }
}

fn decode_records(records: Vec<Value>, skipped: &mut Vec<SlotError>) -> Vec<Slot> {
    records
        .into_iter()
        .filter_map(|record| match Slot::from_value(record) {
            Ok(slot) => Some(slot),
            Err(error) => {
                warn!("{}", error);
                skipped.push(error);
                None
            }
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
