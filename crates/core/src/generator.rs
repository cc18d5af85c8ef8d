//! # Slot Generator
//!
//! Expands a [`GenerationRequest`] into a [`GenerationBatch`]: one bucket per
//! calendar day that yields at least one slot, each keyed by a fresh
//! [`BatchId`].
//!
//! ## Algorithm
//!
//! 1. Resolve the combined start and end civil datetimes in the request zone
//!    and reject the request unless start is strictly before end.
//! 2. Count whole days between the two civil datetimes (wall-clock difference,
//!    truncated) and visit every day offset from zero up to that count.
//! 3. Each day's window runs from the start time-of-day to the end
//!    time-of-day of the original request, so `09:00-17:00` repeats daily.
//! 4. Slots are carved from the window start. A candidate is accepted while
//!    its end is not after the window end, then the cursor moves past the
//!    break. A cursor already beyond the window end finishes the day.
//! 5. Days without slots are dropped.
//!
//! Cursor arithmetic uses elapsed minutes, so a slot crossing a DST
//! transition still lasts exactly `slot_duration` minutes.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Offset, Timelike};
use chrono_tz::Tz;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};
use crate::models::buckets::{BatchId, GenerationBatch};
use crate::models::form::GenerationRequest;
use crate::models::slot::Slot;
use crate::time;

/// Generate every slot described by `request`.
///
/// # Errors
///
/// Returns [`SlotError::InvalidRange`] when the combined start is not strictly
/// before the combined end, including the zero-length case.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slotwise_core::{generate, GenerationRequest};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let request = GenerationRequest::new(
///     day,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     day,
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     "UTC",
///     60,
///     15,
///     30,
/// )
/// .unwrap();
///
/// let batch = generate(&request).unwrap();
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch.slot_count(), 6);
/// ```
pub fn generate(request: &GenerationRequest) -> SlotResult<GenerationBatch> {
    request.check_range()?;

    let num_days = time::whole_days_between(request.start_civil(), request.end_civil());
    let mut batch = GenerationBatch::new();

    for offset in 0..=num_days {
        let date = day_after(request.start_date, offset)?;
        let slots = carve_day(request, date);
        if !slots.is_empty() {
            batch.insert(BatchId::new(), slots);
        }
    }

    debug!(
        "Generated {} slots across {} of {} days in {}",
        batch.slot_count(),
        batch.len(),
        num_days + 1,
        request.time_zone
    );

    Ok(batch)
}

fn day_after(start: NaiveDate, offset: i64) -> SlotResult<NaiveDate> {
    u64::try_from(offset)
        .ok()
        .and_then(|days| start.checked_add_days(Days::new(days)))
        .ok_or_else(|| {
            SlotError::InvalidRange(format!("day {} after {} is out of range", offset, start))
        })
}

/// Carve one day's window into slots.
fn carve_day(request: &GenerationRequest, date: NaiveDate) -> Vec<Slot> {
    let tz = request.time_zone;
    let window_start = time::localize(tz, date.and_time(request.start_time));
    let window_end = time::localize(tz, date.and_time(request.end_time));

    let slot_length = Duration::minutes(i64::from(request.slot_duration));
    let break_length = Duration::minutes(i64::from(request.break_duration));

    let mut slots = Vec::new();
    let mut cursor = window_start;

    loop {
        let slot_end = cursor + slot_length;
        if slot_end > window_end {
            break;
        }

        slots.push(build_slot(request, cursor, slot_end));

        let next_start = slot_end + break_length;
        if next_start > window_end {
            break;
        }
        cursor = next_start;
    }

    slots
}

fn build_slot(request: &GenerationRequest, start: DateTime<Tz>, end: DateTime<Tz>) -> Slot {
    Slot {
        id: Uuid::new_v4(),
        start_date: start.date_naive(),
        start_time: minute_of(start),
        end_date: end.date_naive(),
        end_time: minute_of(end),
        time_zone: request.time_zone,
        slot_duration: request.slot_duration,
        break_duration: request.break_duration,
        buffer_duration: request.buffer_duration,
        start_offset: Some(start.offset().fix().local_minus_utc()),
        end_offset: Some(end.offset().fix().local_minus_utc()),
    }
}

/// Wall-clock time truncated to the minute.
fn minute_of(dt: DateTime<Tz>) -> NaiveTime {
    let local = dt.naive_local().time();
    NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(local)
}
