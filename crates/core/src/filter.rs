//! # Slot Range Filter
//!
//! Restricts a bucket collection to a date/time window without touching the
//! source. Bounds are civil datetimes interpreted in the filter's zone, while
//! each slot is compared by its own start in its own zone, so slots from
//! several zones can share one window.
//!
//! The filter never returns past slots: the lower bound is clamped to "now".

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::buckets::Buckets;
use crate::time;

/// Days added to the lower bound when the requested upper bound is unusable.
pub const FALLBACK_WINDOW_DAYS: i64 = 7;

/// Resolved bounds of a range filter, as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub lower: DateTime<Utc>,
    /// `None` means unbounded above.
    pub upper: Option<DateTime<Utc>>,
}

impl RangeWindow {
    /// Resolve the textual bounds of a filter request.
    ///
    /// - An empty or unparseable `range_start` means "now".
    /// - An empty `range_end` leaves the window open above.
    /// - A non-empty `range_end` that is unparseable or before the lower bound
    ///   is replaced by lower bound + [`FALLBACK_WINDOW_DAYS`] days.
    /// - Finally a lower bound in the past is raised to `now`.
    ///
    /// The fallback is computed from the requested lower bound before it is
    /// raised to `now`.
    pub fn resolve(range_start: &str, range_end: &str, tz: Tz, now: DateTime<Utc>) -> Self {
        let requested_lower = parse_bound(range_start, tz).unwrap_or(now);

        let upper = if range_end.trim().is_empty() {
            None
        } else {
            match parse_bound(range_end, tz) {
                Some(end) if end >= requested_lower => Some(end),
                _ => Some(requested_lower + Duration::days(FALLBACK_WINDOW_DAYS)),
            }
        };

        Self {
            lower: requested_lower.max(now),
            upper,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.lower && self.upper.is_none_or(|upper| instant <= upper)
    }
}

fn parse_bound(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        return None;
    }
    time::parse_civil_datetime(value).map(|naive| time::localize(tz, naive).with_timezone(&Utc))
}

/// Keep the slots whose start falls inside the window described by
/// `range_start`/`range_end` (`YYYY-MM-DD HH:mm`, or empty) in `tz`.
///
/// Uses the current instant as "now". Buckets left empty are dropped; keys
/// and in-bucket order of the survivors are preserved.
pub fn filter_by_range<K>(slots: &Buckets<K>, range_start: &str, range_end: &str, tz: Tz) -> Buckets<K>
where
    K: Ord + Clone,
{
    filter_by_range_at(slots, range_start, range_end, tz, Utc::now())
}

/// [`filter_by_range`] with an explicit "now".
pub fn filter_by_range_at<K>(
    slots: &Buckets<K>,
    range_start: &str,
    range_end: &str,
    tz: Tz,
    now: DateTime<Utc>,
) -> Buckets<K>
where
    K: Ord + Clone,
{
    let window = RangeWindow::resolve(range_start, range_end, tz, now);
    let filtered = slots.retain_slots(|slot| window.contains(slot.start_utc()));

    debug!(
        "Range filter [{}, {:?}] kept {} of {} slots",
        window.lower,
        window.upper,
        filtered.slot_count(),
        slots.slot_count()
    );

    filtered
}

/// Keep slots starting at or after `now`, optionally only those whose own
/// zone is `time_zone`.
pub fn filter_upcoming<K>(slots: &Buckets<K>, time_zone: Option<Tz>, now: DateTime<Utc>) -> Buckets<K>
where
    K: Ord + Clone,
{
    slots.retain_slots(|slot| {
        slot.start_utc() >= now && time_zone.is_none_or(|tz| slot.time_zone == tz)
    })
}
