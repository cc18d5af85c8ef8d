//! Flattening and calendar regrouping of bucket collections.

use crate::models::buckets::{Buckets, CalendarDayGroup};
use crate::models::slot::Slot;

/// All slots of `buckets`, bucket by bucket, in-bucket order preserved.
pub fn flatten<K: Ord>(buckets: &Buckets<K>) -> Vec<Slot> {
    buckets.slots().cloned().collect()
}

/// Re-key slots by the calendar date of their start in their own zone.
///
/// Slots keep their relative order inside each date.
pub fn group_by_calendar_date<I>(slots: I) -> CalendarDayGroup
where
    I: IntoIterator<Item = Slot>,
{
    let mut grouped = CalendarDayGroup::new();
    for slot in slots {
        grouped.push(slot.start().date_naive(), slot);
    }
    grouped
}
