use std::fmt::Display;
use std::io::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use slotwise_core::time::parse_timezone;
use slotwise_core::{
    BatchId, GenerationBatch, Slot, SlotCreationValues, SlotError, filter_by_range_at,
    filter_upcoming, flatten, generate as generate_slots, group_by_calendar_date,
};
use slotwise_store::{SlotRepository, SlotStore};
use tracing::info;
use uuid::Uuid;

use crate::commands::{ListArgs, UpcomingArgs};

/// Validate the form, generate its slots and merge them into the store.
pub fn generate<S: SlotStore>(
    repo: &mut SlotRepository<S>,
    form: &SlotCreationValues,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<GenerationBatch> {
    let request = form.validate()?;
    let batch = generate_slots(&request)?;

    if batch.is_empty() {
        writeln!(out, "No slots fit the requested window; nothing stored.")?;
        return Ok(batch);
    }

    repo.add_generated(batch.clone())
        .wrap_err("Failed to store generated slots")?;
    info!(
        "Generated {} slots in {} batches",
        batch.slot_count(),
        batch.len()
    );

    writeln!(
        out,
        "Generated {} slots in {}:",
        batch.slot_count(),
        request.time_zone
    )?;
    print_buckets(in_start_order(&batch), request.time_zone, now, out)?;
    Ok(batch)
}

/// Print stored slots inside a range, grouped by batch or by calendar date.
pub fn list<S: SlotStore>(
    repo: &SlotRepository<S>,
    args: &ListArgs,
    default_timezone: Tz,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<usize> {
    let range_timezone = optional_timezone(args.timezone.as_deref())?.unwrap_or(default_timezone);
    let view_timezone =
        optional_timezone(args.view_timezone.as_deref())?.unwrap_or(default_timezone);

    let stored = repo.slots()?;
    let filtered = filter_by_range_at(&stored, &args.from, &args.to, range_timezone, now);
    let count = filtered.slot_count();

    if count == 0 {
        writeln!(out, "No slots in range.")?;
        return Ok(0);
    }

    if args.by_date {
        let by_date = group_by_calendar_date(flatten(&filtered));
        print_buckets(&by_date, view_timezone, now, out)?;
    } else {
        print_buckets(in_start_order(&filtered), view_timezone, now, out)?;
    }
    Ok(count)
}

/// Print slots that have not started yet, optionally limited to one zone.
pub fn upcoming<S: SlotStore>(
    repo: &SlotRepository<S>,
    args: &UpcomingArgs,
    default_timezone: Tz,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<usize> {
    let zone = optional_timezone(args.timezone.as_deref())?;
    let stored = repo.slots()?;
    let upcoming = filter_upcoming(&stored, zone, now);

    if upcoming.is_empty() {
        writeln!(out, "No upcoming slots.")?;
        return Ok(0);
    }

    let by_date = group_by_calendar_date(flatten(&upcoming));
    print_buckets(&by_date, zone.unwrap_or(default_timezone), now, out)?;
    Ok(by_date.slot_count())
}

/// Delete a slot by id.
///
/// # Errors
///
/// [`SlotError::NotFound`] when no stored slot has that id.
pub fn delete<S: SlotStore>(
    repo: &mut SlotRepository<S>,
    id: Uuid,
    out: &mut impl Write,
) -> Result<Slot> {
    let removed = repo
        .delete_slot(id)?
        .ok_or_else(|| SlotError::NotFound(id.to_string()))?;
    writeln!(out, "Deleted slot {}", removed.id)?;
    Ok(removed)
}

fn optional_timezone(name: Option<&str>) -> Result<Option<Tz>> {
    Ok(name.map(parse_timezone).transpose()?)
}

/// Batches ordered by their first slot's start instant.
///
/// Batch ids carry no order of their own.
pub fn in_start_order(batch: &GenerationBatch) -> Vec<(&BatchId, &Vec<Slot>)> {
    let mut ordered: Vec<_> = batch.iter().collect();
    ordered.sort_by_key(|(_, slots)| slots.first().map(Slot::start_utc));
    ordered
}

fn print_buckets<'a, K, I>(
    buckets: I,
    view: Tz,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()>
where
    K: Display + 'a,
    I: IntoIterator<Item = (&'a K, &'a Vec<Slot>)>,
{
    for (key, slots) in buckets {
        writeln!(out, "{}", key)?;
        for slot in slots {
            writeln!(out, "  {}", describe(slot, view, now))?;
        }
    }
    Ok(())
}

/// One display line: times in the viewer's zone plus the slot's own zone
/// and whether it can still be booked.
pub fn describe(slot: &Slot, view: Tz, now: DateTime<Utc>) -> String {
    let start = slot.start_in(view);
    let end = slot.end_in(view);
    let status = if slot.can_be_booked_at(now) {
        "bookable"
    } else {
        "closed"
    };

    format!(
        "{} {} - {} {} ({}, {}) {}",
        start.format("%Y-%m-%d"),
        start.format("%H:%M"),
        end.format("%H:%M"),
        view,
        slot.time_zone,
        status,
        slot.id
    )
}
