use std::io::Write;

use eyre::Result;
use slotwise_core::{TimezoneInfo, TimezoneLookup};

use crate::commands::TimezonesArgs;

/// Print the device zone, then every zone whose id matches `args.search`.
pub fn list(
    lookup: &impl TimezoneLookup,
    args: &TimezonesArgs,
    out: &mut impl Write,
) -> Result<Vec<TimezoneInfo>> {
    let device = lookup.current_device_timezone();
    writeln!(out, "{} {} (device)", device.id, device.utc_offset_label)?;

    let needle = args.search.as_deref().map(str::to_lowercase);
    let matches: Vec<TimezoneInfo> = lookup
        .list_timezones()
        .into_iter()
        .filter(|zone| zone.id != device.id)
        .filter(|zone| {
            needle
                .as_deref()
                .is_none_or(|needle| zone.id.to_lowercase().contains(needle))
        })
        .collect();

    for zone in &matches {
        writeln!(out, "{} {}", zone.id, zone.utc_offset_label)?;
    }
    Ok(matches)
}
