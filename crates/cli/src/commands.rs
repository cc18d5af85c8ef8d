//! Command-line surface.

use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use slotwise_core::SlotCreationValues;
use uuid::Uuid;

/// Generate, browse and prune bookable time slots.
#[derive(Debug, Parser)]
#[command(name = "slotwise", version, about)]
pub struct Cli {
    /// Directory holding the slot store (overrides SLOTWISE_STORE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate slots for a date range and add them to the store
    Generate(GenerateArgs),
    /// List stored slots inside a date/time range
    List(ListArgs),
    /// List slots that have not started yet
    Upcoming(UpcomingArgs),
    /// Delete one slot by id
    Delete(DeleteArgs),
    /// List known timezones with their current UTC offset
    Timezones(TimezonesArgs),
}

/// Raw form fields. Validation happens in the engine so that every rule
/// reports the same way regardless of where the values came from.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: String,

    /// Daily window start, HH:mm
    #[arg(long)]
    pub start_time: String,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end_date: String,

    /// Daily window end, HH:mm
    #[arg(long)]
    pub end_time: String,

    /// IANA timezone of the window (defaults to the device zone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Slot length in minutes
    #[arg(long)]
    pub slot_duration: String,

    /// Gap between slots in minutes
    #[arg(long)]
    pub break_duration: String,

    /// Minimum notice before a slot can no longer be booked, in minutes
    #[arg(long)]
    pub buffer_duration: String,
}

impl GenerateArgs {
    pub fn into_form(self, default_timezone: Tz) -> SlotCreationValues {
        SlotCreationValues {
            start_date: self.start_date,
            start_time: self.start_time,
            end_date: self.end_date,
            end_time: self.end_time,
            time_zone: self
                .timezone
                .unwrap_or_else(|| default_timezone.name().to_string()),
            slot_duration: self.slot_duration,
            break_duration: self.break_duration,
            buffer_duration: self.buffer_duration,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Range start, "YYYY-MM-DD HH:mm" or "YYYY-MM-DD" (defaults to now)
    #[arg(long, default_value = "")]
    pub from: String,

    /// Range end, "YYYY-MM-DD HH:mm" or "YYYY-MM-DD" (open when omitted)
    #[arg(long, default_value = "")]
    pub to: String,

    /// Zone the range bounds are written in (defaults to the device zone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Group the output by calendar date instead of generation batch
    #[arg(long)]
    pub by_date: bool,

    /// Zone to display times in (defaults to the device zone)
    #[arg(long)]
    pub view_timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UpcomingArgs {
    /// Only show slots created in this zone
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Id of the slot to delete
    pub id: Uuid,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TimezonesArgs {
    /// Case-insensitive substring to match zone ids against
    #[arg(long)]
    pub search: Option<String>,
}
