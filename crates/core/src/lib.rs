//! # Slotwise Core
//!
//! The pure computation behind Slotwise: turning a recurring availability
//! window into bookable slots, and narrowing stored slots down to what a
//! viewer asked to see.
//!
//! ## Modules
//!
//! - **Models**: [`Slot`], the two bucket key schemes ([`GenerationBatch`]
//!   and [`CalendarDayGroup`]), and the creation form
//! - **Generator**: expands a request into one bucket per productive day
//! - **Filter**: keeps slots inside a date/time window, never in the past
//! - **Grouping**: flattens buckets and regroups slots by calendar date
//! - **Timezones**: IANA zone lookup with offset labels
//! - **Time**: civil date/time parsing and DST-aware localization
//!
//! Nothing here performs I/O or holds state. Only the range filter reads the
//! clock, and [`filter_by_range_at`] takes "now" explicitly instead.

pub mod errors;
pub mod filter;
pub mod generator;
pub mod grouping;
pub mod models;
pub mod time;
pub mod timezones;

pub use errors::{SlotError, SlotResult};
pub use filter::{RangeWindow, filter_by_range, filter_by_range_at, filter_upcoming};
pub use generator::generate;
pub use grouping::{flatten, group_by_calendar_date};
pub use models::buckets::{BatchId, Buckets, CalendarDayGroup, GenerationBatch};
pub use models::form::{GenerationRequest, SlotCreationValues};
pub use models::slot::Slot;
pub use timezones::{IanaTimezones, TimezoneInfo, TimezoneLookup};
