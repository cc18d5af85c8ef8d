//! Command handlers.
//!
//! Each handler takes its collaborators explicitly (repository, timezone
//! lookup, the current instant) and writes human-readable output to `out`.

pub mod slots;
pub mod timezones;
