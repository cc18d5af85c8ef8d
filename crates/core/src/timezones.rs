//! Timezone lookup backed by the IANA database bundled with `chrono-tz`.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};
use serde::{Deserialize, Serialize};

use crate::time;

/// A zone identifier paired with its current offset label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    pub id: String,
    pub utc_offset_label: String,
}

impl TimezoneInfo {
    /// Describe `tz` as of `now`.
    pub fn at(tz: Tz, now: DateTime<Utc>) -> Self {
        let offset = now.with_timezone(&tz).offset().fix().local_minus_utc();
        Self {
            id: tz.name().to_string(),
            utc_offset_label: time::format_offset_label(offset),
        }
    }
}

/// Read-only source of timezone names and offsets.
pub trait TimezoneLookup {
    /// Every known zone, sorted by identifier.
    fn list_timezones(&self) -> Vec<TimezoneInfo>;

    fn current_device_timezone(&self) -> TimezoneInfo;
}

/// [`TimezoneLookup`] over every zone `chrono-tz` knows about.
#[derive(Debug, Clone, Copy)]
pub struct IanaTimezones {
    device: Tz,
    now: Option<DateTime<Utc>>,
}

impl IanaTimezones {
    /// Offsets are evaluated at the moment of each call.
    pub fn new(device: Tz) -> Self {
        Self { device, now: None }
    }

    /// Offsets are evaluated at a fixed instant.
    pub fn at(device: Tz, now: DateTime<Utc>) -> Self {
        Self {
            device,
            now: Some(now),
        }
    }

    pub fn device(&self) -> Tz {
        self.device
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

impl TimezoneLookup for IanaTimezones {
    fn list_timezones(&self) -> Vec<TimezoneInfo> {
        let now = self.now();
        let mut zones: Vec<TimezoneInfo> =
            TZ_VARIANTS.iter().map(|tz| TimezoneInfo::at(*tz, now)).collect();
        zones.sort_by(|a, b| a.id.cmp(&b.id));
        zones
    }

    fn current_device_timezone(&self) -> TimezoneInfo {
        TimezoneInfo::at(self.device, self.now())
    }
}
