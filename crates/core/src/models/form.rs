use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};
use crate::time;

/// Raw values as entered in the slot creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCreationValues {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub time_zone: String,
    pub slot_duration: String,
    pub break_duration: String,
    pub buffer_duration: String,
}

impl SlotCreationValues {
    /// Check every form rule and produce a typed request.
    ///
    /// Rules are checked in field order and the first failure is returned.
    /// Besides the per-field formats, the daily window (start time-of-day to
    /// end time-of-day) must be long enough for one full slot.
    pub fn validate(&self) -> SlotResult<GenerationRequest> {
        let start_date = time::parse_date(required("Start date", &self.start_date)?)?;
        let end_date = time::parse_date(required("End date", &self.end_date)?)?;
        if end_date < start_date {
            return Err(SlotError::Validation(
                "End date must be equal to or after start date".to_string(),
            ));
        }

        let start_time = time::parse_time_of_day(required("Start time", &self.start_time)?)?;
        let end_time = time::parse_time_of_day(required("End time", &self.end_time)?)?;
        let time_zone = time::parse_timezone(required("Timezone", &self.time_zone)?)?;

        let slot_duration = time::parse_minutes(required("Slot duration", &self.slot_duration)?)?;
        let break_duration =
            time::parse_minutes(required("Break duration", &self.break_duration)?)?;
        let buffer_duration =
            time::parse_minutes(required("Buffer duration", &self.buffer_duration)?)?;

        let request = GenerationRequest {
            start_date,
            start_time,
            end_date,
            end_time,
            time_zone,
            slot_duration,
            break_duration,
            buffer_duration,
        };
        request.check_range()?;

        let first_window_end = request.start_date.and_time(request.end_time);
        let first_slot_end =
            request.start_civil() + Duration::minutes(i64::from(request.slot_duration));
        if first_slot_end > first_window_end {
            return Err(SlotError::Validation(
                "End time must be after start time and allow for at least one slot duration"
                    .to_string(),
            ));
        }

        Ok(request)
    }
}

fn required<'a>(field: &str, value: &'a str) -> SlotResult<&'a str> {
    if value.trim().is_empty() {
        Err(SlotError::Validation(format!("{} is required", field)))
    } else {
        Ok(value)
    }
}

/// Typed input for [`crate::generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub time_zone: Tz,
    pub slot_duration: u32,
    pub break_duration: u32,
    pub buffer_duration: u32,
}

impl GenerationRequest {
    /// Build a request from already-typed civil values and a zone name.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTimezone`] when `time_zone` is not a known
    /// IANA identifier and [`SlotError::InvalidDuration`] for a zero duration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        time_zone: &str,
        slot_duration: u32,
        break_duration: u32,
        buffer_duration: u32,
    ) -> SlotResult<Self> {
        let time_zone = time::parse_timezone(time_zone)?;
        for (name, minutes) in [
            ("slot duration", slot_duration),
            ("break duration", break_duration),
            ("buffer duration", buffer_duration),
        ] {
            if minutes == 0 {
                return Err(SlotError::InvalidDuration(format!(
                    "{} must be a positive integer",
                    name
                )));
            }
        }

        Ok(Self {
            start_date,
            start_time,
            end_date,
            end_time,
            time_zone,
            slot_duration,
            break_duration,
            buffer_duration,
        })
    }

    pub fn start_civil(&self) -> chrono::NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end_civil(&self) -> chrono::NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    pub fn start(&self) -> DateTime<Tz> {
        time::localize(self.time_zone, self.start_civil())
    }

    pub fn end(&self) -> DateTime<Tz> {
        time::localize(self.time_zone, self.end_civil())
    }

    /// The combined start civil datetime must be strictly before the combined
    /// end civil datetime. Compared on the wall clock, so a window opening
    /// inside a spring-forward gap is still a valid range.
    pub fn check_range(&self) -> SlotResult<()> {
        let (start, end) = (self.start_civil(), self.end_civil());
        if start < end {
            Ok(())
        } else {
            Err(SlotError::InvalidRange(format!(
                "start {} must be before end {}",
                start.format(time::DATETIME_FORMAT),
                end.format(time::DATETIME_FORMAT)
            )))
        }
    }
}
