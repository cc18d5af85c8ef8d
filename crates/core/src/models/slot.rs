use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};
use crate::time;

/// A single bookable interval with an explicit timezone.
///
/// Dates and times are civil values interpreted in `time_zone`. Duration
/// fields are copied from the form that generated the slot.
///
/// `start_offset` and `end_offset` record the UTC offset (seconds east) each
/// civil value was read with. They only matter when a civil time occurs
/// twice on a fall-back day; records without them resolve as described on
/// [`Slot::instants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(alias = "uid")]
    pub id: Uuid,
    pub start_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub time_zone: Tz,
    #[serde(with = "minutes")]
    pub slot_duration: u32,
    #[serde(with = "minutes")]
    pub break_duration: u32,
    #[serde(with = "minutes")]
    pub buffer_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<i32>,
}

impl Slot {
    /// Decode one persisted record, rejecting it as a whole when any field is
    /// missing or malformed.
    pub fn from_value(value: serde_json::Value) -> SlotResult<Self> {
        serde_json::from_value(value).map_err(|e| SlotError::MalformedSlot(e.to_string()))
    }

    pub fn start_civil(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end_civil(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Start and end instants in the slot's own zone.
    ///
    /// A recorded offset selects the matching reading of its civil value.
    /// Otherwise, when either civil value falls in a DST overlap, the pair of
    /// readings that is exactly `slot_duration` apart wins, earliest start
    /// first. Without such a pair both ends take their earliest reading.
    ///
    /// Two offset-less records with the same civil start and end inside an
    /// overlap are indistinguishable and resolve to the same instants.
    pub fn instants(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        let starts = time::candidates(self.time_zone, self.start_civil());
        let ends = time::candidates(self.time_zone, self.end_civil());

        if let (Some(start), Some(end)) = (
            reading_with_offset(&starts, self.start_offset),
            reading_with_offset(&ends, self.end_offset),
        ) {
            return (start, end);
        }

        let expected = Duration::minutes(i64::from(self.slot_duration));

        starts
            .iter()
            .flat_map(|start| ends.iter().map(move |end| (*start, *end)))
            .find(|(start, end)| *end - *start == expected)
            .unwrap_or_else(|| (starts[0], ends[0]))
    }

    /// Start instant in the slot's own zone.
    pub fn start(&self) -> DateTime<Tz> {
        self.instants().0
    }

    /// End instant in the slot's own zone.
    pub fn end(&self) -> DateTime<Tz> {
        self.instants().1
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start().with_timezone(&Utc)
    }

    pub fn duration(&self) -> Duration {
        let (start, end) = self.instants();
        end - start
    }

    /// Start instant as seen from a viewer in `tz`.
    pub fn start_in(&self, tz: Tz) -> DateTime<Tz> {
        self.start().with_timezone(&tz)
    }

    /// End instant as seen from a viewer in `tz`.
    pub fn end_in(&self, tz: Tz) -> DateTime<Tz> {
        self.end().with_timezone(&tz)
    }

    /// Last instant at which the slot may still be booked.
    pub fn booking_deadline(&self) -> DateTime<Utc> {
        self.start_utc() - Duration::minutes(i64::from(self.buffer_duration))
    }

    pub fn can_be_booked_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.booking_deadline()
    }
}

fn reading_with_offset(readings: &[DateTime<Tz>], offset: Option<i32>) -> Option<DateTime<Tz>> {
    let offset = offset?;
    readings
        .iter()
        .find(|dt| dt.offset().fix().local_minus_utc() == offset)
        .copied()
}

/// `HH:mm` on the wire, strict on the way in.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::time::{TIME_FORMAT, parse_time_of_day};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw).map_err(D::Error::custom)
    }
}

/// Positive minute counts. Older records store them as digit strings.
pub mod minutes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::time::parse_minutes;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMinutes {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawMinutes::deserialize(deserializer)? {
            RawMinutes::Number(0) => Err(D::Error::custom("duration must be a positive integer")),
            RawMinutes::Number(n) => u32::try_from(n).map_err(D::Error::custom),
            RawMinutes::Text(text) => parse_minutes(&text).map_err(D::Error::custom),
        }
    }
}
