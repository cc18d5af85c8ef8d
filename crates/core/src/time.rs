//! Civil date/time arithmetic shared by the generator and the range filter.
//!
//! Every slot is described by a civil date and time-of-day plus an IANA zone.
//! The helpers here turn those pieces into instants, and they settle the two
//! DST corner cases the same way everywhere:
//!
//! - an ambiguous local time (clocks falling back) maps to the earlier instant
//! - a local time inside a spring-forward gap moves forward by the gap length

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
};
use chrono_tz::Tz;

use crate::errors::{SlotError, SlotResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse an IANA timezone identifier such as `"Europe/Berlin"` or `"UTC"`.
pub fn parse_timezone(name: &str) -> SlotResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{}'", name)))
}

pub fn is_valid_timezone(name: &str) -> bool {
    parse_timezone(name).is_ok()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> SlotResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| SlotError::InvalidDate(format!("'{}' must be a YYYY-MM-DD date", value)))
}

/// Parse a strict 24-hour `HH:mm` time-of-day.
///
/// Exactly two digits are required on each side of the colon, so `"9:00"`
/// and `"24:00"` are both rejected.
pub fn parse_time_of_day(value: &str) -> SlotResult<NaiveTime> {
    let invalid = || SlotError::InvalidTime(format!("'{}' must be in HH:mm format", value));

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let hour = two_digits(&bytes[0..2]).ok_or_else(invalid)?;
    let minute = two_digits(&bytes[3..5]).ok_or_else(invalid)?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn two_digits(pair: &[u8]) -> Option<u32> {
    if pair.len() == 2 && pair.iter().all(u8::is_ascii_digit) {
        Some(u32::from(pair[0] - b'0') * 10 + u32::from(pair[1] - b'0'))
    } else {
        None
    }
}

/// Parse a positive whole number of minutes written without sign or leading zeros.
pub fn parse_minutes(value: &str) -> SlotResult<u32> {
    let invalid = || SlotError::InvalidDuration(format!("'{}' must be a positive integer", value));

    let mut chars = value.chars();
    match chars.next() {
        Some('1'..='9') => {}
        _ => return Err(invalid()),
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    value.parse::<u32>().map_err(|_| invalid())
}

/// Parse a civil datetime used as a filter bound.
///
/// Accepts `YYYY-MM-DD HH:mm` or a bare `YYYY-MM-DD` (midnight). Surrounding
/// whitespace is ignored; anything else yields `None`.
pub fn parse_civil_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Map a civil datetime in `tz` to an instant.
pub fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => skip_gap(tz, naive),
    }
}

/// Every instant a civil datetime may denote in `tz`, earliest first.
///
/// One entry normally, two during a fall-back overlap, and the forward-shifted
/// instant inside a spring-forward gap.
pub fn candidates(tz: Tz, naive: NaiveDateTime) -> Vec<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => vec![dt],
        LocalResult::Ambiguous(earliest, latest) => vec![earliest, latest],
        LocalResult::None => vec![skip_gap(tz, naive)],
    }
}

fn skip_gap(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    // The offset a day earlier is the one in force right before the gap opened.
    let offset = match tz.from_local_datetime(&(naive - Duration::days(1))) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.offset().fix(),
        LocalResult::None => return tz.from_utc_datetime(&naive),
    };
    let utc = naive - Duration::seconds(i64::from(offset.local_minus_utc()));
    tz.from_utc_datetime(&utc)
}

/// Whole days between two civil datetimes, truncated toward zero.
///
/// Works on wall-clock values, so a 23-hour or 25-hour DST day still counts
/// as one day.
pub fn whole_days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_days()
}

/// Render a UTC offset as an hour label: `UTC+5.5`, `UTC-3`, `UTC+0`.
pub fn format_offset_label(offset_seconds: i32) -> String {
    let hours = f64::from(offset_seconds) / 3600.0;
    let sign = if offset_seconds >= 0 { "+" } else { "" };
    format!("UTC{}{}", sign, hours)
}
