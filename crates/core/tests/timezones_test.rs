
use pretty_assertions::assert_eq;
use slotwise_core::time::is_valid_timezone;
use slotwise_core::{IanaTimezones, TimezoneInfo, TimezoneLookup};

use test_utils::utc;

#[test]
fn test_list_is_sorted_by_identifier() {
    let lookup = IanaTimezones::at(chrono_tz::UTC, utc("2025-01-15 12:00"));
    let zones = lookup.list_timezones();

    assert!(zones.len() > 300);
    assert!(zones.windows(2).all(|pair| pair[0].id <= pair[1].id));
}

#[test]
fn test_offset_labels_follow_instant() {
    let winter = IanaTimezones::at(chrono_tz::UTC, utc("2025-01-15 12:00")).list_timezones();
    let summer = IanaTimezones::at(chrono_tz::UTC, utc("2025-07-15 12:00")).list_timezones();

    let find = |zones: &[TimezoneInfo], id: &str| {
        zones
            .iter()
            .find(|z| z.id == id)
            .map(|z| z.utc_offset_label.clone())
            .unwrap()
    };

    assert_eq!(find(&winter, "Europe/Berlin"), "UTC+1");
    assert_eq!(find(&summer, "Europe/Berlin"), "UTC+2");
    assert_eq!(find(&winter, "Asia/Kolkata"), "UTC+5.5");
    assert_eq!(find(&winter, "America/St_Johns"), "UTC-3.5");
}

#[test]
fn test_current_device_timezone() {
    let lookup = IanaTimezones::at("America/Chicago".parse().unwrap(), utc("2025-01-15 12:00"));

    assert_eq!(
        lookup.current_device_timezone(),
        TimezoneInfo {
            id: "America/Chicago".to_string(),
            utc_offset_label: "UTC-6".to_string(),
        }
    );
}

#[test]
fn test_timezone_info_wire_shape() {
    let info = TimezoneInfo::at(chrono_tz::UTC, utc("2025-01-15 12:00"));
    let json = serde_json::to_value(&info).unwrap();

    assert_eq!(json["id"], "UTC");
    assert_eq!(json["utcOffsetLabel"], "UTC+0");
}

#[test]
fn test_timezone_validation() {
    assert!(is_valid_timezone("Europe/Berlin"));
    assert!(is_valid_timezone("UTC"));
    assert!(!is_valid_timezone("Europe/Atlantis"));
    assert!(!is_valid_timezone(""));
}
