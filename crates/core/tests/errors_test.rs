use slotwise_core::errors::{SlotError, SlotResult};

#[test]
fn test_slot_error_display() {
    let invalid_range = SlotError::InvalidRange("start must be before end".to_string());
    let invalid_timezone = SlotError::InvalidTimezone("'Mars/Olympus'".to_string());
    let invalid_date = SlotError::InvalidDate("'2025-13-01'".to_string());
    let invalid_time = SlotError::InvalidTime("'25:00'".to_string());
    let invalid_duration = SlotError::InvalidDuration("'0'".to_string());
    let validation = SlotError::Validation("Start date is required".to_string());
    let malformed = SlotError::MalformedSlot("missing field `timeZone`".to_string());
    let not_found = SlotError::NotFound("slot 42".to_string());

    assert_eq!(
        invalid_range.to_string(),
        "Invalid range: start must be before end"
    );
    assert_eq!(
        invalid_timezone.to_string(),
        "Invalid timezone: 'Mars/Olympus'"
    );
    assert_eq!(invalid_date.to_string(), "Invalid date: '2025-13-01'");
    assert_eq!(invalid_time.to_string(), "Invalid time: '25:00'");
    assert_eq!(invalid_duration.to_string(), "Invalid duration: '0'");
    assert_eq!(
        validation.to_string(),
        "Validation error: Start date is required"
    );
    assert!(malformed.to_string().starts_with("Malformed slot skipped:"));
    assert_eq!(not_found.to_string(), "Slot not found: slot 42");
}

#[test]
fn test_slot_result() {
    let result: SlotResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: SlotResult<i32> = Err(SlotError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_errors_convert_into_eyre_style_boxes() {
    let error: Box<dyn std::error::Error + Send + Sync> =
        Box::new(SlotError::InvalidRange("zero-length window".to_string()));

    assert!(error.to_string().contains("zero-length window"));
}
