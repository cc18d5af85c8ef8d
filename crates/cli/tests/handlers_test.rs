use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use slotwise_cli::commands::{ListArgs, TimezonesArgs, UpcomingArgs};
use slotwise_cli::handlers;
use slotwise_core::{BatchId, GenerationBatch, IanaTimezones, SlotCreationValues, SlotError, flatten};
use slotwise_store::{BlobSlotStore, MemoryBlobStore, SlotRepository};
use uuid::Uuid;

type MemoryRepository = SlotRepository<BlobSlotStore<MemoryBlobStore>>;

fn repository() -> MemoryRepository {
    SlotRepository::new(BlobSlotStore::new(MemoryBlobStore::new()))
}

fn before_everything() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

fn form() -> SlotCreationValues {
    SlotCreationValues {
        start_date: "2030-06-03".to_string(),
        start_time: "09:00".to_string(),
        end_date: "2030-06-04".to_string(),
        end_time: "11:00".to_string(),
        time_zone: "UTC".to_string(),
        slot_duration: "50".to_string(),
        break_duration: "10".to_string(),
        buffer_duration: "30".to_string(),
    }
}

#[test]
fn test_generate_stores_batch() {
    let mut repo = repository();
    let mut out = Vec::new();

    let batch = handlers::slots::generate(&mut repo, &form(), before_everything(), &mut out).unwrap();

    // Two days, 09:00-09:50 and 10:00-10:50 each.
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.slot_count(), 4);
    assert_eq!(repo.slots().unwrap(), batch);

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Generated 4 slots in UTC:"));
    assert!(output.contains("2030-06-04 10:00 - 10:50 UTC (UTC, bookable)"));
}

#[test]
fn test_generate_rejects_invalid_form() {
    let mut repo = repository();
    let mut bad = form();
    bad.time_zone = "Nowhere/City".to_string();

    let err = handlers::slots::generate(&mut repo, &bad, before_everything(), &mut Vec::new())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SlotError>(),
        Some(SlotError::InvalidTimezone(_))
    ));
    assert!(repo.slots().unwrap().is_empty());
}

#[test]
fn test_list_filters_and_groups_by_date() {
    let mut repo = repository();
    handlers::slots::generate(&mut repo, &form(), before_everything(), &mut Vec::new()).unwrap();

    let args = ListArgs {
        from: "2030-06-04".to_string(),
        to: "2030-06-05".to_string(),
        by_date: true,
        view_timezone: Some("Asia/Tokyo".to_string()),
        ..ListArgs::default()
    };
    let mut out = Vec::new();
    let count =
        handlers::slots::list(&repo, &args, chrono_tz::UTC, before_everything(), &mut out).unwrap();

    assert_eq!(count, 2);
    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("2030-06-04\n"));
    // 09:00 UTC is 18:00 in Tokyo.
    assert!(output.contains("2030-06-04 18:00 - 18:50 Asia/Tokyo (UTC, bookable)"));
    assert!(!output.contains("2030-06-03"));
}

#[test]
fn test_list_orders_batches_by_first_start() {
    let mut later_form = form();
    later_form.start_date = "2030-07-01".to_string();
    later_form.end_date = "2030-07-01".to_string();
    let earlier = flatten(&slotwise_core::generate(&form().validate().unwrap()).unwrap());
    let later = flatten(&slotwise_core::generate(&later_form.validate().unwrap()).unwrap());

    // The later day gets the smaller batch id.
    let mut batch = GenerationBatch::new();
    batch.insert(BatchId::from(Uuid::from_u128(1)), later);
    batch.insert(BatchId::from(Uuid::from_u128(2)), earlier);

    let ordered: Vec<_> = handlers::slots::in_start_order(&batch)
        .into_iter()
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(
        ordered,
        vec![
            BatchId::from(Uuid::from_u128(2)),
            BatchId::from(Uuid::from_u128(1))
        ]
    );

    let mut repo = repository();
    repo.add_generated(batch).unwrap();
    let mut out = Vec::new();
    handlers::slots::list(
        &repo,
        &ListArgs::default(),
        chrono_tz::UTC,
        before_everything(),
        &mut out,
    )
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    let june = output.find("2030-06-03 09:00").unwrap();
    let july = output.find("2030-07-01 09:00").unwrap();
    assert!(june < july);
}

#[test]
fn test_list_empty_range() {
    let repo = repository();
    let mut out = Vec::new();
    let count = handlers::slots::list(
        &repo,
        &ListArgs::default(),
        chrono_tz::UTC,
        before_everything(),
        &mut out,
    )
    .unwrap();

    assert_eq!(count, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "No slots in range.\n");
}

#[test]
fn test_upcoming_filters_by_zone() {
    let mut repo = repository();
    handlers::slots::generate(&mut repo, &form(), before_everything(), &mut Vec::new()).unwrap();

    let in_utc = handlers::slots::upcoming(
        &repo,
        &UpcomingArgs {
            timezone: Some("UTC".to_string()),
        },
        chrono_tz::UTC,
        before_everything(),
        &mut Vec::new(),
    )
    .unwrap();
    assert_eq!(in_utc, 4);

    let in_berlin = handlers::slots::upcoming(
        &repo,
        &UpcomingArgs {
            timezone: Some("Europe/Berlin".to_string()),
        },
        chrono_tz::UTC,
        before_everything(),
        &mut Vec::new(),
    )
    .unwrap();
    assert_eq!(in_berlin, 0);
}

#[test]
fn test_delete_slot() {
    let mut repo = repository();
    let batch =
        handlers::slots::generate(&mut repo, &form(), before_everything(), &mut Vec::new()).unwrap();
    let target = batch.slots().next().unwrap().clone();

    let mut out = Vec::new();
    let removed = handlers::slots::delete(&mut repo, target.id, &mut out).unwrap();

    assert_eq!(removed, target);
    assert_eq!(repo.slots().unwrap().slot_count(), 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Deleted slot {}\n", target.id)
    );

    let missing = Uuid::new_v4();
    let err = handlers::slots::delete(&mut repo, missing, &mut Vec::new()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SlotError>(),
        Some(&SlotError::NotFound(missing.to_string()))
    );
}

#[test]
fn test_timezones_lists_device_first() {
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let lookup = IanaTimezones::at(chrono_tz::Asia::Kolkata, now);
    let args = TimezonesArgs {
        search: Some("kolk".to_string()),
    };

    let mut out = Vec::new();
    let matches = handlers::timezones::list(&lookup, &args, &mut out).unwrap();

    assert!(matches.iter().all(|zone| zone.id != "Asia/Kolkata"));
    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Asia/Kolkata UTC+5.5 (device)\n"));
}

#[test]
fn test_timezones_search_is_case_insensitive() {
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let lookup = IanaTimezones::at(chrono_tz::UTC, now);
    let args = TimezonesArgs {
        search: Some("BERLIN".to_string()),
    };

    let matches = handlers::timezones::list(&lookup, &args, &mut Vec::new()).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "Europe/Berlin");
    assert_eq!(matches[0].utc_offset_label, "UTC+1");
}
