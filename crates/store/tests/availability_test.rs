mod common;

use pretty_assertions::assert_eq;
use rstest::rstest;
use mindtrack_core::{errors::TrackError, models::time_slot::DotColor};
use mindtrack_store::{
    kv::{read_json, KeyValueStore},
    repositories::availability::AvailabilityStore,
    schema::AVAILABILITY_KEY,
};

use common::{date, memory_kv, slot_request, time};

async fn store() -> AvailabilityStore {
    AvailabilityStore::load(memory_kv()).await
}

#[rstest]
#[case("2025-03-05", "09:00", "10:00")]
#[case("2025-12-31", "07:00", "07:30")]
#[case("2026-01-01", "19:30", "20:00")]
#[tokio::test]
async fn test_added_slot_is_returned_for_its_date(
    #[case] day: &str,
    #[case] start: &str,
    #[case] end: &str,
) {
    let store = store().await;

    let added = store
        .add_slot(slot_request(day, start, end, "t@ru.is"))
        .await
        .unwrap();
    let slots = store.get_slots_for_date(date(day), None).await;

    assert_eq!(slots, vec![added.clone()]);
    assert_eq!(added.start_time, time(start));
    assert_eq!(added.end_time, time(end));
    assert_eq!(added.therapist_email, "t@ru.is");
    assert_eq!(added.therapist_name, "Dr. t@ru.is");
    assert_eq!(added.booked_by, None);
    assert_eq!(added.booked_by_name, None);
    assert!(added.id.starts_with(&format!("{}_{}_", day, start)));
}

#[rstest]
#[case("10:00", "10:00")]
#[case("10:00", "09:30")]
#[tokio::test]
async fn test_add_slot_rejects_inverted_range(#[case] start: &str, #[case] end: &str) {
    let store = store().await;

    let result = store
        .add_slot(slot_request("2025-03-05", start, end, "t@ru.is"))
        .await;

    assert!(matches!(result, Err(TrackError::Validation(_))));
    assert!(store.slots().await.is_empty());
}

#[tokio::test]
async fn test_slots_stay_sorted_by_date_then_start() {
    let store = store().await;
    let inputs = [
        ("2025-03-06", "09:00", "10:00"),
        ("2025-03-05", "14:00", "15:00"),
        ("2025-03-05", "08:00", "08:30"),
        ("2025-04-01", "07:00", "08:00"),
        ("2025-03-05", "11:30", "12:00"),
        ("2025-02-28", "16:00", "17:00"),
    ];

    for (day, start, end) in inputs {
        store
            .add_slot(slot_request(day, start, end, "t@ru.is"))
            .await
            .unwrap();

        let keys: Vec<_> = store.slots().await.iter().map(|s| s.sort_key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    let order: Vec<_> = store
        .slots()
        .await
        .iter()
        .map(|s| (s.date.to_string(), s.start_time.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("2025-02-28".to_string(), "16:00".to_string()),
            ("2025-03-05".to_string(), "08:00".to_string()),
            ("2025-03-05".to_string(), "11:30".to_string()),
            ("2025-03-05".to_string(), "14:00".to_string()),
            ("2025-03-06".to_string(), "09:00".to_string()),
            ("2025-04-01".to_string(), "07:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_rapid_adds_get_distinct_ids() {
    let store = store().await;

    let mut ids = Vec::new();
    for _ in 0..5 {
        let slot = store
            .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
            .await
            .unwrap();
        ids.push(slot.id);
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn test_slots_for_date_filters_by_therapist() {
    let store = store().await;
    store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "a@ru.is"))
        .await
        .unwrap();
    store
        .add_slot(slot_request("2025-03-05", "10:00", "11:00", "b@ru.is"))
        .await
        .unwrap();
    store
        .add_slot(slot_request("2025-03-06", "09:00", "10:00", "a@ru.is"))
        .await
        .unwrap();

    let all = store.get_slots_for_date(date("2025-03-05"), None).await;
    let only_a = store
        .get_slots_for_date(date("2025-03-05"), Some("a@ru.is"))
        .await;

    assert_eq!(all.len(), 2);
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].start_time, time("09:00"));
}

#[tokio::test]
async fn test_book_then_cancel_restores_unbooked_state() {
    let store = store().await;
    let slot = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();

    let booked = store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap();
    assert_eq!(booked.booked_by.as_deref(), Some("s@ru.is"));
    assert_eq!(booked.booked_by_name.as_deref(), Some("Stu"));

    let cancelled = store.cancel_booking(&slot.id).await.unwrap();

    assert_eq!(cancelled, slot);
    assert_eq!(cancelled.booked_by, None);
    assert_eq!(cancelled.booked_by_name, None);
}

#[tokio::test]
async fn test_booking_a_taken_slot_conflicts() {
    let store = store().await;
    let slot = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap();

    let result = store.book_slot(&slot.id, "other@ru.is", "Other").await;

    assert!(matches!(result, Err(TrackError::Conflict(_))));
    let kept = store.get_booked_slots("s@ru.is").await;
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].booked_by_name.as_deref(), Some("Stu"));
}

#[tokio::test]
async fn test_holder_can_rebook_own_slot() {
    let store = store().await;
    let slot = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap();

    let rebooked = store
        .book_slot(&slot.id, "s@ru.is", "Stu Dent")
        .await
        .unwrap();

    assert_eq!(rebooked.booked_by_name.as_deref(), Some("Stu Dent"));
}

#[tokio::test]
async fn test_unknown_slot_ids() {
    let store = store().await;

    assert!(matches!(
        store.book_slot("missing", "s@ru.is", "Stu").await,
        Err(TrackError::NotFound(_))
    ));
    assert!(matches!(
        store.cancel_booking("missing").await,
        Err(TrackError::NotFound(_))
    ));
    store.remove_slot("missing").await.unwrap();
}

#[tokio::test]
async fn test_remove_slot_drops_booked_slot() {
    let store = store().await;
    let keep = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    let gone = store
        .add_slot(slot_request("2025-03-05", "10:00", "11:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&gone.id, "s@ru.is", "Stu").await.unwrap();

    store.remove_slot(&gone.id).await.unwrap();

    assert_eq!(store.slots().await, vec![keep]);
    assert!(store.get_booked_slots("s@ru.is").await.is_empty());
}

#[tokio::test]
async fn test_only_slot_booked_marks_date_amber() {
    let store = store().await;
    let slot = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap();

    let marks = store.get_marked_dates(Some("t@ru.is")).await;

    let mark = marks.get(&date("2025-03-05")).unwrap();
    assert!(mark.marked);
    assert_eq!(mark.dot_color, DotColor::Booked);
    assert_eq!(mark.dot_color.hex(), "#F59E0B");
}

#[tokio::test]
async fn test_marked_dates_green_when_any_slot_open() {
    let store = store().await;
    let first = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store
        .add_slot(slot_request("2025-03-05", "13:00", "14:00", "t@ru.is"))
        .await
        .unwrap();
    store
        .add_slot(slot_request("2025-03-07", "09:00", "10:00", "other@ru.is"))
        .await
        .unwrap();
    store.book_slot(&first.id, "s@ru.is", "Stu").await.unwrap();

    let own = store.get_marked_dates(Some("t@ru.is")).await;
    let all = store.get_marked_dates(None).await;

    assert_eq!(own.len(), 1);
    assert_eq!(own[&date("2025-03-05")].dot_color, DotColor::Open);
    assert_eq!(all.len(), 2);
    assert_eq!(all[&date("2025-03-07")].dot_color, DotColor::Open);
}

#[tokio::test]
async fn test_booked_slots_and_therapist_bookings() {
    let store = store().await;
    let a = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    let b = store
        .add_slot(slot_request("2025-03-06", "09:00", "10:00", "u@ru.is"))
        .await
        .unwrap();
    store
        .add_slot(slot_request("2025-03-07", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&a.id, "s@ru.is", "Stu").await.unwrap();
    store.book_slot(&b.id, "s@ru.is", "Stu").await.unwrap();

    let mine: Vec<_> = store
        .get_booked_slots("s@ru.is")
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    let therapist: Vec<_> = store
        .get_therapist_bookings("t@ru.is")
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(mine, vec![a.id.clone(), b.id]);
    assert_eq!(therapist, vec![a.id]);
}

#[tokio::test]
async fn test_every_mutation_rewrites_the_full_list() {
    let kv = memory_kv();
    let store = AvailabilityStore::load(kv.clone()).await;

    let slot = store
        .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
        .await
        .unwrap();
    store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap();

    let raw: serde_json::Value = read_json(kv.as_ref(), AVAILABILITY_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw[0]["bookedBy"], "s@ru.is");
    assert_eq!(raw[0]["startTime"], "09:00");

    store.remove_slot(&slot.id).await.unwrap();
    assert_eq!(kv.get(AVAILABILITY_KEY).await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_reload_restores_slots() {
    let kv = memory_kv();
    let slot = {
        let store = AvailabilityStore::load(kv.clone()).await;
        let slot = store
            .add_slot(slot_request("2025-03-05", "09:00", "10:00", "t@ru.is"))
            .await
            .unwrap();
        store.book_slot(&slot.id, "s@ru.is", "Stu").await.unwrap()
    };

    let reloaded = AvailabilityStore::load(kv).await;

    assert_eq!(reloaded.slots().await, vec![slot]);
}
