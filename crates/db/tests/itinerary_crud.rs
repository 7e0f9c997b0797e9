//! Integration tests for the itinerary aggregate repository.
//!
//! Exercises the full repository layer against a real database:
//! - Transactional create of itinerary -> days -> items
//! - Dense 1-based day and item numbering from array position
//! - Cascade delete of the whole aggregate
//! - Clock-string round trip through integer minute storage
//! - Scoped public/user listings

use chrono::NaiveDate;
use sqlx::PgPool;
use voyago_db::models::itinerary::{
    NewItinerary, NewItineraryDay, NewItineraryItem, UpdateItinerary, UpdateItineraryDay,
};
use voyago_db::models::user::CreateUser;
use voyago_db::repositories::{ItineraryRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_item(title: &str, start: Option<&str>, end: Option<&str>) -> NewItineraryItem {
    NewItineraryItem {
        item_type: "attraction".to_string(),
        ref_id: None,
        title: title.to_string(),
        description: None,
        start_time: start.map(str::to_owned),
        end_time: end.map(str::to_owned),
        duration: 0,
        location: None,
        latitude: None,
        longitude: None,
        notes: None,
    }
}

fn tokyo_trip(user_id: i64) -> NewItinerary {
    NewItinerary {
        user_id,
        title: "Tokyo Trip".to_string(),
        description: Some("Three days in Tokyo".to_string()),
        destination: "Tokyo".to_string(),
        start_date: date(2026, 4, 1),
        end_date: date(2026, 4, 3),
        is_public: false,
        days: vec![
            NewItineraryDay {
                date: date(2026, 4, 1),
                note: Some("Arrival".to_string()),
                items: vec![
                    new_item("Senso-ji", Some("9:30"), Some("11:00")),
                    new_item("Skytree", Some("13:00"), None),
                ],
            },
            NewItineraryDay {
                date: date(2026, 4, 2),
                note: None,
                items: vec![new_item("Meiji Shrine", None, None)],
            },
            NewItineraryDay {
                date: date(2026, 4, 3),
                note: None,
                items: vec![],
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Test: Create persists the whole aggregate with dense numbering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_persists_aggregate(pool: PgPool) {
    let user_id = seed_user(&pool, "aggregate").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();

    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(itinerary.record.title, "Tokyo Trip");
    assert_eq!(itinerary.record.user_id, user_id);
    assert_eq!(itinerary.days_count, 3);
    assert_eq!(itinerary.days.len(), 3);

    // Day numbers are dense and 1-based, in array order.
    for (i, day) in itinerary.days.iter().enumerate() {
        assert_eq!(day.record.day_number, (i + 1) as i32);
    }
    assert_eq!(itinerary.days[0].record.note, "Arrival");
    assert_eq!(itinerary.days[1].record.note, "");

    // Item order is dense and 1-based within each day.
    let day1 = &itinerary.days[0];
    assert_eq!(day1.items.len(), 2);
    assert_eq!(day1.items[0].item_order, 1);
    assert_eq!(day1.items[1].item_order, 2);
    assert!(itinerary.days[2].items.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Clock strings round-trip through minute storage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_item_times_round_trip(pool: PgPool) {
    let user_id = seed_user(&pool, "times").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();

    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let items = &itinerary.days[0].items;

    // "9:30" is stored as 570 minutes and rendered back without a leading zero.
    assert_eq!(items[0].start_time, "9:30");
    assert_eq!(items[0].end_time, "11:00");
    // Unset times render as the empty string.
    assert_eq!(items[1].end_time, "");
}

// ---------------------------------------------------------------------------
// Test: Delete removes items, days, and the itinerary together
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_cascades(pool: PgPool) {
    let user_id = seed_user(&pool, "cascade").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();
    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let day_id = itinerary.days[0].record.id;

    let deleted = ItineraryRepo::delete(&pool, id).await.unwrap();
    assert!(deleted);

    assert!(ItineraryRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(ItineraryRepo::find_day_by_id(&pool, day_id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(ItineraryRepo::item_count(&pool, day_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_nonexistent_returns_false(pool: PgPool) {
    let deleted = ItineraryRepo::delete(&pool, 999_999).await.unwrap();
    assert!(!deleted);
}

// ---------------------------------------------------------------------------
// Test: Update overwrites scalar fields and bumps updated_at
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_overwrites_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "update").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();
    let before = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    let updated = ItineraryRepo::update(
        &pool,
        id,
        &UpdateItinerary {
            title: "Tokyo and Kyoto".to_string(),
            description: None,
            destination: "Japan".to_string(),
            start_date: date(2026, 4, 1),
            end_date: date(2026, 4, 6),
            is_public: true,
        },
    )
    .await
    .unwrap();
    assert!(updated);

    let after = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.record.title, "Tokyo and Kyoto");
    assert_eq!(after.record.destination, "Japan");
    assert!(after.record.is_public);
    assert!(after.record.updated_at >= before.record.updated_at);
    // Days are untouched by scalar updates.
    assert_eq!(after.days.len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_nonexistent_returns_false(pool: PgPool) {
    let updated = ItineraryRepo::update(
        &pool,
        999_999,
        &UpdateItinerary {
            title: "Ghost".to_string(),
            description: None,
            destination: "Nowhere".to_string(),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 1, 2),
            is_public: false,
        },
    )
    .await
    .unwrap();
    assert!(!updated);
}

// ---------------------------------------------------------------------------
// Test: Day operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_and_update_day(pool: PgPool) {
    let user_id = seed_user(&pool, "days").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();

    let next_number = ItineraryRepo::day_count(&pool, id).await.unwrap() as i32 + 1;
    let day_id = ItineraryRepo::add_day(
        &pool,
        id,
        next_number,
        &NewItineraryDay {
            date: date(2026, 4, 4),
            note: Some("Extension".to_string()),
            items: vec![new_item("Ghibli Museum", Some("10:00"), None)],
        },
    )
    .await
    .unwrap();

    let day = ItineraryRepo::find_day_by_id(&pool, day_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day.day_number, 4);
    assert_eq!(day.note, "Extension");

    let updated = ItineraryRepo::update_day(
        &pool,
        day_id,
        &UpdateItineraryDay {
            date: date(2026, 4, 5),
            note: None,
        },
    )
    .await
    .unwrap();
    assert!(updated);

    let day = ItineraryRepo::find_day_by_id(&pool, day_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day.date, date(2026, 4, 5));
    assert_eq!(day.note, "");
    // Updating a day never renumbers it.
    assert_eq!(day.day_number, 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_day_leaves_gap(pool: PgPool) {
    let user_id = seed_user(&pool, "gaps").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();
    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let middle_day = itinerary.days[1].record.id;

    let deleted = ItineraryRepo::delete_day(&pool, middle_day).await.unwrap();
    assert!(deleted);

    // Remaining days keep their original numbers; the sequence may have gaps.
    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let numbers: Vec<i32> = itinerary
        .days
        .iter()
        .map(|d| d.record.day_number)
        .collect();
    assert_eq!(numbers, vec![1, 3]);
}

// ---------------------------------------------------------------------------
// Test: Item operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_update_delete_item(pool: PgPool) {
    let user_id = seed_user(&pool, "items").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();
    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let day_id = itinerary.days[1].record.id;

    let next_order = ItineraryRepo::item_count(&pool, day_id).await.unwrap() as i32 + 1;
    assert_eq!(next_order, 2);
    let item_id = ItineraryRepo::add_item(
        &pool,
        day_id,
        next_order,
        &new_item("Harajuku", Some("15:00"), Some("17:30")),
    )
    .await
    .unwrap();

    let updated = ItineraryRepo::update_item(
        &pool,
        item_id,
        &new_item("Harajuku and Shibuya", Some("15:00"), None),
    )
    .await
    .unwrap();
    assert!(updated);

    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let items = &itinerary.days[1].items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].title, "Harajuku and Shibuya");
    assert_eq!(items[1].end_time, "");
    // Order survives updates.
    assert_eq!(items[1].item_order, 2);

    let deleted = ItineraryRepo::delete_item(&pool, item_id).await.unwrap();
    assert!(deleted);
    assert_eq!(ItineraryRepo::item_count(&pool, day_id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: Ownership lookups for nested resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_owner_lookups(pool: PgPool) {
    let user_id = seed_user(&pool, "owner").await;
    let id = ItineraryRepo::create(&pool, &tokyo_trip(user_id)).await.unwrap();
    let itinerary = ItineraryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let day_id = itinerary.days[0].record.id;
    let item_id = itinerary.days[0].items[0].id;

    let (owner_itinerary, owner_user) = ItineraryRepo::find_owner_of_day(&pool, day_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner_itinerary, id);
    assert_eq!(owner_user, user_id);

    let (owner_itinerary, owner_user) = ItineraryRepo::find_owner_of_item(&pool, item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner_itinerary, id);
    assert_eq!(owner_user, user_id);

    assert!(ItineraryRepo::find_owner_of_day(&pool, 999_999)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Listings are scoped and newest-first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_listings_scoped(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let mut private_trip = tokyo_trip(alice);
    private_trip.title = "Private".to_string();
    ItineraryRepo::create(&pool, &private_trip).await.unwrap();

    let mut public_trip = tokyo_trip(alice);
    public_trip.title = "Public".to_string();
    public_trip.is_public = true;
    ItineraryRepo::create(&pool, &public_trip).await.unwrap();

    ItineraryRepo::create(&pool, &tokyo_trip(bob)).await.unwrap();

    let alices = ItineraryRepo::list_by_user(&pool, alice, 10, 0).await.unwrap();
    assert_eq!(alices.len(), 2);

    let public = ItineraryRepo::list_public(&pool, 10, 0).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Public");
}
