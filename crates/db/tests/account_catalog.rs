//! Integration tests for the account and attraction catalog repositories.

use assert_matches::assert_matches;
use sqlx::PgPool;
use voyago_db::models::attraction::AttractionSearch;
use voyago_db::models::preference::{SaveTravelPreference, SaveUserPreference};
use voyago_db::models::user::{CreateUser, UpdateUserProfile};
use voyago_db::repositories::{AttractionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$stub".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: None,
    }
}

async fn seed_attraction(
    pool: &PgPool,
    name: &str,
    city: &str,
    country: &str,
    category: &str,
    rating: f64,
    popularity: i32,
) {
    sqlx::query(
        "INSERT INTO attractions (name, city, country, category, rating, popularity) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(name)
    .bind(city)
    .bind(country)
    .bind(category)
    .bind(rating)
    .bind(popularity)
    .execute(pool)
    .await
    .unwrap();
}

async fn seed_catalog(pool: &PgPool) {
    seed_attraction(pool, "Eiffel Tower", "Paris", "France", "landmark", 4.7, 98).await;
    seed_attraction(pool, "Louvre Museum", "Paris", "France", "museum", 4.8, 95).await;
    seed_attraction(pool, "Tokyo Tower", "Tokyo", "Japan", "landmark", 4.2, 80).await;
    seed_attraction(pool, "Senso-ji", "Tokyo", "Japan", "temple", 4.5, 88).await;
}

// ---------------------------------------------------------------------------
// Test: User CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_user_create_and_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("carol")).await.unwrap();
    assert_eq!(user.username, "carol");
    assert!(user.is_active());

    let by_email = UserRepo::find_by_email(&pool, "carol@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);

    let by_username = UserRepo::find_by_username(&pool, "carol")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_username.id, user.id);

    assert!(UserRepo::find_by_email(&pool, "nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dave")).await.unwrap();
    let mut dup = new_user("dave2");
    dup.email = "dave@example.com".to_string();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_profile_and_password(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin")).await.unwrap();

    let updated = UserRepo::update_profile(
        &pool,
        user.id,
        &UpdateUserProfile {
            username: "erin".to_string(),
            email: "erin@example.com".to_string(),
            first_name: "Erin".to_string(),
            last_name: "Example".to_string(),
            phone: Some("+1-555-0100".to_string()),
            avatar: None,
        },
    )
    .await
    .unwrap();
    assert!(updated);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(user.first_name, "Erin");
    assert_eq!(user.phone.as_deref(), Some("+1-555-0100"));

    let changed = UserRepo::update_password(&pool, user.id, "$argon2id$new")
        .await
        .unwrap();
    assert!(changed);
    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(user.password_hash, "$argon2id$new");
}

// ---------------------------------------------------------------------------
// Test: Preferences upsert on the user key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_preferences_upsert(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("frank")).await.unwrap();

    assert!(UserRepo::find_preferences(&pool, user.id)
        .await
        .unwrap()
        .is_none());

    let saved = UserRepo::save_preferences(
        &pool,
        user.id,
        &SaveUserPreference {
            language: "en".to_string(),
            currency: "EUR".to_string(),
            notification_enabled: true,
            theme: "dark".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.language, "en");

    // Second save updates in place instead of inserting a second row.
    let saved = UserRepo::save_preferences(
        &pool,
        user.id,
        &SaveUserPreference {
            language: "fr".to_string(),
            currency: "EUR".to_string(),
            notification_enabled: false,
            theme: "dark".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.language, "fr");
    assert!(!saved.notification_enabled);

    let found = UserRepo::find_preferences(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, saved.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_travel_preferences_upsert(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("grace")).await.unwrap();

    let saved = UserRepo::save_travel_preferences(
        &pool,
        user.id,
        &SaveTravelPreference {
            travel_style: "relaxed".to_string(),
            budget_level: "mid".to_string(),
            transport_prefer: "train".to_string(),
            preferred_tags: vec!["food".to_string(), "history".to_string()],
            excluded_tags: vec!["nightlife".to_string()],
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.preferred_tags.0, vec!["food", "history"]);

    let saved = UserRepo::save_travel_preferences(
        &pool,
        user.id,
        &SaveTravelPreference {
            travel_style: "active".to_string(),
            budget_level: "mid".to_string(),
            transport_prefer: "train".to_string(),
            preferred_tags: vec!["hiking".to_string()],
            excluded_tags: vec![],
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.travel_style, "active");
    assert_eq!(saved.preferred_tags.0, vec!["hiking"]);
    assert!(saved.excluded_tags.0.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Attraction search filters, sorting, pagination
// ---------------------------------------------------------------------------

fn empty_search() -> AttractionSearch {
    AttractionSearch {
        name: None,
        city: None,
        country: None,
        category: None,
        min_rating: None,
        sort_by: None,
        page: None,
        limit: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_default_sorts_by_rating(pool: PgPool) {
    seed_catalog(&pool).await;

    let (rows, total) = AttractionRepo::search(&pool, &empty_search()).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(rows[0].name, "Louvre Museum");
    assert_eq!(rows[1].name, "Eiffel Tower");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_filters_combine(pool: PgPool) {
    seed_catalog(&pool).await;

    let mut search = empty_search();
    search.country = Some("japan".to_string());
    search.min_rating = Some(4.4);
    let (rows, total) = AttractionRepo::search(&pool, &search).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].name, "Senso-ji");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_name_is_substring_match(pool: PgPool) {
    seed_catalog(&pool).await;

    let mut search = empty_search();
    search.name = Some("tower".to_string());
    search.sort_by = Some("name".to_string());
    let (rows, total) = AttractionRepo::search(&pool, &search).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows[0].name, "Eiffel Tower");
    assert_eq!(rows[1].name, "Tokyo Tower");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_pagination(pool: PgPool) {
    seed_catalog(&pool).await;

    let mut search = empty_search();
    search.sort_by = Some("name".to_string());
    search.limit = Some(2);
    search.page = Some(2);
    let (rows, total) = AttractionRepo::search(&pool, &search).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Senso-ji");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_popular_and_scoped_listings(pool: PgPool) {
    seed_catalog(&pool).await;

    let popular = AttractionRepo::list_popular(&pool, 2).await.unwrap();
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0].name, "Eiffel Tower");

    let landmarks = AttractionRepo::list_by_category(&pool, "landmark", 10, 0)
        .await
        .unwrap();
    assert_eq!(landmarks.len(), 2);

    let japan = AttractionRepo::list_by_country(&pool, "japan", 10, 0)
        .await
        .unwrap();
    assert_eq!(japan.len(), 2);

    // Country matching is substring, not exact.
    let japan = AttractionRepo::list_by_country(&pool, "Jap", 10, 0)
        .await
        .unwrap();
    assert_eq!(japan.len(), 2);

    let found = AttractionRepo::find_by_id(&pool, popular[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Eiffel Tower");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_destination_matches_city_or_country(pool: PgPool) {
    seed_catalog(&pool).await;

    // "Tokyo" is a city; both Tokyo attractions match, best rated first.
    let tokyo = AttractionRepo::list_by_city_or_country(&pool, "tokyo", 10)
        .await
        .unwrap();
    assert_eq!(tokyo.len(), 2);
    assert_eq!(tokyo[0].name, "Senso-ji");

    // "Fran" only matches the country column, as a substring.
    let france = AttractionRepo::list_by_city_or_country(&pool, "fran", 10)
        .await
        .unwrap();
    assert_eq!(france.len(), 2);

    let none = AttractionRepo::list_by_city_or_country(&pool, "atlantis", 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}
