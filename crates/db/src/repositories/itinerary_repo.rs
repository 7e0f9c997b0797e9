//! Repository for the itinerary aggregate: `itineraries`, `itinerary_days`,
//! and `itinerary_items`.
//!
//! Every multi-row mutation (full-itinerary create, full-day create,
//! itinerary delete, day delete) runs in one transaction with rollback on any
//! failure, so partial hierarchies are never observable. Single-row scalar
//! mutations skip the transaction.

use sqlx::{PgPool, Postgres, Transaction};
use voyago_core::itinerary::days_count;
use voyago_core::timefmt::parse_clock;
use voyago_core::types::DbId;

use crate::models::itinerary::{
    Itinerary, ItineraryDay, ItineraryDayRecord, ItineraryItemRow, ItineraryRecord, NewItinerary,
    NewItineraryDay, NewItineraryItem, UpdateItinerary, UpdateItineraryDay,
};

/// Column list for `itineraries` queries; NULL description decodes to empty.
const COLUMNS: &str = "id, user_id, title, COALESCE(description, '') AS description, \
    destination, start_date, end_date, is_public, created_at, updated_at";

/// Column list for `itinerary_days` queries.
const DAY_COLUMNS: &str = "id, itinerary_id, day_number, date, COALESCE(note, '') AS note";

/// Column list for `itinerary_items` queries.
const ITEM_COLUMNS: &str = "id, itinerary_day_id, type, ref_id, title, description, \
    start_time, end_time, duration, item_order, location, latitude, longitude, notes";

/// Provides transactional persistence for the itinerary/day/item hierarchy.
pub struct ItineraryRepo;

impl ItineraryRepo {
    /// Create an itinerary, with any nested days and items, in one transaction.
    ///
    /// Nested days receive dense day numbers 1..N from array order; each day's
    /// nested items receive dense orders 1..k the same way. Returns the new
    /// itinerary id.
    pub async fn create(pool: &PgPool, input: &NewItinerary) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO itineraries \
                (user_id, title, description, destination, start_date, end_date, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.destination)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_public)
        .fetch_one(&mut *tx)
        .await?;

        for (i, day) in input.days.iter().enumerate() {
            Self::insert_day_tx(&mut tx, id, (i + 1) as i32, day).await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Load the full aggregate: days ordered by day_number, items by order.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Itinerary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM itineraries WHERE id = $1");
        let record = sqlx::query_as::<_, ItineraryRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        let record = match record {
            Some(record) => record,
            None => return Ok(None),
        };

        let days_query = format!(
            "SELECT {DAY_COLUMNS} FROM itinerary_days \
             WHERE itinerary_id = $1 \
             ORDER BY day_number"
        );
        let day_records = sqlx::query_as::<_, ItineraryDayRecord>(&days_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let items_query = format!(
            "SELECT {ITEM_COLUMNS} FROM itinerary_items \
             WHERE itinerary_day_id = $1 \
             ORDER BY item_order"
        );
        let mut days = Vec::with_capacity(day_records.len());
        for day in day_records {
            let items = sqlx::query_as::<_, ItineraryItemRow>(&items_query)
                .bind(day.id)
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            days.push(ItineraryDay { record: day, items });
        }

        let days_count = days_count(record.start_date, record.end_date);
        Ok(Some(Itinerary {
            record,
            days_count,
            days,
        }))
    }

    /// List a user's itineraries, newest-created first, without children.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ItineraryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM itineraries \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ItineraryRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List publicly shared itineraries, newest-created first, without children.
    pub async fn list_public(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ItineraryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM itineraries \
             WHERE is_public = TRUE \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ItineraryRecord>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overwrite scalar fields and refresh `updated_at`.
    ///
    /// Returns `false` if no row with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItinerary,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE itineraries SET \
                title = $2, description = $3, destination = $4, \
                start_date = $5, end_date = $6, is_public = $7, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.destination)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_public)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an itinerary and everything under it in one transaction:
    /// items, then days, then the itinerary row.
    ///
    /// Returns `false` if the itinerary row did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM itinerary_items \
             WHERE itinerary_day_id IN \
                (SELECT id FROM itinerary_days WHERE itinerary_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM itinerary_days WHERE itinerary_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Days
    // -----------------------------------------------------------------------

    /// Append a day (with any nested items) in one transaction.
    ///
    /// The caller supplies the day number; nested items receive dense orders
    /// from array position. Returns the new day id.
    pub async fn add_day(
        pool: &PgPool,
        itinerary_id: DbId,
        day_number: i32,
        input: &NewItineraryDay,
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let day_id = Self::insert_day_tx(&mut tx, itinerary_id, day_number, input).await?;
        tx.commit().await?;
        Ok(day_id)
    }

    /// Find a day row by id.
    pub async fn find_day_by_id(
        pool: &PgPool,
        day_id: DbId,
    ) -> Result<Option<ItineraryDayRecord>, sqlx::Error> {
        let query = format!("SELECT {DAY_COLUMNS} FROM itinerary_days WHERE id = $1");
        sqlx::query_as::<_, ItineraryDayRecord>(&query)
            .bind(day_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a day's scalar fields (date, note). Day numbers are
    /// append-only and never rewritten here.
    pub async fn update_day(
        pool: &PgPool,
        day_id: DbId,
        input: &UpdateItineraryDay,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE itinerary_days SET date = $2, note = $3 WHERE id = $1")
            .bind(day_id)
            .bind(input.date)
            .bind(&input.note)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a day and its items in one transaction.
    ///
    /// Sibling day numbers are NOT renumbered; gaps are acceptable.
    pub async fn delete_day(pool: &PgPool, day_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM itinerary_items WHERE itinerary_day_id = $1")
            .bind(day_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM itinerary_days WHERE id = $1")
            .bind(day_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of days currently under an itinerary.
    pub async fn day_count(pool: &PgPool, itinerary_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM itinerary_days WHERE itinerary_id = $1")
            .bind(itinerary_id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Insert a single item with the given order. Returns the new item id.
    pub async fn add_item(
        pool: &PgPool,
        day_id: DbId,
        item_order: i32,
        input: &NewItineraryItem,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO itinerary_items \
                (itinerary_day_id, type, ref_id, title, description, start_time, end_time, \
                 duration, item_order, location, latitude, longitude, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING id",
        )
        .bind(day_id)
        .bind(&input.item_type)
        .bind(input.ref_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(clock_to_minutes(input.start_time.as_deref()))
        .bind(clock_to_minutes(input.end_time.as_deref()))
        .bind(input.duration)
        .bind(item_order)
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.notes)
        .fetch_one(pool)
        .await
    }

    /// Overwrite an item's scalar fields. The item's order within its day is
    /// left unchanged.
    pub async fn update_item(
        pool: &PgPool,
        item_id: DbId,
        input: &NewItineraryItem,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE itinerary_items SET \
                type = $2, ref_id = $3, title = $4, description = $5, start_time = $6, \
                end_time = $7, duration = $8, location = $9, latitude = $10, \
                longitude = $11, notes = $12 \
             WHERE id = $1",
        )
        .bind(item_id)
        .bind(&input.item_type)
        .bind(input.ref_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(clock_to_minutes(input.start_time.as_deref()))
        .bind(clock_to_minutes(input.end_time.as_deref()))
        .bind(input.duration)
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.notes)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a single item. Sibling orders are NOT renumbered.
    pub async fn delete_item(pool: &PgPool, item_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM itinerary_items WHERE id = $1")
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of items currently under a day.
    pub async fn item_count(pool: &PgPool, day_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM itinerary_items WHERE itinerary_day_id = $1")
            .bind(day_id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Owner resolution (for ownership checks on day/item mutations)
    // -----------------------------------------------------------------------

    /// Resolve the itinerary id and owning user id for a day.
    pub async fn find_owner_of_day(
        pool: &PgPool,
        day_id: DbId,
    ) -> Result<Option<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT i.id, i.user_id \
             FROM itineraries i \
             JOIN itinerary_days d ON d.itinerary_id = i.id \
             WHERE d.id = $1",
        )
        .bind(day_id)
        .fetch_optional(pool)
        .await
    }

    /// Resolve the itinerary id and owning user id for an item.
    pub async fn find_owner_of_item(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Option<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT i.id, i.user_id \
             FROM itineraries i \
             JOIN itinerary_days d ON d.itinerary_id = i.id \
             JOIN itinerary_items it ON it.itinerary_day_id = d.id \
             WHERE it.id = $1",
        )
        .bind(item_id)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert a day row and its nested items within an existing transaction.
    async fn insert_day_tx(
        tx: &mut Transaction<'_, Postgres>,
        itinerary_id: DbId,
        day_number: i32,
        day: &NewItineraryDay,
    ) -> Result<DbId, sqlx::Error> {
        let day_id: DbId = sqlx::query_scalar(
            "INSERT INTO itinerary_days (itinerary_id, day_number, date, note) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(itinerary_id)
        .bind(day_number)
        .bind(day.date)
        .bind(&day.note)
        .fetch_one(&mut **tx)
        .await?;

        for (i, item) in day.items.iter().enumerate() {
            Self::insert_item_tx(tx, day_id, (i + 1) as i32, item).await?;
        }

        Ok(day_id)
    }

    /// Insert an item row within an existing transaction.
    async fn insert_item_tx(
        tx: &mut Transaction<'_, Postgres>,
        day_id: DbId,
        item_order: i32,
        item: &NewItineraryItem,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO itinerary_items \
                (itinerary_day_id, type, ref_id, title, description, start_time, end_time, \
                 duration, item_order, location, latitude, longitude, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING id",
        )
        .bind(day_id)
        .bind(&item.item_type)
        .bind(item.ref_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(clock_to_minutes(item.start_time.as_deref()))
        .bind(clock_to_minutes(item.end_time.as_deref()))
        .bind(item.duration)
        .bind(item_order)
        .bind(&item.location)
        .bind(item.latitude)
        .bind(item.longitude)
        .bind(&item.notes)
        .fetch_one(&mut **tx)
        .await
    }
}

/// Parse an optional `"H:MM"` clock string to a minute offset for storage.
///
/// Callers validate the format beforehand; an unparsable string stores NULL.
fn clock_to_minutes(clock: Option<&str>) -> Option<i32> {
    clock.and_then(parse_clock)
}
