//! Read-only repository for the attraction catalog.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use voyago_core::attraction::order_by_clause;
use voyago_core::pagination::{clamp_page, clamp_page_size, page_offset};
use voyago_core::types::DbId;

use crate::models::attraction::{Attraction, AttractionListItem, AttractionSearch};

/// Full column list for `attractions` queries.
const COLUMNS: &str = "id, name, description, city, country, address, latitude, longitude, \
    image_url, category, tags, open_hours, ticket_price, duration, rating, popularity, \
    created_at, updated_at";

/// Trimmed column list for listing endpoints.
const LIST_COLUMNS: &str = "id, name, description, city, country, address, latitude, \
    longitude, image_url, category, rating, duration";

/// Search filters accepted by [`AttractionRepo::search`], with the SQL they
/// produce and the bind values in order.
struct SearchFilters {
    clauses: Vec<String>,
    name: Option<String>,
    city: Option<String>,
    country: Option<String>,
    category: Option<String>,
    min_rating: Option<f64>,
}

impl SearchFilters {
    fn build(search: &AttractionSearch) -> Self {
        let mut clauses: Vec<String> = Vec::new();

        let name = non_empty(&search.name);
        if name.is_some() {
            clauses.push(format!("name ILIKE ${}", clauses.len() + 1));
        }
        let city = non_empty(&search.city);
        if city.is_some() {
            clauses.push(format!("city ILIKE ${}", clauses.len() + 1));
        }
        let country = non_empty(&search.country);
        if country.is_some() {
            clauses.push(format!("country ILIKE ${}", clauses.len() + 1));
        }
        let category = non_empty(&search.category);
        if category.is_some() {
            clauses.push(format!("category = ${}", clauses.len() + 1));
        }
        let min_rating = search.min_rating.filter(|r| *r > 0.0);
        if min_rating.is_some() {
            clauses.push(format!("rating >= ${}", clauses.len() + 1));
        }

        Self {
            clauses,
            name: name.map(|n| format!("%{n}%")),
            city: city.map(|c| format!("%{c}%")),
            country: country.map(|c| format!("%{c}%")),
            category,
            min_rating,
        }
    }

    fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn bind_to<'q, T>(
        &'q self,
        mut query: QueryAs<'q, Postgres, T, PgArguments>,
    ) -> QueryAs<'q, Postgres, T, PgArguments> {
        if let Some(name) = &self.name {
            query = query.bind(name);
        }
        if let Some(city) = &self.city {
            query = query.bind(city);
        }
        if let Some(country) = &self.country {
            query = query.bind(country);
        }
        if let Some(category) = &self.category {
            query = query.bind(category);
        }
        if let Some(min_rating) = self.min_rating {
            query = query.bind(min_rating);
        }
        query
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Provides catalog lookups over the `attractions` table.
pub struct AttractionRepo;

impl AttractionRepo {
    /// Find a single attraction by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attraction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attractions WHERE id = $1");
        sqlx::query_as::<_, Attraction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, sorted, paginated search. Returns the page of rows and the
    /// total count matching the filters.
    pub async fn search(
        pool: &PgPool,
        search: &AttractionSearch,
    ) -> Result<(Vec<Attraction>, i64), sqlx::Error> {
        let filters = SearchFilters::build(search);
        let where_clause = filters.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM attractions{where_clause}");
        let total: i64 = filters
            .bind_to(sqlx::query_as::<_, (i64,)>(&count_query))
            .fetch_one(pool)
            .await?
            .0;

        let page = clamp_page(search.page);
        let limit = clamp_page_size(search.limit);
        let offset = page_offset(page, limit);
        let order_by = order_by_clause(search.sort_by.as_deref());

        let query = format!(
            "SELECT {COLUMNS} FROM attractions{where_clause} \
             ORDER BY {order_by} \
             LIMIT ${} OFFSET ${}",
            filters.clauses.len() + 1,
            filters.clauses.len() + 2,
        );
        let rows = filters
            .bind_to(sqlx::query_as::<_, Attraction>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Most popular attractions, highest popularity first.
    pub async fn list_popular(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<AttractionListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM attractions \
             ORDER BY popularity DESC, rating DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, AttractionListItem>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Attractions in a given category, best rated first.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttractionListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM attractions \
             WHERE category = $1 \
             ORDER BY rating DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AttractionListItem>(&query)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Attractions whose country matches a substring, best rated first.
    pub async fn list_by_country(
        pool: &PgPool,
        country: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttractionListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM attractions \
             WHERE country ILIKE $1 \
             ORDER BY rating DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AttractionListItem>(&query)
            .bind(format!("%{country}%"))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Attractions whose city or country matches a destination substring,
    /// best rated first. Backs destination-driven suggestions.
    pub async fn list_by_city_or_country(
        pool: &PgPool,
        destination: &str,
        limit: i64,
    ) -> Result<Vec<AttractionListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM attractions \
             WHERE city ILIKE $1 OR country ILIKE $1 \
             ORDER BY rating DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, AttractionListItem>(&query)
            .bind(format!("%{destination}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
