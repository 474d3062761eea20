use crate::core::EARTH_RADIUS_MILES;
use crate::models::{Listing, Margins, NewListing, NewRequirement, Requirement, WithDistance};
use crate::services::store::{MatchStore, StoreError};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

/// Great-circle distance in miles from ($1, $2), clamped into acos' domain
const DISTANCE_EXPR: &str = "acos(GREATEST(-1.0, LEAST(1.0, \
    sin(radians(latitude)) * sin(radians($1)) \
    + cos(radians(latitude)) * cos(radians($1)) * cos(radians($2) - radians(longitude))))) * $3";

/// PostgreSQL store for listings and requirements
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

impl MatchStore for PostgresStore {
    async fn insert_listing(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        let query = r#"
            INSERT INTO properties (latitude, longitude, price, bedrooms, bathrooms, added_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, added_at
        "#;

        let row = sqlx::query(query)
            .bind(listing.latitude)
            .bind(listing.longitude)
            .bind(listing.price)
            .bind(i32::from(listing.bedrooms))
            .bind(i32::from(listing.bathrooms))
            .fetch_one(&self.pool)
            .await?;

        let id: i64 = row.try_get("id")?;
        let added_at: DateTime<Utc> = row.try_get("added_at")?;

        tracing::debug!("Inserted property {}", id);

        Ok(Listing {
            id,
            latitude: listing.latitude,
            longitude: listing.longitude,
            price: listing.price,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            added_at,
        })
    }

    async fn insert_requirement(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError> {
        let query = r#"
            INSERT INTO requirements (
                latitude, longitude, min_budget, max_budget,
                min_bedrooms, max_bedrooms, min_bathrooms, max_bathrooms, added_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING id, added_at
        "#;

        let row = sqlx::query(query)
            .bind(requirement.latitude)
            .bind(requirement.longitude)
            .bind(requirement.min_budget)
            .bind(requirement.max_budget)
            .bind(requirement.min_bedrooms.map(i32::from))
            .bind(requirement.max_bedrooms.map(i32::from))
            .bind(requirement.min_bathrooms.map(i32::from))
            .bind(requirement.max_bathrooms.map(i32::from))
            .fetch_one(&self.pool)
            .await?;

        let id: i64 = row.try_get("id")?;
        let added_at: DateTime<Utc> = row.try_get("added_at")?;

        tracing::debug!("Inserted requirement {}", id);

        Ok(Requirement {
            id,
            latitude: requirement.latitude,
            longitude: requirement.longitude,
            min_budget: requirement.min_budget,
            max_budget: requirement.max_budget,
            min_bedrooms: requirement.min_bedrooms,
            max_bedrooms: requirement.max_bedrooms,
            min_bathrooms: requirement.min_bathrooms,
            max_bathrooms: requirement.max_bathrooms,
            added_at,
        })
    }

    async fn requirements_near(
        &self,
        listing: &Listing,
        margins: &Margins,
        radius_miles: f64,
    ) -> Result<Vec<WithDistance<Requirement>>, StoreError> {
        let query = format!(
            r#"
            SELECT * FROM (
                SELECT id, latitude, longitude, min_budget, max_budget,
                       min_bedrooms, max_bedrooms, min_bathrooms, max_bathrooms, added_at,
                       {DISTANCE_EXPR} AS distance
                FROM requirements
                WHERE latitude BETWEEN $4 AND $5
                  AND longitude BETWEEN $6 AND $7
            ) candidates
            WHERE distance <= $8
              AND (($9 BETWEEN min_budget AND max_budget)
                   OR (min_budget BETWEEN $10 AND $11)
                   OR (max_budget BETWEEN $10 AND $11))
              AND (($12 BETWEEN min_bedrooms AND max_bedrooms)
                   OR (min_bedrooms BETWEEN $13 AND $14)
                   OR (max_bedrooms BETWEEN $13 AND $14))
              AND (($15 BETWEEN min_bathrooms AND max_bathrooms)
                   OR (min_bathrooms BETWEEN $16 AND $17)
                   OR (max_bathrooms BETWEEN $16 AND $17))
            "#
        );

        let rows = sqlx::query(&query)
            .bind(listing.latitude)
            .bind(listing.longitude)
            .bind(EARTH_RADIUS_MILES)
            .bind(margins.min_lat)
            .bind(margins.max_lat)
            .bind(margins.min_lon)
            .bind(margins.max_lon)
            .bind(radius_miles)
            .bind(listing.price)
            .bind(margins.min_price)
            .bind(margins.max_price)
            .bind(i32::from(listing.bedrooms))
            .bind(i32::from(margins.min_beds))
            .bind(i32::from(margins.max_beds))
            .bind(i32::from(listing.bathrooms))
            .bind(i32::from(margins.min_baths))
            .bind(i32::from(margins.max_baths))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Property {} has {} candidate requirements", listing.id, rows.len());

        rows.iter()
            .map(|row| Ok::<_, StoreError>(WithDistance::new(requirement_from_row(row)?, row.try_get("distance")?)))
            .collect()
    }

    async fn listings_near(
        &self,
        requirement: &Requirement,
        margins: &Margins,
        radius_miles: f64,
    ) -> Result<Vec<WithDistance<Listing>>, StoreError> {
        let query = format!(
            r#"
            SELECT * FROM (
                SELECT id, latitude, longitude, price, bedrooms, bathrooms, added_at,
                       {DISTANCE_EXPR} AS distance
                FROM properties
                WHERE latitude BETWEEN $4 AND $5
                  AND longitude BETWEEN $6 AND $7
            ) candidates
            WHERE distance <= $8
              AND price BETWEEN $9 AND $10
              AND bedrooms BETWEEN $11 AND $12
              AND bathrooms BETWEEN $13 AND $14
            "#
        );

        let rows = sqlx::query(&query)
            .bind(requirement.latitude)
            .bind(requirement.longitude)
            .bind(EARTH_RADIUS_MILES)
            .bind(margins.min_lat)
            .bind(margins.max_lat)
            .bind(margins.min_lon)
            .bind(margins.max_lon)
            .bind(radius_miles)
            .bind(margins.min_price)
            .bind(margins.max_price)
            .bind(i32::from(margins.min_beds))
            .bind(i32::from(margins.max_beds))
            .bind(i32::from(margins.min_baths))
            .bind(i32::from(margins.max_baths))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Requirement {} has {} candidate properties", requirement.id, rows.len());

        rows.iter()
            .map(|row| Ok::<_, StoreError>(WithDistance::new(listing_from_row(row)?, row.try_get("distance")?)))
            .collect()
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn listing_from_row(row: &PgRow) -> Result<Listing, StoreError> {
    Ok(Listing {
        id: row.try_get("id")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        price: row.try_get("price")?,
        bedrooms: rooms(row.try_get("bedrooms")?)?,
        bathrooms: rooms(row.try_get("bathrooms")?)?,
        added_at: row.try_get("added_at")?,
    })
}

fn requirement_from_row(row: &PgRow) -> Result<Requirement, StoreError> {
    Ok(Requirement {
        id: row.try_get("id")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        min_budget: row.try_get("min_budget")?,
        max_budget: row.try_get("max_budget")?,
        min_bedrooms: optional_rooms(row.try_get("min_bedrooms")?)?,
        max_bedrooms: optional_rooms(row.try_get("max_bedrooms")?)?,
        min_bathrooms: optional_rooms(row.try_get("min_bathrooms")?)?,
        max_bathrooms: optional_rooms(row.try_get("max_bathrooms")?)?,
        added_at: row.try_get("added_at")?,
    })
}

fn rooms(value: i32) -> Result<u16, StoreError> {
    u16::try_from(value).map_err(|_| StoreError::InvalidRow(format!("room count out of range: {}", value)))
}

fn optional_rooms(value: Option<i32>) -> Result<Option<u16>, StoreError> {
    value.map(rooms).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_conversion() {
        assert_eq!(rooms(3).unwrap(), 3);
        assert!(rooms(-1).is_err());
        assert!(rooms(70_000).is_err());
        assert_eq!(optional_rooms(None).unwrap(), None);
        assert_eq!(optional_rooms(Some(2)).unwrap(), Some(2));
    }

    #[test]
    fn test_distance_expression_binds_anchor() {
        assert!(DISTANCE_EXPR.contains("$1"));
        assert!(DISTANCE_EXPR.contains("$2"));
        assert!(DISTANCE_EXPR.ends_with("$3"));
    }
}
