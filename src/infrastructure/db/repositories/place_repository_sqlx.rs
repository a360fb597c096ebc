use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::application::ports::place_repository::{PlaceRepository, ResolvedPlace};
use crate::application::ports::store_error::{StoreError, StoreResult};
use crate::domain::places::place::{Place, PlaceDetails, PlaceSummary};
use crate::infrastructure::db::Store;

pub struct SqlxPlaceRepository {
    pub store: Store,
}

impl SqlxPlaceRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn find_by_name_and_address(
        &self,
        name: &str,
        address: &str,
    ) -> StoreResult<Option<Place>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(
                    r#"SELECT id, name, address, created_at FROM places
                       WHERE name = ? AND address = ?"#,
                )
                .bind(name)
                .bind(address),
            )
            .await?;
        Ok(row.as_ref().map(place_from_row).transpose()?)
    }
}

fn place_from_row(r: &SqliteRow) -> Result<Place, sqlx::Error> {
    Ok(Place {
        id: r.try_get("id")?,
        name: r.try_get("name")?,
        address: r.try_get("address")?,
        created_at: r.try_get("created_at")?,
    })
}

fn summary_from_row(r: &SqliteRow) -> Result<PlaceSummary, sqlx::Error> {
    Ok(PlaceSummary {
        id: r.try_get("id")?,
        name: r.try_get("name")?,
        address: r.try_get("address")?,
        average_rating: r.try_get("average_rating")?,
        review_count: r.try_get("review_count")?,
    })
}

#[async_trait]
impl PlaceRepository for SqlxPlaceRepository {
    async fn search(
        &self,
        name_filter: Option<&str>,
        min_rating: Option<f64>,
    ) -> StoreResult<Vec<PlaceSummary>> {
        // instr() keeps the name match case-sensitive; LIKE would not.
        let rows = self
            .store
            .fetch_all(
                sqlx::query(
                    r#"SELECT p.id, p.name, p.address,
                              COALESCE(AVG(r.rating), 0.0) AS average_rating,
                              COUNT(r.id) AS review_count
                       FROM places p
                       LEFT JOIN reviews r ON r.place_id = p.id
                       WHERE (? IS NULL OR instr(p.name, ?) > 0)
                       GROUP BY p.id
                       HAVING (? IS NULL OR COALESCE(AVG(r.rating), 0.0) >= ?)
                       ORDER BY p.id"#,
                )
                .bind(name_filter)
                .bind(name_filter)
                .bind(min_rating)
                .bind(min_rating),
            )
            .await?;
        Ok(rows
            .iter()
            .map(summary_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_with_stats(&self, id: i64) -> StoreResult<Option<PlaceDetails>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(
                    r#"SELECT p.id, p.name, p.address, p.created_at,
                              COALESCE(AVG(r.rating), 0.0) AS average_rating,
                              COUNT(r.id) AS review_count
                       FROM places p
                       LEFT JOIN reviews r ON r.place_id = p.id
                       WHERE p.id = ?
                       GROUP BY p.id"#,
                )
                .bind(id),
            )
            .await?;
        let Some(r) = row else {
            return Ok(None);
        };
        Ok(Some(PlaceDetails {
            id: r.try_get("id")?,
            name: r.try_get("name")?,
            address: r.try_get("address")?,
            created_at: r.try_get("created_at")?,
            average_rating: r.try_get("average_rating")?,
            review_count: r.try_get("review_count")?,
        }))
    }

    async fn find_or_create(&self, name: &str, address: &str) -> StoreResult<ResolvedPlace> {
        let done = self
            .store
            .execute(
                sqlx::query(
                    r#"INSERT INTO places (name, address, created_at) VALUES (?, ?, ?)
                       ON CONFLICT (name, address) DO NOTHING"#,
                )
                .bind(name)
                .bind(address)
                .bind(Utc::now()),
            )
            .await?;
        let place = self
            .find_by_name_and_address(name, address)
            .await?
            .ok_or_else(|| StoreError::Storage(anyhow::anyhow!("place missing after upsert")))?;
        Ok(ResolvedPlace {
            place,
            created: done.rows_affected == 1,
        })
    }

    async fn delete_place(&self, id: i64) -> StoreResult<bool> {
        let done = self
            .store
            .execute(sqlx::query("DELETE FROM places WHERE id = ?").bind(id))
            .await?;
        Ok(done.rows_affected > 0)
    }
}
