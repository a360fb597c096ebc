use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::application::ports::review_repository::{ReviewDraft, ReviewRepository};
use crate::application::ports::store_error::{StoreError, StoreResult};
use crate::domain::reviews::review::{PlaceReview, Review, UserReview};
use crate::infrastructure::db::Store;

pub struct SqlxReviewRepository {
    pub store: Store,
}

impl SqlxReviewRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Review>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(
                    r#"SELECT id, place_id, user_id, rating, text, created_at
                       FROM reviews WHERE id = ?"#,
                )
                .bind(id),
            )
            .await?;
        Ok(row.as_ref().map(review_from_row).transpose()?)
    }
}

fn review_from_row(r: &SqliteRow) -> Result<Review, sqlx::Error> {
    Ok(Review {
        id: r.try_get("id")?,
        place_id: r.try_get("place_id")?,
        user_id: r.try_get("user_id")?,
        rating: r.try_get("rating")?,
        text: r.try_get("text")?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    async fn find_by_place_and_user(
        &self,
        place_id: i64,
        user_id: i64,
    ) -> StoreResult<Option<Review>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(
                    r#"SELECT id, place_id, user_id, rating, text, created_at
                       FROM reviews WHERE place_id = ? AND user_id = ?"#,
                )
                .bind(place_id)
                .bind(user_id),
            )
            .await?;
        Ok(row.as_ref().map(review_from_row).transpose()?)
    }

    async fn insert(
        &self,
        place_id: i64,
        user_id: i64,
        draft: &ReviewDraft,
    ) -> StoreResult<Review> {
        let done = self
            .store
            .execute(
                sqlx::query(
                    r#"INSERT INTO reviews (place_id, user_id, rating, text, created_at)
                       VALUES (?, ?, ?, ?, ?)"#,
                )
                .bind(place_id)
                .bind(user_id)
                .bind(draft.rating.get())
                .bind(&draft.text)
                .bind(draft.written_at),
            )
            .await?;
        self.find_by_id(done.last_insert_id).await?.ok_or_else(|| {
            StoreError::Storage(anyhow::anyhow!(
                "review {} missing after insert",
                done.last_insert_id
            ))
        })
    }

    async fn overwrite(&self, review_id: i64, draft: &ReviewDraft) -> StoreResult<Option<Review>> {
        let done = self
            .store
            .execute(
                sqlx::query("UPDATE reviews SET rating = ?, text = ?, created_at = ? WHERE id = ?")
                    .bind(draft.rating.get())
                    .bind(&draft.text)
                    .bind(draft.written_at)
                    .bind(review_id),
            )
            .await?;
        if done.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(review_id).await
    }

    async fn list_for_place(
        &self,
        place_id: i64,
        viewer_id: i64,
    ) -> StoreResult<Vec<PlaceReview>> {
        let rows = self
            .store
            .fetch_all(
                sqlx::query(
                    r#"SELECT r.id, r.rating, r.text, r.created_at, r.user_id,
                              u.name AS user_name
                       FROM reviews r
                       JOIN users u ON u.id = r.user_id
                       WHERE r.place_id = ?
                       ORDER BY CASE WHEN r.user_id = ? THEN 0 ELSE 1 END,
                                r.created_at DESC, r.id DESC"#,
                )
                .bind(place_id)
                .bind(viewer_id),
            )
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            let user_id: i64 = r.try_get("user_id")?;
            out.push(PlaceReview {
                id: r.try_get("id")?,
                rating: r.try_get("rating")?,
                text: r.try_get("text")?,
                created_at: r.try_get("created_at")?,
                user_id,
                user_name: r.try_get("user_name")?,
                is_current_user: user_id == viewer_id,
            });
        }
        Ok(out)
    }

    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<UserReview>> {
        let rows = self
            .store
            .fetch_all(
                sqlx::query(
                    r#"SELECT r.id, r.rating, r.text, r.created_at,
                              p.id AS place_id, p.name AS place_name, p.address AS place_address
                       FROM reviews r
                       JOIN places p ON p.id = r.place_id
                       WHERE r.user_id = ?
                       ORDER BY r.created_at DESC, r.id DESC"#,
                )
                .bind(user_id),
            )
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            out.push(UserReview {
                id: r.try_get("id")?,
                rating: r.try_get("rating")?,
                text: r.try_get("text")?,
                created_at: r.try_get("created_at")?,
                place_id: r.try_get("place_id")?,
                place_name: r.try_get("place_name")?,
                place_address: r.try_get("place_address")?,
            });
        }
        Ok(out)
    }
}
