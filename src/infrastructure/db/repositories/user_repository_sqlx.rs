use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::application::ports::store_error::{StoreError, StoreResult};
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::infrastructure::db::Store;

pub struct SqlxUserRepository {
    pub store: Store,
}

impl SqlxUserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

fn user_from_row(r: &SqliteRow) -> Result<UserRow, sqlx::Error> {
    Ok(UserRow {
        id: r.try_get("id")?,
        name: r.try_get("name")?,
        phone_number: r.try_get("phone_number")?,
        // Only the login lookup selects the hash
        password_hash: match r.try_get("password_hash") {
            Ok(hash) => Some(hash),
            Err(sqlx::Error::ColumnNotFound(_)) => None,
            Err(e) => return Err(e),
        },
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        name: &str,
        phone_number: &str,
        password_hash: &str,
    ) -> StoreResult<UserRow> {
        let done = self
            .store
            .execute(
                sqlx::query(
                    r#"INSERT INTO users (name, phone_number, password_hash, created_at)
                       VALUES (?, ?, ?, ?)"#,
                )
                .bind(name)
                .bind(phone_number)
                .bind(password_hash)
                .bind(Utc::now()),
            )
            .await?;
        self.find_by_id(done.last_insert_id).await?.ok_or_else(|| {
            StoreError::Storage(anyhow::anyhow!(
                "user {} missing after insert",
                done.last_insert_id
            ))
        })
    }

    async fn find_by_phone(&self, phone_number: &str) -> StoreResult<Option<UserRow>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(
                    r#"SELECT id, name, phone_number, password_hash, created_at
                       FROM users WHERE phone_number = ?"#,
                )
                .bind(phone_number),
            )
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<UserRow>> {
        let row = self
            .store
            .fetch_optional(
                sqlx::query(r#"SELECT id, name, phone_number, created_at FROM users WHERE id = ?"#)
                    .bind(id),
            )
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let done = self
            .store
            .execute(sqlx::query("DELETE FROM users WHERE id = ?").bind(id))
            .await?;
        Ok(done.rows_affected > 0)
    }
}
