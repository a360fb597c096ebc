use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::store_error::StoreResult;
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            phone_number: row.phone_number,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        name: &str,
        phone_number: &str,
        password_hash: &str,
    ) -> StoreResult<UserRow>;
    async fn find_by_phone(&self, phone_number: &str) -> StoreResult<Option<UserRow>>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<UserRow>>;
    async fn delete_user(&self, id: i64) -> StoreResult<bool>;
}
