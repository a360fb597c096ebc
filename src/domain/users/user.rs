use chrono::{DateTime, Utc};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}
