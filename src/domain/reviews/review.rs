use chrono::{DateTime, Utc};

pub const MIN_TEXT_CHARS: usize = 10;

/// A star rating, guaranteed to lie in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(i64);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub place_id: i64,
    pub user_id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A review as shown on a place page.
#[derive(Debug, Clone)]
pub struct PlaceReview {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub is_current_user: bool,
}

/// A review as listed for its author, with the place denormalized.
#[derive(Debug, Clone)]
pub struct UserReview {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub place_id: i64,
    pub place_name: String,
    pub place_address: String,
}
