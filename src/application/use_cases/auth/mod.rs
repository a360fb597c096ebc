use crate::domain::users::user::User;

pub mod login;
pub mod me;
pub mod register;

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
