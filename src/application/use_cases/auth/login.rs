use crate::application::error::{AppError, AuthError};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::identity::Identity;
use crate::application::use_cases::auth::AuthSession;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub identity: &'a Identity,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> Result<AuthSession, AppError> {
        let phone_number = req.phone_number.trim();
        if phone_number.is_empty() || req.password.is_empty() {
            return Err(AppError::validation(
                "Phone number and password are required.",
            ));
        }

        let row = match self.repo.find_by_phone(phone_number).await? {
            Some(r) => r,
            None => return Err(AuthError::InvalidCredentials.into()),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        if !self.identity.verify_password(&req.password, &hash).await {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = User::from(row);
        let token = self
            .identity
            .issue_token(&user)
            .map_err(AppError::Internal)?;
        Ok(AuthSession { user, token })
    }
}
