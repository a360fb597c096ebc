use crate::application::error::AppError;
use crate::application::ports::store_error::StoreError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::identity::Identity;
use crate::application::use_cases::auth::AuthSession;
use crate::domain::users::user::{MIN_PASSWORD_LEN, User};

const PHONE_TAKEN: &str = "Phone number already registered.";

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub identity: &'a Identity,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub phone_number: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<AuthSession, AppError> {
        let name = req.name.trim();
        let phone_number = req.phone_number.trim();
        if name.is_empty() || phone_number.is_empty() || req.password.is_empty() {
            return Err(AppError::validation(
                "Name, phone number, and password are required.",
            ));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }

        if self.repo.find_by_phone(phone_number).await?.is_some() {
            return Err(AppError::conflict(PHONE_TAKEN));
        }

        let hash = self
            .identity
            .hash_password(&req.password)
            .await
            .map_err(AppError::Internal)?;
        // A concurrent registration can still win between the lookup and here.
        let row = match self.repo.create_user(name, phone_number, &hash).await {
            Ok(row) => row,
            Err(StoreError::ConstraintViolation(_)) => return Err(AppError::conflict(PHONE_TAKEN)),
            Err(err) => return Err(err.into()),
        };
        let user = User::from(row);
        let token = self
            .identity
            .issue_token(&user)
            .map_err(AppError::Internal)?;
        tracing::info!(user_id = user.id, "user_registered");
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestEnv;

    fn request(phone: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Asha".into(),
            phone_number: phone.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn registers_and_issues_token_for_new_user() {
        let env = TestEnv::new().await;
        let uc = Register {
            repo: &env.users,
            identity: &env.identity,
        };
        let session = uc.execute(&request("9000000001", "secret1")).await.unwrap();
        assert_eq!(session.user.name, "Asha");
        assert_eq!(session.user.phone_number, "9000000001");
        let caller = env.identity.verify_token(Some(&session.token)).unwrap();
        assert_eq!(caller.id, session.user.id);

        let stored = env.users.find_by_phone("9000000001").await.unwrap().unwrap();
        let hash = stored.password_hash.unwrap();
        assert_ne!(hash, "secret1");
        assert!(env.identity.verify_password("secret1", &hash).await);
    }

    #[tokio::test]
    async fn second_registration_with_same_phone_conflicts() {
        let env = TestEnv::new().await;
        let uc = Register {
            repo: &env.users,
            identity: &env.identity,
        };
        uc.execute(&request("9000000002", "secret1")).await.unwrap();
        let err = uc
            .execute(&request("9000000002", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == PHONE_TAKEN));
        assert_eq!(env.count_rows("users").await, 1);
    }

    #[tokio::test]
    async fn rejects_missing_fields_and_short_password() {
        let env = TestEnv::new().await;
        let uc = Register {
            repo: &env.users,
            identity: &env.identity,
        };
        let missing = RegisterRequest {
            name: "   ".into(),
            phone_number: "9000000003".into(),
            password: "secret1".into(),
        };
        assert!(matches!(
            uc.execute(&missing).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&request("9000000003", "12345")).await,
            Err(AppError::Validation(ref m)) if m == "Password must be at least 6 characters."
        ));
        assert_eq!(env.count_rows("users").await, 0);
    }
}
