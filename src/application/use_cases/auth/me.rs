use crate::application::error::AppError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, id: i64) -> Result<User, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found("User not found."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestEnv;

    #[tokio::test]
    async fn returns_profile_or_not_found() {
        let env = TestEnv::new().await;
        let user = env.register("Meera", "9200000001", "secret1").await;
        let uc = GetMe { repo: &env.users };
        let me = uc.execute(user.id).await.unwrap();
        assert_eq!(me.phone_number, "9200000001");
        assert!(matches!(
            uc.execute(user.id + 100).await,
            Err(AppError::NotFound(_))
        ));
    }
}
