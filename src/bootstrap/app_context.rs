use std::sync::Arc;

use crate::application::ports::place_repository::PlaceRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::identity::Identity;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::Store;
use crate::infrastructure::db::repositories::place_repository_sqlx::SqlxPlaceRepository;
use crate::infrastructure::db::repositories::review_repository_sqlx::SqlxReviewRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    place_repo: Arc<dyn PlaceRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    identity: Arc<Identity>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        place_repo: Arc<dyn PlaceRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        identity: Arc<Identity>,
    ) -> Self {
        Self {
            user_repo,
            place_repo,
            review_repo,
            identity,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    /// Wires the sqlx repositories over `store` and an identity keyed by the
    /// configured secret.
    pub fn from_store(cfg: Config, store: &Store) -> Self {
        let identity = Identity::new(&cfg.jwt_secret, cfg.jwt_expires_secs);
        let services = AppServices::new(
            Arc::new(SqlxUserRepository::new(store.clone())),
            Arc::new(SqlxPlaceRepository::new(store.clone())),
            Arc::new(SqlxReviewRepository::new(store.clone())),
            Arc::new(identity),
        );
        Self::new(cfg, services)
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn place_repo(&self) -> Arc<dyn PlaceRepository> {
        self.services.place_repo.clone()
    }

    pub fn review_repo(&self) -> Arc<dyn ReviewRepository> {
        self.services.review_repo.clone()
    }

    pub fn identity(&self) -> Arc<Identity> {
        self.services.identity.clone()
    }
}
