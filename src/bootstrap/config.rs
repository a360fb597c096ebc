use std::env;
use std::path::PathBuf;

use crate::application::services::identity::DEFAULT_TOKEN_TTL_SECS;

const DEV_SECRET: &str = "development-secret-change-me";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub data_dir: PathBuf,
    pub database_file: String,
    pub jwt_secret: String,
    pub jwt_expires_secs: i64,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let frontend_url = env::var("FRONTEND_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let database_file = env::var("DATABASE_FILE").unwrap_or_else(|_| "reviews.db".into());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.into());
        let jwt_expires_secs = env::var("JWT_EXPIRES_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs: &i64| *secs > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        // Production hardening: require proper FRONTEND_URL and robust secrets
        if is_production {
            if !frontend_url
                .as_deref()
                .is_some_and(|u| u.starts_with("http"))
            {
                anyhow::bail!(
                    "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
                );
            }
            if jwt_secret == DEV_SECRET || jwt_secret.len() < 16 {
                anyhow::bail!("JWT_SECRET must be set to a strong secret in production");
            }
        }

        Ok(Self {
            api_port,
            frontend_url,
            data_dir,
            database_file,
            jwt_secret,
            jwt_expires_secs,
            is_production,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}
