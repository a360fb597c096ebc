//! Password hashing and bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the caller's id, name and phone number.
//! Nothing is stored server-side: a token that verifies is the whole session.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use password_hash::rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::application::error::AuthError;
use crate::domain::users::user::User;

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// The authenticated identity decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct Identity {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl Identity {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs,
        }
    }

    /// Salted argon2id hash in PHC string form. Runs on the blocking pool.
    pub async fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&password)).await?
    }

    /// False on mismatch and on a stored hash that cannot be parsed.
    pub async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .unwrap_or(false)
    }

    pub fn issue_token(&self, user: &User) -> anyhow::Result<String> {
        self.issue_token_at(user, Utc::now().timestamp())
    }

    fn issue_token_at(&self, user: &User, issued_at: i64) -> anyhow::Result<String> {
        let claims = Claims {
            id: user.id,
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Checks signature and expiry.
    pub fn verify_token(&self, token: Option<&str>) -> Result<Caller, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                tracing::debug!(error = %err, "bearer token rejected");
                AuthError::InvalidToken
            })?;
        Ok(Caller {
            id: data.claims.id,
            name: data.claims.name,
            phone_number: data.claims.phone_number,
        })
    }
}

fn hash_blocking(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
